// src/http/extractor.rs
//! Axum extractor that builds a validator from the incoming request

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Multipart, Query, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

use super::multipart::load_multipart;
use crate::common::{ApiError, FormConfig};
use crate::validation::Validator;

/// A [`Validator`] populated from the request's query string and body.
///
/// Query parameters load first and body fields override them. Repeated names
/// keep their first value within each source. The [`FormConfig`] comes from a
/// request extension when one is installed.
///
/// Spill files written while reading the body are removed when the
/// extractor is dropped.
#[derive(Debug)]
pub struct HttpValidator(pub Validator);

impl HttpValidator {
    /// Takes the validator out. The caller becomes responsible for calling
    /// [`Validator::remove_temp_files`].
    pub fn into_inner(mut self) -> Validator {
        std::mem::take(&mut self.0)
    }
}

impl Drop for HttpValidator {
    fn drop(&mut self) {
        let removed = self.0.remove_temp_files();
        if removed > 0 {
            debug!(removed = removed, "Removed spilled uploads");
        }
    }
}

impl Deref for HttpValidator {
    type Target = Validator;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for HttpValidator {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait]
impl<S> FromRequest<S> for HttpValidator
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = req
            .extensions()
            .get::<FormConfig>()
            .cloned()
            .unwrap_or_default();

        let mut validator = Validator::new();

        if let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()) {
            load_pairs(&mut validator, pairs);
        } else {
            debug!(uri = %req.uri(), "Ignoring unparsable query string");
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => load_multipart(&mut validator, multipart, &config).await?,
                Err(rejection) => {
                    warn!(error = %rejection, "Could not read multipart body");
                }
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => load_pairs(&mut validator, pairs),
                Err(rejection) => {
                    warn!(error = %rejection, "Could not read urlencoded body");
                }
            }
        }

        Ok(HttpValidator(validator))
    }
}

/// Stores `pairs`, keeping the first value for each repeated name.
fn load_pairs(validator: &mut Validator, pairs: Vec<(String, String)>) {
    let mut seen = HashSet::new();
    for (name, value) in pairs {
        if seen.insert(name.clone()) {
            validator.set_value(&name, value);
        }
    }
}
