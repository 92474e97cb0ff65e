// src/validation/validator.rs

use std::collections::HashMap;
use tracing::{debug, warn};

use super::errors::FieldErrors;
use super::rules::{parse_bool, ValidationFunc, INVALID_BOOLEAN, INVALID_INTEGER};
use crate::uploads::{validate_upload, FileValidationConfig, UploadRejection, UploadedFile};

/// Per-request form state: submitted values, uploaded files, and the errors
/// recorded while validating them.
///
/// Accessors never fail. Every problem lands in [`Validator::errors`] and the
/// caller checks [`Validator::valid`] before trusting returned values.
#[derive(Debug, Default)]
pub struct Validator {
    pub errors: FieldErrors,
    values: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        values: HashMap<String, String>,
        files: HashMap<String, UploadedFile>,
    ) -> Self {
        Self {
            errors: FieldErrors::new(),
            values,
            files,
        }
    }

    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Missing fields read as the empty string.
    pub fn get_value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set_file(&mut self, field: &str, file: UploadedFile) {
        self.files.insert(field.to_string(), file);
    }

    pub fn get_file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.get(field)
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn files(&self) -> &HashMap<String, UploadedFile> {
        &self.files
    }

    /// Runs `validations` in order, recording the first failure, and returns
    /// the raw value either way.
    pub fn string(&mut self, field: &str, validations: &[&dyn ValidationFunc]) -> String {
        let value = self.get_value(field).to_string();
        self.run(field, &value, validations);
        value
    }

    /// Runs `validations`, then parses the value as a base-10 `i64`.
    ///
    /// A parse failure replaces any message the validations recorded and
    /// yields 0. A successful parse leaves earlier messages in place.
    pub fn int(&mut self, field: &str, validations: &[&dyn ValidationFunc]) -> i64 {
        let value = self.get_value(field).to_string();
        self.run(field, &value, validations);

        match value.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                self.fail(field, INVALID_INTEGER);
                0
            }
        }
    }

    /// Same precedence as [`Validator::int`], for boolean tokens.
    pub fn bool(&mut self, field: &str, validations: &[&dyn ValidationFunc]) -> bool {
        let value = self.get_value(field).to_string();
        self.run(field, &value, validations);

        match parse_bool(&value) {
            Some(b) => b,
            None => {
                self.fail(field, INVALID_BOOLEAN);
                false
            }
        }
    }

    /// Checks the uploaded file for `field` against `config` and returns it
    /// when every check passes.
    pub fn image(&mut self, field: &str, config: &FileValidationConfig) -> Option<UploadedFile> {
        let Some(file) = self.files.get(field) else {
            self.fail(field, UploadRejection::Missing.to_string());
            return None;
        };

        match validate_upload(file, config) {
            Ok(()) => Some(file.clone()),
            Err(rejection) => {
                self.fail(field, rejection.to_string());
                None
            }
        }
    }

    /// Records `message` for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.fail(field, message);
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Deletes spill files created while parsing the request and returns how
    /// many were removed. Handles pointing at them stop being readable.
    pub fn remove_temp_files(&self) -> usize {
        let mut removed = 0;
        for file in self.files.values() {
            if let Some(path) = file.spill_path() {
                match std::fs::remove_file(path) {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "Failed to remove spill file")
                    }
                }
            }
        }
        removed
    }

    fn run(&mut self, field: &str, value: &str, validations: &[&dyn ValidationFunc]) {
        for validation in validations {
            if let Err(message) = validation.validate(field, value) {
                self.fail(field, message);
                break;
            }
        }
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        debug!(field = %field, message = %message, "Field failed validation");
        self.errors.insert(field, message);
    }
}
