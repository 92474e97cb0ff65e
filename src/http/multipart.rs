// src/http/multipart.rs
//! Loads multipart form parts into a validator

use axum::extract::multipart::{Field, Multipart};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs::{self as tokio_fs, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::common::{FormConfig, FormError};
use crate::uploads::UploadedFile;
use crate::validation::Validator;

/// Reads every part of `multipart` into `validator`.
///
/// Text parts become values and parts with a non-empty filename become
/// files; the first occurrence of a name wins. A part with an empty filename
/// is what browsers send for an untouched file input, so it is read as a
/// value. A malformed stream stops parsing and keeps what was read so far.
/// Only spill-file I/O is reported as an error, after removing any files
/// already spilled for this request.
pub async fn load_multipart(
    validator: &mut Validator,
    mut multipart: Multipart,
    config: &FormConfig,
) -> Result<(), FormError> {
    let mut remaining = config.max_memory;
    let mut seen_values = HashSet::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart body, keeping parts read so far");
                break;
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field
            .file_name()
            .filter(|filename| !filename.is_empty())
            .map(str::to_string)
        {
            Some(filename) => {
                if validator.get_file(&name).is_some() {
                    debug!(field = %name, "Ignoring additional file for field");
                    continue;
                }

                let content_type = field.content_type().map(str::to_string);
                match read_file(field, filename, &mut remaining, config).await {
                    Ok(mut file) => {
                        file.content_type = content_type;
                        validator.set_file(&name, file);
                    }
                    Err(FormError::Multipart(msg)) => {
                        warn!(field = %name, error = %msg, "Upload interrupted");
                        break;
                    }
                    Err(e) => {
                        validator.remove_temp_files();
                        return Err(e);
                    }
                }
            }
            None => {
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(field = %name, error = %e, "Failed to read form value");
                        break;
                    }
                };

                if seen_values.insert(name.clone()) {
                    validator.set_value(&name, text);
                }
            }
        }
    }

    Ok(())
}

/// Buffers one file part in memory while it fits in `remaining`, otherwise
/// streams it to a spill file.
async fn read_file(
    mut field: Field<'_>,
    filename: String,
    remaining: &mut usize,
    config: &FormConfig,
) -> Result<UploadedFile, FormError> {
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = next_chunk(&mut field).await? {
        buffer.extend_from_slice(&chunk);

        if buffer.len() > *remaining {
            return spill(field, filename, buffer, config).await;
        }
    }

    *remaining -= buffer.len();
    Ok(UploadedFile::from_bytes(filename, buffer))
}

async fn spill(
    mut field: Field<'_>,
    filename: String,
    buffered: Vec<u8>,
    config: &FormConfig,
) -> Result<UploadedFile, FormError> {
    tokio_fs::create_dir_all(&config.spill_dir).await?;
    let path: PathBuf = config
        .spill_dir
        .join(format!("form-upload-{}", Uuid::new_v4()));

    let mut size = buffered.len() as i64;
    let written = async {
        let mut out = File::create(&path).await?;
        out.write_all(&buffered).await?;

        while let Some(chunk) = next_chunk(&mut field).await? {
            out.write_all(&chunk).await?;
            size += chunk.len() as i64;
        }

        out.flush().await?;
        Ok::<(), FormError>(())
    }
    .await;

    if let Err(e) = written {
        let _ = tokio_fs::remove_file(&path).await;
        return Err(e);
    }

    debug!(path = %path.display(), size = size, "Upload spilled to disk");
    Ok(UploadedFile::spilled(filename, path, size))
}

async fn next_chunk(field: &mut Field<'_>) -> Result<Option<bytes::Bytes>, FormError> {
    field
        .chunk()
        .await
        .map_err(|e| FormError::Multipart(e.to_string()))
}
