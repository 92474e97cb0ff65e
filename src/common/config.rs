// src/common/config.rs
//! Form parsing limits loaded from the environment

use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::uploads::MB;

/// Default in-memory budget for uploaded file parts (32 MiB).
pub const DEFAULT_MAX_MEMORY: usize = 32 * MB as usize;

/// Default request body limit (64 MiB).
pub const DEFAULT_MAX_BODY: usize = 64 * MB as usize;

#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Bytes of file content kept in memory before parts spill to disk.
    pub max_memory: usize,
    pub spill_dir: PathBuf,
    pub max_body: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            spill_dir: env::temp_dir(),
            max_body: DEFAULT_MAX_BODY,
        }
    }
}

impl FormConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_memory = read_size("FORM_MAX_MEMORY", defaults.max_memory);
        let max_body = read_size("FORM_MAX_BODY", defaults.max_body);
        let spill_dir = env::var("FORM_SPILL_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.spill_dir);

        Self {
            max_memory,
            spill_dir,
            max_body,
        }
    }

    pub fn with_max_memory(mut self, max_memory: usize) -> Self {
        self.max_memory = max_memory;
        self
    }

    pub fn with_spill_dir(mut self, spill_dir: impl Into<PathBuf>) -> Self {
        self.spill_dir = spill_dir.into();
        self
    }
}

/// Reads a byte count from `key`, keeping `default` when unset or unparsable.
pub fn read_size(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = %key, value = %raw, "Ignoring unparsable size, using default");
            default
        }),
        Err(_) => default,
    }
}
