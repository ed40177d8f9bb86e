//! Error types

use thiserror::Error;

/// Failures of the body-store operations.
///
/// The per-frame step never fails; only seeding can.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// The seeding region is empty for this boundary/body combination
    #[error(
        "boundary radius {boundary_radius} leaves no room for a body of radius {body_radius} (margin {margin})"
    )]
    NoRoom {
        boundary_radius: f32,
        body_radius: f32,
        margin: f32,
    },

    /// Rejection sampling never landed inside the boundary
    #[error("no spawn position found inside the boundary after {attempts} attempts")]
    SeedExhausted { attempts: u32 },
}

/// Failures while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
