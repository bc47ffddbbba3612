use std::fmt;

/// Failure to acquire an asset from a cache or to decode one.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// No asset of `kind` was registered under `name`.
    NotFound { kind: &'static str, name: String },
    /// The bytes could not be decoded into an asset.
    Decode { kind: &'static str, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { kind, name } => write!(f, "{kind} '{name}' is not loaded"),
            AssetError::Decode { kind, reason } => write!(f, "failed to decode {kind}: {reason}"),
        }
    }
}

impl std::error::Error for AssetError {}
