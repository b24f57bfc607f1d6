//! Error types for layer generation.

use serde::{Deserialize, Serialize};

use crate::params::ParamKind;

/// Configuration errors raised while constructing a [`ParameterSpec`](crate::ParameterSpec)
/// or generating a layer. All variants are raised synchronously at the point
/// of construction/declaration; a failed build leaves the sink partially
/// populated and the caller is expected to discard it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    /// No declared step's value equals the requested default value.
    #[error("parameter '{name}' has no step with default value {default_value}")]
    NoDefaultStep { name: String, default_value: f32 },

    /// No declared step's value equals the requested value.
    #[error("parameter '{name}' has no step with value {value}")]
    StepNotFound { name: String, value: f32 },

    /// At least one step has an empty content list.
    #[error("parameter '{name}' has steps without content assigned")]
    IncompleteSpec { name: String },

    /// A parameter name was declared twice with different kinds.
    #[error("parameter '{name}' already declared as {existing:?}, requested {requested:?}")]
    ParameterKindConflict {
        name: String,
        existing: ParamKind,
        requested: ParamKind,
    },

    /// Binary resolution below the minimum of 2 yields a degenerate state set.
    #[error("binary resolution {binary_res} is invalid (minimum is 2)")]
    InvalidResolution { binary_res: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parameter() {
        let err = ConfigError::NoDefaultStep {
            name: "JawOpen".to_string(),
            default_value: 0.5,
        };
        assert!(err.to_string().contains("JawOpen"));
        assert!(err.to_string().contains("0.5"));
    }

    #[test]
    fn serde_roundtrip() {
        let err = ConfigError::ParameterKindConflict {
            name: "Smile".to_string(),
            existing: ParamKind::Float,
            requested: ParamKind::Bool,
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: ConfigError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
