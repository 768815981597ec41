//! Configuration errors
//!
//! Only construction can fail. Every operation on a built simulation clamps or
//! ignores out-of-range input instead of returning an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width must be at least 1 (got {0})")]
    InvalidWidth(usize),

    #[error("grid height must be at least 2 (got {0})")]
    InvalidHeight(usize),

    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    #[error("unknown floor profile '{0}' (expected slope, flat, stepped or random)")]
    UnknownFloorProfile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        assert_eq!(
            ConfigError::InvalidWidth(0).to_string(),
            "grid width must be at least 1 (got 0)"
        );
        assert_eq!(
            ConfigError::InvalidHeight(1).to_string(),
            "grid height must be at least 2 (got 1)"
        );
        assert!(
            ConfigError::UnknownFloorProfile("hills".into())
                .to_string()
                .contains("'hills'")
        );
    }
}
