//! Error types for the recommendation core.
//!
//! Every variant is a validation failure raised before the graph is
//! touched. A missing musical path is not an error; see [`crate::path`].

use thiserror::Error;

/// Result type used across the library.
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Validation failures for a `(name, preferences)` submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// The user name was empty
    #[error("a user name is required")]
    MissingName,

    /// The user name is already taken by a genre node
    #[error("user name `{0}` clashes with a genre of the same name")]
    NameIsGenre(String),

    /// The preference names a genre the catalog does not know
    #[error("unknown genre `{0}`")]
    UnknownGenre(String),

    /// The value parsed but lies outside `[0, 1]`
    #[error("invalid value for {genre}: {value} must be between 0 and 1")]
    OutOfRange { genre: String, value: f64 },

    /// The value is not a number
    #[error("invalid value for {genre}: `{value}` is not a number")]
    NotNumeric { genre: String, value: String },
}

impl RecommendError {
    /// The genre the error points at, if it concerns a single preference.
    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        match self {
            Self::UnknownGenre(genre)
            | Self::OutOfRange { genre, .. }
            | Self::NotNumeric { genre, .. } => Some(genre),
            Self::MissingName | Self::NameIsGenre(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_identifies_offending_genre() {
        let err = RecommendError::OutOfRange { genre: "Jazz".to_string(), value: 1.5 };
        assert_eq!(err.genre(), Some("Jazz"));
        assert!(err.to_string().contains("Jazz"));

        let err = RecommendError::NotNumeric { genre: "Pop".to_string(), value: "abc".to_string() };
        assert_eq!(err.genre(), Some("Pop"));
        assert!(err.to_string().contains("abc"));

        assert_eq!(RecommendError::MissingName.genre(), None);
    }
}
