use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a movie record.
///
/// Ids are assigned outside this system; zero is never a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses the `movieId` path parameter.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let id = raw
            .map(str::trim)
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or(ApiError::InvalidMovieId)?;

        if id == 0 {
            return Err(ApiError::InvalidMovieId);
        }

        Ok(Self(id))
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(MovieId::parse(Some("42")).ok(), Some(MovieId::new(42)));
        assert_eq!(MovieId::parse(Some(" 1234 ")).ok(), Some(MovieId::new(1234)));
        assert_eq!(MovieId::parse(Some("-7")).ok(), Some(MovieId::new(-7)));
    }

    #[test]
    fn rejects_missing_empty_and_zero() {
        for raw in [None, Some(""), Some("   "), Some("0"), Some("-0"), Some("000")] {
            assert!(
                matches!(MovieId::parse(raw), Err(ApiError::InvalidMovieId)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_input() {
        for raw in ["abc", "42abc", "4.2", "1e3", "99999999999999999999"] {
            assert!(
                matches!(MovieId::parse(Some(raw)), Err(ApiError::InvalidMovieId)),
                "{raw:?} should be rejected"
            );
        }
    }
}
