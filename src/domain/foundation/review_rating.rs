//! Review rating value object (Anki-style four-button scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Student's self-assessment of a flashcard recall attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ReviewRating {
    /// Failed to recall; the card lapses.
    Again = 1,
    /// Recalled with significant effort.
    Hard = 2,
    /// Recalled normally.
    Good = 3,
    /// Recalled effortlessly.
    Easy = 4,
}

impl ReviewRating {
    /// All ratings in ascending order, for preview computation.
    pub const ALL: [ReviewRating; 4] = [
        ReviewRating::Again,
        ReviewRating::Hard,
        ReviewRating::Good,
        ReviewRating::Easy,
    ];

    /// Creates a ReviewRating from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(ReviewRating::Again),
            2 => Ok(ReviewRating::Hard),
            3 => Ok(ReviewRating::Good),
            4 => Ok(ReviewRating::Easy),
            _ => Err(ValidationError::out_of_range("rating", 1, 4, value as i64)),
        }
    }

    /// Parses a rating from its lowercase string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "again" => Ok(ReviewRating::Again),
            "hard" => Ok(ReviewRating::Hard),
            "good" => Ok(ReviewRating::Good),
            "easy" => Ok(ReviewRating::Easy),
            other => Err(ValidationError::invalid_format(
                "rating",
                format!("unknown rating '{}'", other),
            )),
        }
    }

    /// Returns the numeric value (1-4).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewRating::Again => "again",
            ReviewRating::Hard => "hard",
            ReviewRating::Good => "good",
            ReviewRating::Easy => "easy",
        }
    }

    /// Returns true if this rating counts as a lapse.
    pub fn is_again(&self) -> bool {
        matches!(self, ReviewRating::Again)
    }

    /// Returns true if the recall succeeded (anything but Again).
    pub fn is_success(&self) -> bool {
        !self.is_again()
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_try_from_u8_accepts_valid_values() {
        assert_eq!(ReviewRating::try_from_u8(1).unwrap(), ReviewRating::Again);
        assert_eq!(ReviewRating::try_from_u8(2).unwrap(), ReviewRating::Hard);
        assert_eq!(ReviewRating::try_from_u8(3).unwrap(), ReviewRating::Good);
        assert_eq!(ReviewRating::try_from_u8(4).unwrap(), ReviewRating::Easy);
    }

    #[test]
    fn rating_try_from_u8_rejects_invalid_values() {
        assert!(ReviewRating::try_from_u8(0).is_err());
        assert!(ReviewRating::try_from_u8(5).is_err());
        assert!(ReviewRating::try_from_u8(255).is_err());
    }

    #[test]
    fn rating_parse_accepts_lowercase_names() {
        assert_eq!(ReviewRating::parse("again").unwrap(), ReviewRating::Again);
        assert_eq!(ReviewRating::parse("easy").unwrap(), ReviewRating::Easy);
    }

    #[test]
    fn rating_parse_rejects_unknown_names() {
        assert!(ReviewRating::parse("meh").is_err());
        assert!(ReviewRating::parse("Good").is_err());
    }

    #[test]
    fn rating_is_again_only_for_again() {
        assert!(ReviewRating::Again.is_again());
        assert!(!ReviewRating::Hard.is_again());
        assert!(!ReviewRating::Good.is_again());
        assert!(!ReviewRating::Easy.is_again());
    }

    #[test]
    fn rating_success_is_complement_of_again() {
        for rating in ReviewRating::ALL {
            assert_eq!(rating.is_success(), !rating.is_again());
        }
    }

    #[test]
    fn rating_ordering_works() {
        assert!(ReviewRating::Again < ReviewRating::Hard);
        assert!(ReviewRating::Hard < ReviewRating::Good);
        assert!(ReviewRating::Good < ReviewRating::Easy);
    }

    #[test]
    fn rating_serializes_lowercase() {
        let json = serde_json::to_string(&ReviewRating::Good).unwrap();
        assert_eq!(json, "\"good\"");
    }

    #[test]
    fn rating_deserializes_from_json() {
        let rating: ReviewRating = serde_json::from_str("\"again\"").unwrap();
        assert_eq!(rating, ReviewRating::Again);
    }
}
