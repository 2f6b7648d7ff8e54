use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidId(String),
    InvalidRating(f32),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidId(raw) => {
                write!(f, "invalid movie id: {raw:?}")
            }
            ModelError::InvalidRating(rating) => write!(
                f,
                "invalid user rating {rating}: expected a value between {} and {}",
                crate::watch::MIN_USER_RATING,
                crate::watch::MAX_USER_RATING
            ),
        }
    }
}

impl std::error::Error for ModelError {}
