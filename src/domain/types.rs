//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers,
//! non-negative counts, finite amounts) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided count is negative.
    #[error("count cannot be negative")]
    NegativeCount,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");

/// Number of dependents declared by a client.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildrenCount(i32);

impl ChildrenCount {
    /// Wraps the count, rejecting negative values.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value < 0 {
            return Err(TypeConstraintError::NegativeCount);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ChildrenCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ChildrenCount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChildrenCount> for i32 {
    fn from(value: ChildrenCount) -> Self {
        value.0
    }
}

/// Rejects NaN and infinite monetary amounts.
pub fn ensure_finite_income(value: f64) -> Result<f64, TypeConstraintError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TypeConstraintError::InvalidValue(format!(
            "income must be a finite number, got {value}"
        )))
    }
}
