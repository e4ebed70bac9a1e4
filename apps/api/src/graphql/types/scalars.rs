//! Custom GraphQL scalars

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};

/// An integer-based rating from 1 (low) to 5 (high)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;

    /// Wrap a stored rating
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Numeric value
    pub fn value(self) -> u8 {
        self.0
    }
}

#[Scalar]
impl ScalarType for Rating {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::Number(n) = &value {
            return n
                .as_u64()
                .filter(|r| (u64::from(Self::MIN)..=u64::from(Self::MAX)).contains(r))
                .map(|r| Rating(r as u8))
                .ok_or_else(|| {
                    InputValueError::custom(format!(
                        "Rating must be an integer between {} and {}",
                        Self::MIN,
                        Self::MAX
                    ))
                });
        }
        Err(InputValueError::expected_type(value))
    }

    fn to_value(&self) -> Value {
        Value::Number(self.0.into())
    }
}
