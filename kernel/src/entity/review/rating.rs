use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

/// Overall rating, 1 through 5 inclusive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rating(i16);

impl Rating {
    pub fn try_new(value: i16) -> error_stack::Result<Self, KernelError> {
        if !(1..=5).contains(&value) {
            return Err(Report::new(KernelError::validation(
                "Rating must be between 1 and 5",
            )));
        }
        Ok(Self(value))
    }
}

impl AsRef<i16> for Rating {
    fn as_ref(&self) -> &i16 {
        &self.0
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds() {
        assert!(Rating::try_new(0).is_err());
        assert!(Rating::try_new(1).is_ok());
        assert!(Rating::try_new(5).is_ok());
        assert!(Rating::try_new(6).is_err());
    }
}
