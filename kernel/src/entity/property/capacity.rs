use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MaxGuests(i32);

impl MaxGuests {
    pub fn new(value: impl Into<i32>) -> Self {
        Self(value.into())
    }
}

impl AsRef<i32> for MaxGuests {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl From<MaxGuests> for i32 {
    fn from(value: MaxGuests) -> Self {
        value.0
    }
}
