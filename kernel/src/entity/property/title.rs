use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PropertyTitle(String);

impl PropertyTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}

impl AsRef<str> for PropertyTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PropertyTitle> for String {
    fn from(value: PropertyTitle) -> Self {
        value.0
    }
}
