use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PropertyId(Uuid);

impl PropertyId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl AsRef<Uuid> for PropertyId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<PropertyId> for Uuid {
    fn from(value: PropertyId) -> Self {
        value.0
    }
}
