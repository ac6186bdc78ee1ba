use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelledBy {
    Guest,
    Host,
}

impl CancelledBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelledBy::Guest => "guest",
            CancelledBy::Host => "host",
        }
    }
}

impl FromStr for CancelledBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(CancelledBy::Guest),
            "host" => Ok(CancelledBy::Host),
            other => Err(format!("unknown cancelling party: {other}")),
        }
    }
}

/// Who cancelled, why, and when. Populated only once a booking is
/// cancelled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    cancelled_by: CancelledBy,
    reason: Option<String>,
    cancelled_at: OffsetDateTime,
}

impl Cancellation {
    pub fn new(
        cancelled_by: CancelledBy,
        reason: Option<String>,
        cancelled_at: OffsetDateTime,
    ) -> Self {
        Self {
            cancelled_by,
            reason,
            cancelled_at,
        }
    }

    pub fn cancelled_by(&self) -> &CancelledBy {
        &self.cancelled_by
    }

    pub fn reason(&self) -> Option<&String> {
        self.reason.as_ref()
    }

    pub fn cancelled_at(&self) -> &OffsetDateTime {
        &self.cancelled_at
    }
}
