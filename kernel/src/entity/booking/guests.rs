use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

/// Who is staying. Adults plus children may not exceed the total; infants
/// and pets are carried for the host but do not count toward capacity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GuestBreakdown {
    total: i32,
    adults: i32,
    children: i32,
    infants: i32,
    pets: i32,
}

impl GuestBreakdown {
    pub fn new(
        total: i32,
        adults: i32,
        children: i32,
        infants: i32,
        pets: i32,
    ) -> error_stack::Result<Self, KernelError> {
        if total < 1 {
            return Err(Report::new(KernelError::validation(
                "At least one guest is required",
            )));
        }
        if adults < 0 || children < 0 || infants < 0 || pets < 0 {
            return Err(Report::new(KernelError::validation(
                "Guest counts cannot be negative",
            )));
        }
        if adults + children > total {
            return Err(Report::new(KernelError::validation(
                "Adults and children cannot exceed total guests",
            )));
        }
        Ok(Self {
            total,
            adults,
            children,
            infants,
            pets,
        })
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn adults(&self) -> i32 {
        self.adults
    }

    pub fn children(&self) -> i32 {
        self.children
    }

    pub fn infants(&self) -> i32 {
        self.infants
    }

    pub fn pets(&self) -> i32 {
        self.pets
    }
}
