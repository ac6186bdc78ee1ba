use std::borrow::Cow;
use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    InvalidDateRange,
    CapacityExceeded(i32),
    PropertyUnavailable,
    NotFound(&'static str),
    Validation(Cow<'static, str>),
    SignatureInvalid,
    RateLimited,
    Timeout,
    Upstream,
    Internal,
}

impl KernelError {
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        KernelError::Validation(message.into())
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidDateRange => write!(f, "Invalid date range"),
            KernelError::CapacityExceeded(max) => write!(f, "Maximum {max} guests allowed"),
            KernelError::PropertyUnavailable => {
                write!(f, "Property is not available for selected dates")
            }
            KernelError::NotFound(kind) => write!(f, "{kind} not found"),
            KernelError::Validation(message) => write!(f, "{message}"),
            KernelError::SignatureInvalid => write!(f, "Invalid signature"),
            KernelError::RateLimited => {
                write!(f, "Too many requests. Please wait a moment before refreshing.")
            }
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Upstream => write!(f, "Upstream call failed"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
