mod booking;
mod dashboard;
mod payment;
mod property;
mod review;

pub use self::{booking::*, dashboard::*, payment::*, property::*, review::*};

#[cfg(test)]
pub(crate) mod mock;
