mod booking;
mod dashboard;
mod property;
mod review;

pub use self::{booking::*, dashboard::*, property::*, review::*};
