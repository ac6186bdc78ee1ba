mod booking;
mod property;
mod review;

pub use self::{booking::*, property::*, review::*};
