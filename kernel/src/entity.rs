mod booking;
mod common;
mod property;
mod review;
mod user;

pub use self::{booking::*, common::*, property::*, review::*, user::*};
