//! Plain data types of the directory. Store behaviour lives in [`crate::clinic_actor`].

pub mod clinic;
pub mod doctor;
pub mod user;

pub use clinic::*;
pub use doctor::*;
pub use user::*;
