//! Types and behaviour shared by the `frontend` (Yew) and `backend` (actix) crates.
//!
//! Everything in here is target independent so it can be unit tested natively.

pub mod college;
pub mod model;
pub mod requests;
pub mod signup;
