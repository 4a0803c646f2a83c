//! Academic-info step of the student signup flow.
//!
//! - `form`: the form data owned by the parent flow and its closed-set choices.
//! - `autocomplete`: the college suggestion dropdown state machine.
//! - `step`: submit/back gating against a `StepNavigator`.

pub mod autocomplete;
pub mod form;
pub mod step;
