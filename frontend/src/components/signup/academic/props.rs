//! Defines the properties for the `AcademicInfoStep`.
//!
//! The form value itself lives in the parent flow controller. The step reads it
//! from `form` and reports every edit through `on_change` as a complete
//! replacement value, never a partial patch.

use common::signup::form::AcademicForm;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AcademicInfoProps {
    /// Current values, re-supplied by the parent after every `on_change`.
    pub form: AcademicForm,

    /// Receives the whole replacement form after an edit.
    pub on_change: Callback<AcademicForm>,

    /// Fired once per successful submit, only when every required field is valid.
    pub on_next: Callback<()>,

    /// Fired on every press of the back button, whatever the form holds.
    pub on_back: Callback<()>,
}
