//! College autocomplete state.
//!
//! The only piece of local UI state the academic step owns is whether the
//! suggestion dropdown is open. Lengths are measured in UTF-16 code units so a
//! value behaves the same as `HTMLInputElement.value.length` in the browser.

use crate::college::CollegeDirectory;
use crate::signup::form::{AcademicEdit, AcademicForm};

/// Inputs longer than this many UTF-16 code units open the dropdown.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollegeAutocomplete {
    suggestions_visible: bool,
}

impl CollegeAutocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.suggestions_visible
    }

    /// Keystroke in the college field. `text` is the field's new value.
    pub fn on_input(&mut self, text: &str) {
        self.suggestions_visible = qualifies(text);
    }

    /// Focus of the college field. Restores the dropdown without retyping.
    pub fn on_focus(&mut self, current: &str) {
        self.suggestions_visible = qualifies(current);
    }

    /// A suggestion was picked; the dropdown closes until the next qualifying input or focus.
    pub fn on_select(&mut self) {
        self.suggestions_visible = false;
    }

    /// Keystroke that also yields the replacement form holding `text` as the college.
    pub fn type_college(&mut self, form: &AcademicForm, text: String) -> AcademicForm {
        self.on_input(&text);
        form.with_edit(AcademicEdit::College(text))
    }

    /// Picks `name` from the dropdown: the college becomes that exact string and
    /// the dropdown closes.
    pub fn select_college(&mut self, form: &AcademicForm, name: &str) -> AcademicForm {
        self.on_select();
        form.with_edit(AcademicEdit::College(name.to_string()))
    }

    /// Entries to render for `query`, or nothing while the dropdown is closed.
    pub fn suggestions<'a>(&self, directory: &'a CollegeDirectory, query: &str) -> Vec<&'a str> {
        if self.suggestions_visible {
            directory.suggest(query)
        } else {
            Vec::new()
        }
    }
}

pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn qualifies(text: &str) -> bool {
    utf16_len(text) > MIN_QUERY_LEN
}
