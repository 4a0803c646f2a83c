//! Submit/back gating for the academic step.
//!
//! The parent flow controller is represented by a `StepNavigator`; the Yew
//! component implements it over its `on_next` / `on_back` callbacks.

use super::form::{AcademicField, AcademicForm};

pub trait StepNavigator {
    fn next(&self);
    fn back(&self);
}

/// Calls `navigator.next()` exactly once when every required field is valid.
///
/// On failure nothing is called and the first blocking field is returned so the
/// caller can focus it.
pub fn submit<N: StepNavigator + ?Sized>(form: &AcademicForm, navigator: &N) -> Result<(), AcademicField> {
    match form.first_invalid() {
        Some(field) => Err(field),
        None => {
            navigator.next();
            Ok(())
        }
    }
}

/// Back is never gated and never touches the form.
pub fn back<N: StepNavigator + ?Sized>(navigator: &N) {
    navigator.back();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::form::{AcademicEdit, Degree, Department, GraduationYear};
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        next: Cell<u32>,
        back: Cell<u32>,
    }

    impl StepNavigator for Recorder {
        fn next(&self) {
            self.next.set(self.next.get() + 1);
        }

        fn back(&self) {
            self.back.set(self.back.get() + 1);
        }
    }

    fn complete_form() -> AcademicForm {
        AcademicForm::default()
            .with_edit(AcademicEdit::College("National Institute of Technology Trichy".into()))
            .with_edit(AcademicEdit::RollNumber("106121001".into()))
            .with_edit(AcademicEdit::Department(Department::Mechanical))
            .with_edit(AcademicEdit::GraduationYear(GraduationYear::Y2025))
            .with_edit(AcademicEdit::Cgpa("7.4".into()))
            .with_edit(AcademicEdit::Degree(Degree::BE))
    }

    #[test]
    fn complete_form_advances_exactly_once() {
        let recorder = Recorder::default();
        assert_eq!(submit(&complete_form(), &recorder), Ok(()));
        assert_eq!(recorder.next.get(), 1);
        assert_eq!(recorder.back.get(), 0);
    }

    #[test]
    fn any_missing_field_blocks_next() {
        let full = complete_form();
        let mut variants = Vec::new();
        let mut form = full.clone();
        form.college.clear();
        variants.push((form, AcademicField::College));
        let mut form = full.clone();
        form.roll_number.clear();
        variants.push((form, AcademicField::RollNumber));
        let mut form = full.clone();
        form.department = None;
        variants.push((form, AcademicField::Department));
        let mut form = full.clone();
        form.graduation_year = None;
        variants.push((form, AcademicField::GraduationYear));
        let mut form = full.clone();
        form.cgpa.clear();
        variants.push((form, AcademicField::Cgpa));
        let mut form = full;
        form.degree = None;
        variants.push((form, AcademicField::Degree));

        let recorder = Recorder::default();
        for (form, expected) in variants {
            assert_eq!(submit(&form, &recorder), Err(expected));
        }
        assert_eq!(recorder.next.get(), 0);
    }

    #[test]
    fn back_is_unconditional_and_keeps_form() {
        let recorder = Recorder::default();
        let empty = AcademicForm::default();
        let snapshot = empty.clone();

        back(&recorder);
        assert_eq!(recorder.back.get(), 1);
        assert_eq!(recorder.next.get(), 0);
        assert_eq!(empty, snapshot);
    }
}
