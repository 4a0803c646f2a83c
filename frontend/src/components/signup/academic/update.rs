//! Update function for the academic-info step.
//!
//! Elm-style: receives the step state, the `Context` and a `Msg`, applies the
//! change and returns whether the view should re-render. Form edits are not
//! stored here; they are emitted to the parent as replacement values and come
//! back as new props.

use common::college::CollegeDirectory;
use common::signup::step::{self, StepNavigator};
use gloo_console::{log, warn};
use yew::prelude::*;

use super::helpers::focus_element;
use super::messages::Msg;
use super::props::AcademicInfoProps;
use super::state::AcademicInfoStep;

/// Routes step navigation to the parent's callbacks.
struct PropsNavigator<'a>(&'a AcademicInfoProps);

impl StepNavigator for PropsNavigator<'_> {
    fn next(&self) {
        self.0.on_next.emit(());
    }

    fn back(&self) {
        self.0.on_back.emit(());
    }
}

pub fn update(component: &mut AcademicInfoStep, ctx: &Context<AcademicInfoStep>, msg: Msg) -> bool {
    let props = ctx.props();
    match msg {
        Msg::CollegeInput(text) => {
            props
                .on_change
                .emit(component.autocomplete.type_college(&props.form, text));
            true
        }
        Msg::CollegeFocus => {
            let was_visible = component.autocomplete.is_visible();
            component.autocomplete.on_focus(&props.form.college);
            was_visible != component.autocomplete.is_visible()
        }
        Msg::SelectCollege(name) => {
            props
                .on_change
                .emit(component.autocomplete.select_college(&props.form, &name));
            true
        }
        Msg::Edit(edit) => {
            props.on_change.emit(props.form.with_edit(edit));
            false
        }
        Msg::Submit => {
            if let Err(field) = step::submit(&props.form, &PropsNavigator(props)) {
                log!(format!("academic step blocked on {field}"));
                focus_element(field.element_id());
            }
            false
        }
        Msg::Back => {
            step::back(&PropsNavigator(props));
            false
        }
        Msg::DirectoryLoaded(names) => {
            let directory = CollegeDirectory::new(names);
            if directory.is_empty() {
                warn!("college directory is empty, keeping built-in list");
                return false;
            }
            component.directory = directory;
            true
        }
    }
}
