//! View rendering for the academic-info step.
//!
//! Every control is controlled: its displayed value always comes from the
//! `form` prop. Text inputs carry `required` so the browser blocks an
//! incomplete submit on its own; the degree grid has no native control, so
//! `update` repeats the check before calling `on_next`.

use common::signup::form::{AcademicEdit, AcademicField, Degree, Department, GraduationYear};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::AcademicInfoStep;
use crate::option_grid::OptionGrid;

pub fn view(component: &AcademicInfoStep, ctx: &Context<AcademicInfoStep>) -> Html {
    let link = ctx.link();

    html! {
        <form
            class="signup-step"
            onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit
            })}
        >
            <h2>{"Academic information"}</h2>
            { build_college_field(component, ctx) }
            { build_roll_number_field(ctx) }
            { build_department_field(ctx) }
            { build_graduation_year_field(ctx) }
            { build_cgpa_field(ctx) }
            { build_degree_grid(ctx) }
            <div class="step-actions">
                <button type="button" class="btn secondary" onclick={link.callback(|_| Msg::Back)}>
                    {"Back"}
                </button>
                <button type="submit" class="btn primary">{"Next"}</button>
            </div>
        </form>
    }
}

/// College input with its suggestion dropdown and the "request to add" link.
fn build_college_field(component: &AcademicInfoStep, ctx: &Context<AcademicInfoStep>) -> Html {
    let link = ctx.link();
    let college = &ctx.props().form.college;
    let suggestions = component.autocomplete.suggestions(&component.directory, college);

    html! {
        <div class="field college-field">
            <label for={AcademicField::College.element_id()}>{"College"}</label>
            <input
                id={AcademicField::College.element_id()}
                type="text"
                required=true
                autocomplete="off"
                placeholder="Start typing your college name"
                value={college.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::CollegeInput(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
                onfocus={link.callback(|_: FocusEvent| Msg::CollegeFocus)}
            />
            {
                if component.autocomplete.is_visible() {
                    html! {
                        <ul class="suggestions" role="listbox">
                            { for suggestions.into_iter().map(|name| suggestion_item(link, name)) }
                        </ul>
                    }
                } else {
                    html! {}
                }
            }
            <a
                class="request-college"
                href="#"
                onclick={Callback::from(|e: MouseEvent| e.prevent_default())}
            >
                {"Can't find your college? Request to add it"}
            </a>
        </div>
    }
}

fn suggestion_item(link: &Scope<AcademicInfoStep>, name: &str) -> Html {
    let selected = name.to_string();
    html! {
        <li
            class="suggestion"
            role="option"
            onclick={link.callback(move |_| Msg::SelectCollege(selected.clone()))}
        >
            { name.to_string() }
        </li>
    }
}

fn build_roll_number_field(ctx: &Context<AcademicInfoStep>) -> Html {
    html! {
        <div class="field">
            <label for={AcademicField::RollNumber.element_id()}>{"Roll number"}</label>
            <input
                id={AcademicField::RollNumber.element_id()}
                type="text"
                required=true
                value={ctx.props().form.roll_number.clone()}
                oninput={ctx.link().callback(|e: InputEvent| {
                    let value = e.target_unchecked_into::<HtmlInputElement>().value();
                    Msg::Edit(AcademicEdit::RollNumber(value))
                })}
            />
        </div>
    }
}

fn build_department_field(ctx: &Context<AcademicInfoStep>) -> Html {
    let current = ctx.props().form.department;
    html! {
        <div class="field">
            <label for={AcademicField::Department.element_id()}>{"Department"}</label>
            <select
                id={AcademicField::Department.element_id()}
                required=true
                onchange={ctx.link().batch_callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    Department::from_label(&value).map(|d| Msg::Edit(AcademicEdit::Department(d)))
                })}
            >
                <option value="" disabled=true selected={current.is_none()}>{"Select department"}</option>
                { for Department::ALL.into_iter().map(|d| html! {
                    <option value={d.label()} selected={current == Some(d)}>{ d.label() }</option>
                }) }
            </select>
        </div>
    }
}

fn build_graduation_year_field(ctx: &Context<AcademicInfoStep>) -> Html {
    let current = ctx.props().form.graduation_year;
    html! {
        <div class="field">
            <label for={AcademicField::GraduationYear.element_id()}>{"Graduation year"}</label>
            <select
                id={AcademicField::GraduationYear.element_id()}
                required=true
                onchange={ctx.link().batch_callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    GraduationYear::from_label(&value).map(|y| Msg::Edit(AcademicEdit::GraduationYear(y)))
                })}
            >
                <option value="" disabled=true selected={current.is_none()}>{"Select year"}</option>
                { for GraduationYear::ALL.into_iter().map(|y| html! {
                    <option value={y.label()} selected={current == Some(y)}>{ y.label() }</option>
                }) }
            </select>
        </div>
    }
}

fn build_cgpa_field(ctx: &Context<AcademicInfoStep>) -> Html {
    html! {
        <div class="field">
            <label for={AcademicField::Cgpa.element_id()}>{"CGPA"}</label>
            <input
                id={AcademicField::Cgpa.element_id()}
                type="number"
                required=true
                min="0"
                max="10"
                step="0.01"
                value={ctx.props().form.cgpa.clone()}
                oninput={ctx.link().callback(|e: InputEvent| {
                    let value = e.target_unchecked_into::<HtmlInputElement>().value();
                    Msg::Edit(AcademicEdit::Cgpa(value))
                })}
            />
        </div>
    }
}

/// Degree toggle grid. The selected button carries the `selected` class.
fn build_degree_grid(ctx: &Context<AcademicInfoStep>) -> Html {
    let current = ctx.props().form.degree;
    let link = ctx.link();

    html! {
        <div class="field">
            <span class="field-label">{"Degree"}</span>
            <OptionGrid columns={2} label={AttrValue::from("Degree")}>
                { for Degree::ALL.into_iter().enumerate().map(|(idx, degree)| {
                    let selected = current == Some(degree);
                    // The first button is the focus target when no degree is picked.
                    let id = (idx == 0).then(|| AcademicField::Degree.element_id());
                    html! {
                        <button
                            id={id}
                            type="button"
                            class={classes!("toggle-btn", selected.then_some("selected"))}
                            aria-pressed={selected.to_string()}
                            onclick={link.callback(move |_| Msg::Edit(AcademicEdit::Degree(degree)))}
                        >
                            { degree.label() }
                        </button>
                    }
                }) }
            </OptionGrid>
        </div>
    }
}
