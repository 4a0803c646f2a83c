//! Parent flow controller for the signup flow.
//!
//! Owns the `AcademicForm` across stages so leaving the academic step (either
//! way) never loses what the student typed.

use crate::components::signup::academic::AcademicInfoStep;
use common::signup::form::AcademicForm;
use gloo_console::log;
use yew::{html, Component, Context, Html};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Welcome,
    Academic,
    Review,
}

pub enum Msg {
    Goto(Stage),
    FormChanged(AcademicForm),
}

pub struct App {
    stage: Stage,
    form: AcademicForm,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stage: Stage::Welcome,
            form: AcademicForm::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Goto(stage) => {
                log!(format!("signup stage {:?} -> {:?}", self.stage, stage));
                self.stage = stage;
                true
            }
            Msg::FormChanged(form) => {
                if self.form == form {
                    return false;
                }
                self.form = form;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <main class="signup-root">
                {
                    match self.stage {
                        Stage::Welcome => html! {
                            <section class="signup-step">
                                <h2>{"Student signup"}</h2>
                                <p>{"Tell us about your studies to get matched with in-demand skills."}</p>
                                <button class="btn primary" onclick={link.callback(|_| Msg::Goto(Stage::Academic))}>
                                    {"Start"}
                                </button>
                            </section>
                        },
                        Stage::Academic => html! {
                            <AcademicInfoStep
                                form={self.form.clone()}
                                on_change={link.callback(Msg::FormChanged)}
                                on_next={link.callback(|_| Msg::Goto(Stage::Review))}
                                on_back={link.callback(|_| Msg::Goto(Stage::Welcome))}
                            />
                        },
                        Stage::Review => self.review(ctx),
                    }
                }
            </main>
        }
    }
}

impl App {
    fn review(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let summary = match self.form.validate() {
            Ok(record) => html! {
                <dl class="summary">
                    <dt>{"College"}</dt><dd>{ record.college }</dd>
                    <dt>{"Roll number"}</dt><dd>{ record.roll_number }</dd>
                    <dt>{"Department"}</dt><dd>{ record.department.label() }</dd>
                    <dt>{"Graduation year"}</dt><dd>{ record.graduation_year.label() }</dd>
                    <dt>{"CGPA"}</dt><dd>{ format!("{:.2}", record.cgpa) }</dd>
                    <dt>{"Degree"}</dt><dd>{ record.degree.label() }</dd>
                </dl>
            },
            Err(field) => html! { <p>{ format!("Missing {field}") }</p> },
        };

        html! {
            <section class="signup-step">
                <h2>{"Review"}</h2>
                { summary }
                <div class="step-actions">
                    <button class="btn secondary" onclick={link.callback(|_| Msg::Goto(Stage::Academic))}>
                        {"Back"}
                    </button>
                </div>
            </section>
        }
    }
}
