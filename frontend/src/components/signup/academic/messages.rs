use common::signup::form::AcademicEdit;

#[derive(Clone)]
pub enum Msg {
    CollegeInput(String),
    CollegeFocus,
    SelectCollege(String),
    Edit(AcademicEdit),
    Submit,
    Back,
    DirectoryLoaded(Vec<String>),
}
