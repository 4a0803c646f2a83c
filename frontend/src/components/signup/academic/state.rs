//! Local state of the academic-info step.
//!
//! The step owns no form values. Its only UI state is the autocomplete
//! visibility flag, plus the college directory it filters against.

use common::college::CollegeDirectory;
use common::signup::autocomplete::CollegeAutocomplete;

pub struct AcademicInfoStep {
    /// Whether the college suggestion dropdown is open.
    pub autocomplete: CollegeAutocomplete,

    /// Names offered by the dropdown. Starts as the built-in list and is
    /// replaced once `/api/colleges` answers.
    pub directory: CollegeDirectory,

    /// Guard to avoid fetching the directory more than once.
    pub loaded: bool,
}

impl AcademicInfoStep {
    pub fn new() -> Self {
        Self {
            autocomplete: CollegeAutocomplete::new(),
            directory: CollegeDirectory::default(),
            loaded: false,
        }
    }
}
