//! Form data for the academic-info signup step.
//!
//! `AcademicForm` is owned by the parent flow controller and handed down to the
//! step on every render. The step never mutates it in place: each edit goes
//! through `AcademicForm::with_edit`, which returns the full replacement value
//! that the parent then stores.
//!
//! Closed-choice fields (`Department`, `GraduationYear`, `Degree`) are sum types
//! so an out-of-range value cannot be represented. They serialize as their
//! display label, which is also what the `<select>` / toggle controls carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Academic departments offered in the department `<select>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Electronics & Communication")]
    ElectronicsCommunication,
    #[serde(rename = "Electrical")]
    Electrical,
    #[serde(rename = "Mechanical")]
    Mechanical,
    #[serde(rename = "Civil")]
    Civil,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::ComputerScience,
        Department::InformationTechnology,
        Department::ElectronicsCommunication,
        Department::Electrical,
        Department::Mechanical,
        Department::Civil,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Department::ComputerScience => "Computer Science",
            Department::InformationTechnology => "Information Technology",
            Department::ElectronicsCommunication => "Electronics & Communication",
            Department::Electrical => "Electrical",
            Department::Mechanical => "Mechanical",
            Department::Civil => "Civil",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// Graduation years accepted by the year `<select>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraduationYear {
    #[serde(rename = "2024")]
    Y2024,
    #[serde(rename = "2025")]
    Y2025,
    #[serde(rename = "2026")]
    Y2026,
    #[serde(rename = "2027")]
    Y2027,
    #[serde(rename = "2028")]
    Y2028,
}

impl GraduationYear {
    pub const ALL: [GraduationYear; 5] = [
        GraduationYear::Y2024,
        GraduationYear::Y2025,
        GraduationYear::Y2026,
        GraduationYear::Y2027,
        GraduationYear::Y2028,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GraduationYear::Y2024 => "2024",
            GraduationYear::Y2025 => "2025",
            GraduationYear::Y2026 => "2026",
            GraduationYear::Y2027 => "2027",
            GraduationYear::Y2028 => "2028",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|y| y.label() == label)
    }
}

/// Degree programmes, rendered as a toggle-button grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "B.E.")]
    BE,
    #[serde(rename = "M.Tech")]
    MTech,
    #[serde(rename = "MCA")]
    Mca,
}

impl Degree {
    pub const ALL: [Degree; 4] = [Degree::BTech, Degree::BE, Degree::MTech, Degree::Mca];

    pub fn label(self) -> &'static str {
        match self {
            Degree::BTech => "B.Tech",
            Degree::BE => "B.E.",
            Degree::MTech => "M.Tech",
            Degree::Mca => "MCA",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// The six required fields, in the order the browser checks them on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcademicField {
    College,
    RollNumber,
    Department,
    GraduationYear,
    Cgpa,
    Degree,
}

impl AcademicField {
    /// DOM id of the control that receives focus when this field blocks submission.
    pub fn element_id(self) -> &'static str {
        match self {
            AcademicField::College => "signup-college",
            AcademicField::RollNumber => "signup-roll-number",
            AcademicField::Department => "signup-department",
            AcademicField::GraduationYear => "signup-graduation-year",
            AcademicField::Cgpa => "signup-cgpa",
            AcademicField::Degree => "signup-degree",
        }
    }
}

impl fmt::Display for AcademicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AcademicField::College => "college",
            AcademicField::RollNumber => "rollNumber",
            AcademicField::Department => "department",
            AcademicField::GraduationYear => "graduationYear",
            AcademicField::Cgpa => "cgpa",
            AcademicField::Degree => "degree",
        };
        write!(f, "{name}")
    }
}

/// A single user edit, as reported by one of the step's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum AcademicEdit {
    College(String),
    RollNumber(String),
    Department(Department),
    GraduationYear(GraduationYear),
    Cgpa(String),
    Degree(Degree),
}

/// Shared form state for the academic step, as the parent flow stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicForm {
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub graduation_year: Option<GraduationYear>,
    /// Raw text of the CGPA input. Checked against `parse_cgpa` on submit.
    #[serde(default)]
    pub cgpa: String,
    #[serde(default)]
    pub degree: Option<Degree>,
}

/// A fully populated academic form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub college: String,
    pub roll_number: String,
    pub department: Department,
    pub graduation_year: GraduationYear,
    pub cgpa: f64,
    pub degree: Degree,
}

impl AcademicForm {
    /// Returns the replacement form produced by applying `edit`.
    pub fn with_edit(&self, edit: AcademicEdit) -> AcademicForm {
        let mut next = self.clone();
        match edit {
            AcademicEdit::College(value) => next.college = value,
            AcademicEdit::RollNumber(value) => next.roll_number = value,
            AcademicEdit::Department(value) => next.department = Some(value),
            AcademicEdit::GraduationYear(value) => next.graduation_year = Some(value),
            AcademicEdit::Cgpa(value) => next.cgpa = value,
            AcademicEdit::Degree(value) => next.degree = Some(value),
        }
        next
    }

    /// First field, in browser check order, that would block submission.
    pub fn first_invalid(&self) -> Option<AcademicField> {
        self.validate().err()
    }

    /// Checks the fields in the order the browser does and builds the typed record.
    ///
    /// Text fields only need to be non-empty, like an HTML `required` input.
    pub fn validate(&self) -> Result<AcademicRecord, AcademicField> {
        if self.college.is_empty() {
            return Err(AcademicField::College);
        }
        if self.roll_number.is_empty() {
            return Err(AcademicField::RollNumber);
        }
        let Some(department) = self.department else {
            return Err(AcademicField::Department);
        };
        let Some(graduation_year) = self.graduation_year else {
            return Err(AcademicField::GraduationYear);
        };
        let Some(cgpa) = parse_cgpa(&self.cgpa) else {
            return Err(AcademicField::Cgpa);
        };
        let Some(degree) = self.degree else {
            return Err(AcademicField::Degree);
        };
        Ok(AcademicRecord {
            college: self.college.clone(),
            roll_number: self.roll_number.clone(),
            department,
            graduation_year,
            cgpa,
            degree,
        })
    }
}

/// Parses a CGPA as the number input constrains it: `min=0 max=10 step=0.01`.
pub fn parse_cgpa(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !(0.0..=10.0).contains(&value) {
        return None;
    }
    let hundredths = value * 100.0;
    if (hundredths - hundredths.round()).abs() > 1e-6 {
        return None;
    }
    Some(value)
}
