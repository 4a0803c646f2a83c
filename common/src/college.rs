//! College directory used by the signup autocomplete.
//!
//! The frontend asks the backend for the directory (`GET /api/colleges`) and
//! falls back to `CollegeDirectory::default()` when that request fails, so both
//! sides always match with the same rule: case-insensitive substring, results
//! in directory order, no cap.

use serde::{Deserialize, Serialize};

/// Reference list shipped with the app.
pub const DEFAULT_COLLEGES: [&str; 4] = [
    "Indian Institute of Technology Bombay",
    "Indian Institute of Technology Madras",
    "National Institute of Technology Trichy",
    "Delhi Technological University",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeDirectory {
    names: Vec<String>,
}

impl Default for CollegeDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_COLLEGES.iter().map(|name| name.to_string()).collect())
    }
}

impl CollegeDirectory {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every name whose lowercase form contains the lowercase `query`.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_reports_empty() {
        assert!(CollegeDirectory::new(Vec::new()).is_empty());
        assert!(!CollegeDirectory::default().is_empty());
    }

    #[test]
    fn delhi_matches_only_dtu() {
        let directory = CollegeDirectory::default();
        assert_eq!(directory.suggest("Delhi"), vec!["Delhi Technological University"]);
    }

    #[test]
    fn institute_matches_iits_and_nit_in_order() {
        let directory = CollegeDirectory::default();
        assert_eq!(
            directory.suggest("institute"),
            vec![
                "Indian Institute of Technology Bombay",
                "Indian Institute of Technology Madras",
                "National Institute of Technology Trichy",
            ]
        );
    }

    #[test]
    fn empty_query_matches_everything() {
        let directory = CollegeDirectory::default();
        assert_eq!(directory.suggest("").len(), DEFAULT_COLLEGES.len());
    }

    #[test]
    fn custom_directory_keeps_its_own_order() {
        let directory = CollegeDirectory::new(vec![
            "Zeta College".to_string(),
            "Alpha College".to_string(),
        ]);
        assert_eq!(directory.suggest("COLLEGE"), vec!["Zeta College", "Alpha College"]);
        assert!(directory.suggest("beta").is_empty());
    }
}
