use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of demand for a skill. Any other value is rejected when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Rising,
    #[default]
    Stable,
    Declining,
}

impl DemandTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            DemandTrend::Rising => "rising",
            DemandTrend::Stable => "stable",
            DemandTrend::Declining => "declining",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rising" => Some(DemandTrend::Rising),
            "stable" => Some(DemandTrend::Stable),
            "declining" => Some(DemandTrend::Declining),
            _ => None,
        }
    }
}

/// One monthly bucket of a trend's history, e.g. `month = "2024-01"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    #[serde(default)]
    pub postings: i64,
    #[serde(default)]
    pub avg_salary: Option<f64>,
}

/// Aggregated job-market demand for one skill, optionally scoped to a domain.
///
/// Records are looked up by the `(skill_name, domain)` pair, which is indexed
/// but not unique. `trend_data` is append-only and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMarketTrend {
    /// Assigned by the store on insert.
    #[serde(default)]
    pub id: String,
    pub skill_name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub job_postings_count: i64,
    #[serde(default)]
    pub demand_trend: DemandTrend,
    #[serde(default)]
    pub avg_salary: Option<f64>,
    /// Bounded to `[0, 100]`.
    #[serde(default)]
    pub popularity_score: Option<f64>,
    #[serde(default)]
    pub trend_data: Vec<TrendPoint>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub last_scraped: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

pub const POPULARITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// A blank domain is the same as no domain.
pub fn normalize_domain(domain: Option<&str>) -> Option<&str> {
    domain.filter(|d| !d.trim().is_empty())
}

fn check_salary(salary: Option<f64>) -> Result<(), TrendError> {
    match salary {
        Some(value) if !value.is_finite() => Err(TrendError::NonFiniteSalary(value)),
        _ => Ok(()),
    }
}

impl TrendPoint {
    pub fn validate(&self) -> Result<(), TrendError> {
        check_salary(self.avg_salary)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    BlankSkillName,
    NegativePostings(i64),
    PopularityOutOfRange(f64),
    NonFiniteSalary(f64),
    Malformed(String),
}

impl fmt::Display for TrendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendError::BlankSkillName => write!(f, "skillName is required"),
            TrendError::NegativePostings(n) => {
                write!(f, "jobPostingsCount must be >= 0, got {n}")
            }
            TrendError::PopularityOutOfRange(score) => {
                write!(f, "popularityScore must be within [0, 100], got {score}")
            }
            TrendError::NonFiniteSalary(salary) => {
                write!(f, "avgSalary must be a finite number, got {salary}")
            }
            TrendError::Malformed(msg) => write!(f, "malformed trend record: {msg}"),
        }
    }
}

impl std::error::Error for TrendError {}

impl From<serde_json::Error> for TrendError {
    fn from(err: serde_json::Error) -> Self {
        TrendError::Malformed(err.to_string())
    }
}

impl JobMarketTrend {
    pub fn new(skill_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            skill_name: skill_name.into(),
            domain: None,
            job_postings_count: 0,
            demand_trend: DemandTrend::default(),
            avg_salary: None,
            popularity_score: None,
            trend_data: Vec::new(),
            data_source: None,
            last_scraped: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Decodes a JSON record and applies `validate`.
    pub fn from_json(json: &str) -> Result<Self, TrendError> {
        let trend: JobMarketTrend = serde_json::from_str(json)?;
        trend.validate()?;
        Ok(trend)
    }

    /// Write-time constraints. Enum membership is enforced by the type itself.
    pub fn validate(&self) -> Result<(), TrendError> {
        if self.skill_name.trim().is_empty() {
            return Err(TrendError::BlankSkillName);
        }
        if self.job_postings_count < 0 {
            return Err(TrendError::NegativePostings(self.job_postings_count));
        }
        if let Some(score) = self.popularity_score {
            if !POPULARITY_RANGE.contains(&score) {
                return Err(TrendError::PopularityOutOfRange(score));
            }
        }
        check_salary(self.avg_salary)?;
        self.trend_data.iter().try_for_each(TrendPoint::validate)
    }
}
