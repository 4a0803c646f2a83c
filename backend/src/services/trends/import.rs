//! Bulk import of trend records from an uploaded CSV file.
//!
//! The upload is a `multipart/form-data` request with a `file` part ending in
//! `.csv`. The header row must only use known camelCase field names and must
//! include `skillName`. Rows are converted in parallel with rayon; the first
//! invalid row (in file order) rejects the whole import and nothing is stored.
//! Every imported record gets `dataSource = "csv:<md5 of the file>"`.

use super::store;
use crate::config::AppConfig;
use crate::errors::{ServiceError, ServiceResult};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::trend::{normalize_domain, DemandTrend, JobMarketTrend, TrendError};
use common::requests::ImportSummary;
use futures_util::StreamExt;
use log::{info, warn};
use rayon::prelude::*;
use regex::Regex;
use serde::Deserialize;

pub const KNOWN_COLUMNS: [&str; 6] = [
    "skillName",
    "domain",
    "jobPostingsCount",
    "demandTrend",
    "avgSalary",
    "popularityScore",
];

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CsvTrendRow {
    skill_name: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    job_postings_count: Option<i64>,
    #[serde(default)]
    demand_trend: Option<String>,
    #[serde(default)]
    avg_salary: Option<f64>,
    #[serde(default)]
    popularity_score: Option<f64>,
}

impl CsvTrendRow {
    fn to_trend(&self, data_source: &str) -> Result<JobMarketTrend, TrendError> {
        let demand_trend = match self.demand_trend.as_deref() {
            None | Some("") => DemandTrend::default(),
            Some(value) => DemandTrend::parse(value)
                .ok_or_else(|| TrendError::Malformed(format!("unknown demandTrend {value:?}")))?,
        };
        let mut trend = JobMarketTrend::new(self.skill_name.clone());
        trend.domain = normalize_domain(self.domain.as_deref()).map(str::to_string);
        trend.job_postings_count = self.job_postings_count.unwrap_or(0);
        trend.demand_trend = demand_trend;
        trend.avg_salary = self.avg_salary;
        trend.popularity_score = self.popularity_score;
        trend.data_source = Some(data_source.to_string());
        trend.validate()?;
        Ok(trend)
    }
}

fn validate_header(headers: &csv::StringRecord, header_re: &Regex) -> ServiceResult<()> {
    let mut has_skill = false;
    for cell in headers.iter() {
        if !header_re.is_match(cell) {
            return Err(ServiceError::Invalid(format!(
                "CSV header cell {cell:?} must be a camelCase field name"
            )));
        }
        if !KNOWN_COLUMNS.contains(&cell) {
            return Err(ServiceError::Invalid(format!("Unknown CSV column {cell:?}")));
        }
        has_skill |= cell == "skillName";
    }
    if !has_skill {
        return Err(ServiceError::Invalid("CSV must have a skillName column".to_string()));
    }
    Ok(())
}

/// Parses and validates a whole CSV payload into records ready for `store::insert_many`.
pub fn parse_trends_csv(bytes: &[u8], data_source: &str) -> ServiceResult<Vec<JobMarketTrend>> {
    let header_re = Regex::new(r"^[a-z][A-Za-z]*$")
        .map_err(|e| ServiceError::Internal(format!("Regex error: {e}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers = reader.headers()?.clone();
    validate_header(&headers, &header_re)?;

    let rows = reader
        .deserialize::<CsvTrendRow>()
        .collect::<Result<Vec<_>, csv::Error>>()?;

    // Indexed parallel iterators keep file order when collected.
    let converted: Vec<Result<JobMarketTrend, (usize, TrendError)>> = rows
        .par_iter()
        .enumerate()
        .map(|(idx, row)| row.to_trend(data_source).map_err(|e| (idx + 2, e)))
        .collect();

    converted
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|(line, e)| ServiceError::Invalid(format!("First invalid row at line {line}: {e}")))
}

/// `POST /api/trends/import`
pub async fn process(
    mut payload: Multipart,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ServiceError::Invalid(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.ends_with(".csv") {
            return Err(ServiceError::Invalid("The file must end with .csv".to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(|e| ServiceError::Invalid(e.to_string()))?);
        }
        file_bytes = Some(bytes);
    }

    let bytes = file_bytes.ok_or_else(|| ServiceError::Invalid("Missing file".to_string()))?;
    let data_source = format!("csv:{:x}", md5::compute(&bytes));

    let source = data_source.clone();
    let trends = tokio::task::spawn_blocking(move || parse_trends_csv(&bytes, &source))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?
        .inspect_err(|e| warn!("Rejected trend import {}: {}", data_source, e))?;

    let mut conn = config.open_db()?;
    let imported = store::insert_many(&mut conn, &trends, Utc::now())?;
    info!("Imported {} trend records from {}", imported, data_source);

    Ok(HttpResponse::Ok().json(ImportSummary {
        imported,
        data_source,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_defaults() {
        let csv = "skillName,domain,jobPostingsCount,demandTrend,avgSalary,popularityScore\n\
                   Rust,web,120,rising,95000,50\n\
                   Go,,,,,\n";
        let trends = parse_trends_csv(csv.as_bytes(), "csv:abc").unwrap();

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].skill_name, "Rust");
        assert_eq!(trends[0].domain.as_deref(), Some("web"));
        assert_eq!(trends[0].demand_trend, DemandTrend::Rising);
        assert_eq!(trends[0].popularity_score, Some(50.0));
        assert_eq!(trends[1].domain, None);
        assert_eq!(trends[1].job_postings_count, 0);
        assert_eq!(trends[1].demand_trend, DemandTrend::Stable);
        assert!(trends.iter().all(|t| t.data_source.as_deref() == Some("csv:abc")));
    }

    #[test]
    fn reports_first_invalid_line() {
        let csv = "skillName,demandTrend,popularityScore\n\
                   Rust,rising,50\n\
                   Go,exploding,10\n\
                   SQL,stable,101\n";
        let err = parse_trends_csv(csv.as_bytes(), "csv:abc").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("exploding"), "{message}");
    }

    #[test]
    fn non_finite_salary_rejects_whole_file() {
        let csv = "skillName,avgSalary\n\
                   Rust,90000\n\
                   Go,NaN\n";
        let err = parse_trends_csv(csv.as_bytes(), "csv:abc").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("avgSalary"), "{message}");

        let csv = "skillName,avgSalary\nRust,inf\n";
        assert!(matches!(
            parse_trends_csv(csv.as_bytes(), "csv:abc"),
            Err(ServiceError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_bad_headers() {
        for csv in [
            "domain\nweb\n",
            "skillName,salary\nRust,1\n",
            "skillName,Job Postings\nRust,1\n",
            "",
        ] {
            assert!(
                matches!(parse_trends_csv(csv.as_bytes(), "csv:x"), Err(ServiceError::Invalid(_))),
                "accepted {csv:?}"
            );
        }
    }
}
