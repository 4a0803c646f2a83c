//! SQLite persistence for `JobMarketTrend` records.
//!
//! Two tables back a record:
//! - `job_market_trends`: scalar fields, with a non-unique index on
//!   `(skill_name, domain)` for lookups.
//! - `trend_points`: the append-only history, ordered by `seq`.
//!
//! The CHECK constraints repeat the write-time rules of
//! `JobMarketTrend::validate` so rows written by other tools obey them too.

use crate::errors::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use common::model::trend::{normalize_domain, DemandTrend, JobMarketTrend, TrendError, TrendPoint};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS job_market_trends (
        id                 TEXT PRIMARY KEY,
        skill_name         TEXT NOT NULL,
        domain             TEXT,
        job_postings_count INTEGER NOT NULL DEFAULT 0 CHECK (job_postings_count >= 0),
        demand_trend       TEXT NOT NULL DEFAULT 'stable'
                           CHECK (demand_trend IN ('rising', 'stable', 'declining')),
        avg_salary         REAL,
        popularity_score   REAL CHECK (popularity_score IS NULL OR popularity_score BETWEEN 0 AND 100),
        data_source        TEXT,
        last_scraped       TEXT,
        created_at         TEXT NOT NULL,
        updated_at         TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_trends_skill_domain
        ON job_market_trends (skill_name, domain);
    CREATE TABLE IF NOT EXISTS trend_points (
        trend_id   TEXT NOT NULL REFERENCES job_market_trends (id) ON DELETE CASCADE,
        seq        INTEGER NOT NULL,
        month      TEXT NOT NULL,
        postings   INTEGER NOT NULL DEFAULT 0,
        avg_salary REAL,
        PRIMARY KEY (trend_id, seq)
    );
";

const SELECT_TREND: &str = "SELECT id, skill_name, domain, job_postings_count, demand_trend, \
    avg_salary, popularity_score, data_source, last_scraped, created_at, updated_at \
    FROM job_market_trends";

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

fn map_trend(row: &Row) -> rusqlite::Result<JobMarketTrend> {
    let demand: String = row.get(4)?;
    let demand_trend = DemandTrend::parse(&demand).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(TrendError::Malformed(format!("unknown demand trend {demand:?}"))),
        )
    })?;
    Ok(JobMarketTrend {
        id: row.get(0)?,
        skill_name: row.get(1)?,
        domain: row.get(2)?,
        job_postings_count: row.get(3)?,
        demand_trend,
        avg_salary: row.get(5)?,
        popularity_score: row.get(6)?,
        trend_data: Vec::new(),
        data_source: row.get(7)?,
        last_scraped: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn load_points(conn: &Connection, trend_id: &str) -> rusqlite::Result<Vec<TrendPoint>> {
    let mut stmt = conn.prepare_cached(
        "SELECT month, postings, avg_salary FROM trend_points WHERE trend_id = ?1 ORDER BY seq",
    )?;
    let points = stmt
        .query_map(params![trend_id], |row| {
            Ok(TrendPoint {
                month: row.get(0)?,
                postings: row.get(1)?,
                avg_salary: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(points)
}

fn with_points(conn: &Connection, mut trend: JobMarketTrend) -> rusqlite::Result<JobMarketTrend> {
    trend.trend_data = load_points(conn, &trend.id)?;
    Ok(trend)
}

fn insert_row(tx: &Transaction, trend: &JobMarketTrend) -> rusqlite::Result<()> {
    tx.execute(
        "INSERT INTO job_market_trends (id, skill_name, domain, job_postings_count, demand_trend, \
         avg_salary, popularity_score, data_source, last_scraped, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            trend.id,
            trend.skill_name,
            trend.domain,
            trend.job_postings_count,
            trend.demand_trend.as_str(),
            trend.avg_salary,
            trend.popularity_score,
            trend.data_source,
            trend.last_scraped,
            trend.created_at,
            trend.updated_at,
        ],
    )?;
    for (seq, point) in trend.trend_data.iter().enumerate() {
        tx.execute(
            "INSERT INTO trend_points (trend_id, seq, month, postings, avg_salary) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![trend.id, seq as i64, point.month, point.postings, point.avg_salary],
        )?;
    }
    Ok(())
}

/// Stamps a validated copy of `trend` with a fresh id and timestamps.
fn prepare_new(trend: &JobMarketTrend, now: DateTime<Utc>) -> Result<JobMarketTrend, TrendError> {
    trend.validate()?;
    let mut stored = trend.clone();
    stored.id = uuid::Uuid::new_v4().to_string();
    stored.domain = normalize_domain(trend.domain.as_deref()).map(str::to_string);
    stored.created_at = Some(now);
    stored.updated_at = Some(now);
    Ok(stored)
}

/// Validates and inserts a new record. Any client-supplied id or timestamps are replaced.
pub fn insert_trend(
    conn: &mut Connection,
    trend: &JobMarketTrend,
    now: DateTime<Utc>,
) -> ServiceResult<JobMarketTrend> {
    let stored = prepare_new(trend, now)?;
    let tx = conn.transaction()?;
    insert_row(&tx, &stored)?;
    tx.commit()?;
    Ok(stored)
}

/// Inserts all records in one transaction; nothing is written if any is invalid.
pub fn insert_many(
    conn: &mut Connection,
    trends: &[JobMarketTrend],
    now: DateTime<Utc>,
) -> ServiceResult<usize> {
    let stored = trends
        .iter()
        .map(|trend| prepare_new(trend, now))
        .collect::<Result<Vec<_>, _>>()?;
    let tx = conn.transaction()?;
    for trend in &stored {
        insert_row(&tx, trend)?;
    }
    tx.commit()?;
    Ok(stored.len())
}

pub fn get_trend(conn: &Connection, id: &str) -> ServiceResult<JobMarketTrend> {
    let trend = conn
        .query_row(&format!("{SELECT_TREND} WHERE id = ?1"), params![id], map_trend)
        .optional()?
        .ok_or_else(|| ServiceError::NotFound(format!("trend {id}")))?;
    Ok(with_points(conn, trend)?)
}

/// Looks records up through the `(skill_name, domain)` index, oldest first.
/// `domain = None` matches every domain; a blank domain matches only records
/// stored without one.
pub fn find_trends(
    conn: &Connection,
    skill_name: &str,
    domain: Option<&str>,
) -> ServiceResult<Vec<JobMarketTrend>> {
    let trends = match domain {
        Some(domain) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_TREND} WHERE skill_name = ?1 AND domain IS ?2 ORDER BY rowid"
            ))?;
            let rows = stmt.query_map(params![skill_name, normalize_domain(Some(domain))], map_trend)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("{SELECT_TREND} WHERE skill_name = ?1 ORDER BY rowid"))?;
            let rows = stmt.query_map(params![skill_name], map_trend)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };
    trends
        .into_iter()
        .map(|trend| with_points(conn, trend).map_err(ServiceError::from))
        .collect()
}

/// Replaces the scalar fields of an existing record.
///
/// `created_at` and the history are kept; history only grows through `append_point`.
pub fn update_trend(
    conn: &Connection,
    id: &str,
    trend: &JobMarketTrend,
    now: DateTime<Utc>,
) -> ServiceResult<JobMarketTrend> {
    trend.validate()?;
    let changed = conn.execute(
        "UPDATE job_market_trends SET skill_name = ?1, domain = ?2, job_postings_count = ?3, \
         demand_trend = ?4, avg_salary = ?5, popularity_score = ?6, data_source = ?7, \
         last_scraped = ?8, updated_at = ?9 WHERE id = ?10",
        params![
            trend.skill_name,
            normalize_domain(trend.domain.as_deref()),
            trend.job_postings_count,
            trend.demand_trend.as_str(),
            trend.avg_salary,
            trend.popularity_score,
            trend.data_source,
            trend.last_scraped,
            now,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(ServiceError::NotFound(format!("trend {id}")));
    }
    get_trend(conn, id)
}

/// Appends one bucket to the end of a record's history and bumps `updated_at`.
pub fn append_point(
    conn: &mut Connection,
    id: &str,
    point: &TrendPoint,
    now: DateTime<Utc>,
) -> ServiceResult<JobMarketTrend> {
    point.validate()?;
    let tx = conn.transaction()?;
    let changed = tx.execute(
        "UPDATE job_market_trends SET updated_at = ?1 WHERE id = ?2",
        params![now, id],
    )?;
    if changed == 0 {
        return Err(ServiceError::NotFound(format!("trend {id}")));
    }
    let next_seq: i64 = tx.query_row(
        "SELECT COALESCE(MAX(seq) + 1, 0) FROM trend_points WHERE trend_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    tx.execute(
        "INSERT INTO trend_points (trend_id, seq, month, postings, avg_salary) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, next_seq, point.month, point.postings, point.avg_salary],
    )?;
    tx.commit()?;
    get_trend(conn, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn rust_web() -> JobMarketTrend {
        let mut trend = JobMarketTrend::new("Rust");
        trend.domain = Some("web".to_string());
        trend.job_postings_count = 120;
        trend.demand_trend = DemandTrend::Rising;
        trend.popularity_score = Some(50.0);
        trend
    }

    #[test]
    fn insert_assigns_id_and_timestamps() {
        let mut conn = open();
        let stored = insert_trend(&mut conn, &rust_web(), at(1)).unwrap();

        assert!(!stored.id.is_empty());
        assert_eq!(stored.created_at, Some(at(1)));

        let loaded = get_trend(&conn, &stored.id).unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn insert_rejects_out_of_range_popularity() {
        let mut conn = open();
        let mut trend = rust_web();
        trend.popularity_score = Some(101.0);

        let err = insert_trend(&mut conn, &trend, at(1)).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(find_trends(&conn, "Rust", None).unwrap().is_empty());
    }

    #[test]
    fn duplicate_skill_domain_pairs_are_allowed() {
        let mut conn = open();
        let first = insert_trend(&mut conn, &rust_web(), at(1)).unwrap();
        let second = insert_trend(&mut conn, &rust_web(), at(2)).unwrap();
        let mut other = rust_web();
        other.domain = Some("embedded".to_string());
        insert_trend(&mut conn, &other, at(3)).unwrap();

        let found = find_trends(&conn, "Rust", Some("web")).unwrap();
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

        assert_eq!(find_trends(&conn, "Rust", None).unwrap().len(), 3);
        assert!(find_trends(&conn, "Go", None).unwrap().is_empty());
    }

    #[test]
    fn lookup_uses_compound_index() {
        let conn = open();
        let plan: String = conn
            .query_row(
                "EXPLAIN QUERY PLAN SELECT id FROM job_market_trends WHERE skill_name = 'Rust' AND domain IS 'web'",
                [],
                |row| row.get(3),
            )
            .unwrap();
        assert!(plan.contains("idx_trends_skill_domain"), "plan: {plan}");
    }

    #[test]
    fn points_append_in_insertion_order() {
        let mut conn = open();
        let mut trend = rust_web();
        trend.trend_data.push(TrendPoint {
            month: "2024-01".to_string(),
            postings: 90,
            avg_salary: Some(40_000.0),
        });
        let stored = insert_trend(&mut conn, &trend, at(1)).unwrap();

        for (month, postings) in [("2024-03", 110), ("2024-02", 100), ("2024-03", 111)] {
            let point = TrendPoint {
                month: month.to_string(),
                postings,
                avg_salary: None,
            };
            append_point(&mut conn, &stored.id, &point, at(5)).unwrap();
        }

        let loaded = get_trend(&conn, &stored.id).unwrap();
        let months: Vec<&str> = loaded.trend_data.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-03", "2024-02", "2024-03"]);
        assert_eq!(loaded.updated_at, Some(at(5)));
        assert_eq!(loaded.created_at, Some(at(1)));
    }

    #[test]
    fn blank_domain_is_stored_and_looked_up_as_none() {
        let mut conn = open();
        let mut blank = rust_web();
        blank.domain = Some(String::new());
        let stored = insert_trend(&mut conn, &blank, at(1)).unwrap();
        let mut missing = rust_web();
        missing.domain = None;
        let other = insert_trend(&mut conn, &missing, at(2)).unwrap();
        insert_trend(&mut conn, &rust_web(), at(3)).unwrap();

        assert_eq!(stored.domain, None);
        let found = find_trends(&conn, "Rust", Some("")).unwrap();
        let ids: Vec<&str> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![stored.id.as_str(), other.id.as_str()]);

        let mut changes = other.clone();
        changes.domain = Some("  ".to_string());
        assert_eq!(update_trend(&conn, &other.id, &changes, at(4)).unwrap().domain, None);
    }

    #[test]
    fn append_rejects_non_finite_salary() {
        let mut conn = open();
        let stored = insert_trend(&mut conn, &rust_web(), at(1)).unwrap();
        let point = TrendPoint {
            month: "2024-01".to_string(),
            postings: 1,
            avg_salary: Some(f64::NAN),
        };
        let err = append_point(&mut conn, &stored.id, &point, at(2)).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(get_trend(&conn, &stored.id).unwrap().trend_data.is_empty());
    }

    #[test]
    fn append_to_missing_trend_is_not_found() {
        let mut conn = open();
        let point = TrendPoint {
            month: "2024-01".to_string(),
            postings: 1,
            avg_salary: None,
        };
        let err = append_point(&mut conn, "missing", &point, at(1)).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn update_keeps_created_at_and_history() {
        let mut conn = open();
        let mut trend = rust_web();
        trend.trend_data.push(TrendPoint {
            month: "2024-01".to_string(),
            postings: 90,
            avg_salary: None,
        });
        let stored = insert_trend(&mut conn, &trend, at(1)).unwrap();

        let mut changes = stored.clone();
        changes.demand_trend = DemandTrend::Declining;
        changes.job_postings_count = 80;
        changes.trend_data.clear();
        let updated = update_trend(&conn, &stored.id, &changes, at(9)).unwrap();

        assert_eq!(updated.demand_trend, DemandTrend::Declining);
        assert_eq!(updated.job_postings_count, 80);
        assert_eq!(updated.created_at, Some(at(1)));
        assert_eq!(updated.updated_at, Some(at(9)));
        assert_eq!(updated.trend_data.len(), 1);

        assert!(matches!(
            update_trend(&conn, "missing", &changes, at(9)),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn insert_many_is_all_or_nothing() {
        let mut conn = open();
        let mut bad = rust_web();
        bad.job_postings_count = -1;

        assert!(insert_many(&mut conn, &[rust_web(), bad], at(1)).is_err());
        assert!(find_trends(&conn, "Rust", None).unwrap().is_empty());

        assert_eq!(insert_many(&mut conn, &[rust_web(), rust_web()], at(1)).unwrap(), 2);
    }
}
