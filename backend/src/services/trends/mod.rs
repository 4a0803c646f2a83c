//! # Trend Service Module
//!
//! HTTP persistence layer for `JobMarketTrend` records, routed under `/api/trends`.
//!
//! ## Sub-modules:
//! - `store`: SQLite schema and queries, including the `(skill_name, domain)` index.
//! - `get`: fetch one record by id, or look records up by skill and domain.
//! - `save`: create new records and replace the fields of existing ones.
//! - `points`: append a month to a record's history.
//! - `import`: bulk creation from an uploaded CSV file.

mod get;
mod import;
mod points;
mod save;
pub mod store;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/trends";

/// Configures and returns the Actix `Scope` for all trend routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: `save::create`, validates and stores a record (`201`).
/// *   **`GET /?skill=..&domain=..`**: `get::lookup`, records for the pair; no `domain` means any,
///     an empty `domain=` means records without one.
/// *   **`POST /import`**: `import::process`, multipart CSV upload.
/// *   **`GET /{trend_id}`**: `get::process`.
/// *   **`PUT /{trend_id}`**: `save::update`, history and `createdAt` are kept.
/// *   **`POST /{trend_id}/points`**: `points::process`, appends one `TrendPoint`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(save::create))
        .route("", get().to(get::lookup))
        .route("/import", post().to(import::process))
        .route("/{trend_id}", get().to(get::process))
        .route("/{trend_id}", put().to(save::update))
        .route("/{trend_id}/points", post().to(points::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use common::model::trend::{DemandTrend, JobMarketTrend};
    use common::requests::ImportSummary;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn config_for(db: &NamedTempFile) -> AppConfig {
        let config = AppConfig {
            db_path: db.path().to_path_buf(),
            ..AppConfig::default()
        };
        store::init_schema(&config.open_db().unwrap()).unwrap();
        config
    }

    #[actix_web::test]
    async fn create_fetch_and_lookup() {
        let db = NamedTempFile::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&db)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/trends")
            .set_json(json!({
                "skillName": "Rust",
                "domain": "web",
                "popularityScore": 50,
                "demandTrend": "rising"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: JobMarketTrend = test::read_body_json(resp).await;
        assert_eq!(created.demand_trend, DemandTrend::Rising);

        let req = test::TestRequest::get()
            .uri(&format!("/api/trends/{}", created.id))
            .to_request();
        let fetched: JobMarketTrend = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);

        let req = test::TestRequest::get()
            .uri("/api/trends?skill=Rust&domain=web")
            .to_request();
        let found: Vec<JobMarketTrend> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found, vec![created]);

        let req = test::TestRequest::get()
            .uri("/api/trends?skill=Rust&domain=mobile")
            .to_request();
        let found: Vec<JobMarketTrend> = test::call_and_read_body_json(&app, req).await;
        assert!(found.is_empty());
    }

    #[actix_web::test]
    async fn rejects_invalid_records() {
        let db = NamedTempFile::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&db)))
                .service(configure_routes()),
        )
        .await;

        for body in [
            json!({"skillName": "Rust", "popularityScore": 101, "demandTrend": "rising"}),
            json!({"skillName": "Rust", "popularityScore": 50, "demandTrend": "exploding"}),
            json!({"skillName": "", "popularityScore": 50}),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/trends")
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "accepted {body}");
        }

        let req = test::TestRequest::get().uri("/api/trends/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn empty_domain_is_looked_up_as_missing() {
        let db = NamedTempFile::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&db)))
                .service(configure_routes()),
        )
        .await;

        for domain in [json!(""), json!("web")] {
            let req = test::TestRequest::post()
                .uri("/api/trends")
                .set_json(json!({"skillName": "Rust", "domain": domain}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/trends?skill=Rust&domain=")
            .to_request();
        let found: Vec<JobMarketTrend> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].domain, None);
    }

    #[actix_web::test]
    async fn update_and_append_points() {
        let db = NamedTempFile::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&db)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/trends")
            .set_json(json!({"skillName": "Kotlin", "jobPostingsCount": 40}))
            .to_request();
        let created: JobMarketTrend = test::call_and_read_body_json(&app, req).await;

        for (month, postings) in [("2024-01", 40), ("2024-02", 44)] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/trends/{}/points", created.id))
                .set_json(json!({"month": month, "postings": postings, "avgSalary": 70000.0}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::put()
            .uri(&format!("/api/trends/{}", created.id))
            .set_json(json!({"skillName": "Kotlin", "jobPostingsCount": 44, "demandTrend": "declining"}))
            .to_request();
        let updated: JobMarketTrend = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.job_postings_count, 44);
        assert_eq!(updated.demand_trend, DemandTrend::Declining);
        assert_eq!(updated.created_at, created.created_at);
        let months: Vec<&str> = updated.trend_data.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02"]);
    }

    #[actix_web::test]
    async fn imports_csv_upload() {
        let db = NamedTempFile::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(&db)))
                .service(configure_routes()),
        )
        .await;

        let body = "--XBOUNDARY\r\n\
                    Content-Disposition: form-data; name=\"file\"; filename=\"trends.csv\"\r\n\
                    Content-Type: text/csv\r\n\r\n\
                    skillName,domain,demandTrend\r\n\
                    Rust,web,rising\r\n\
                    Rust,web,stable\r\n\
                    --XBOUNDARY--\r\n";
        let req = test::TestRequest::post()
            .uri("/api/trends/import")
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let summary: ImportSummary = test::read_body_json(resp).await;
        assert_eq!(summary.imported, 2);
        assert!(summary.data_source.starts_with("csv:"));

        let req = test::TestRequest::get()
            .uri("/api/trends?skill=Rust")
            .to_request();
        let found: Vec<JobMarketTrend> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].data_source.as_deref(), Some(summary.data_source.as_str()));
    }
}
