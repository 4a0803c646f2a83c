//! Read side of the trend service: fetch by id and lookup by `(skill, domain)`.

use super::store;
use crate::config::AppConfig;
use crate::errors::{ServiceError, ServiceResult};
use actix_web::{web, HttpResponse};
use common::requests::TrendLookup;

/// `GET /api/trends/{trend_id}`: the record with its full history, or `404`.
pub async fn process(
    trend_id: web::Path<String>,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    let conn = config.open_db()?;
    let trend = store::get_trend(&conn, &trend_id)?;
    Ok(HttpResponse::Ok().json(trend))
}

/// `GET /api/trends?skill=..&domain=..`: every record for the pair, oldest first.
pub async fn lookup(
    query: web::Query<TrendLookup>,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    if query.skill.trim().is_empty() {
        return Err(ServiceError::Invalid("skill must not be empty".to_string()));
    }
    let conn = config.open_db()?;
    let trends = store::find_trends(&conn, &query.skill, query.domain.as_deref())?;
    Ok(HttpResponse::Ok().json(trends))
}
