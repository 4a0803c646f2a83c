use super::store;
use crate::config::AppConfig;
use crate::errors::ServiceResult;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::trend::JobMarketTrend;
use log::info;

/// `POST /api/trends`: validates and stores a new record, answering `201` with it.
pub async fn create(
    payload: web::Json<JobMarketTrend>,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    let mut conn = config.open_db()?;
    let stored = store::insert_trend(&mut conn, &payload, Utc::now())?;
    info!(
        "Stored trend {} for skill {:?} (domain {:?})",
        stored.id, stored.skill_name, stored.domain
    );
    Ok(HttpResponse::Created().json(stored))
}

/// `PUT /api/trends/{trend_id}`: replaces the scalar fields of an existing record.
pub async fn update(
    trend_id: web::Path<String>,
    payload: web::Json<JobMarketTrend>,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    let conn = config.open_db()?;
    let updated = store::update_trend(&conn, &trend_id, &payload, Utc::now())?;
    Ok(HttpResponse::Ok().json(updated))
}
