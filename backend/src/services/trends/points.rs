use super::store;
use crate::config::AppConfig;
use crate::errors::ServiceResult;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::trend::TrendPoint;

/// `POST /api/trends/{trend_id}/points`: appends one month to the history.
pub async fn process(
    trend_id: web::Path<String>,
    point: web::Json<TrendPoint>,
    config: web::Data<AppConfig>,
) -> ServiceResult<HttpResponse> {
    let mut conn = config.open_db()?;
    let trend = store::append_point(&mut conn, &trend_id, &point, Utc::now())?;
    Ok(HttpResponse::Ok().json(trend))
}
