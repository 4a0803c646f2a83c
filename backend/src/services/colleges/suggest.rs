use actix_web::{web, HttpResponse, Responder};
use common::college::CollegeDirectory;
use common::requests::CollegeQuery;

/// `GET /api/colleges?q=..`: the whole directory, or the entries matching `q`.
pub async fn process(
    query: web::Query<CollegeQuery>,
    directory: web::Data<CollegeDirectory>,
) -> impl Responder {
    let names: Vec<&str> = match query.q.as_deref() {
        Some(q) => directory.suggest(q),
        None => directory.names().iter().map(String::as_str).collect(),
    };
    HttpResponse::Ok().json(names)
}
