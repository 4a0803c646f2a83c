//! College directory service, routed under `/api/colleges`.
//!
//! Serves the same directory and matching rule the signup autocomplete uses, so
//! the frontend can load it instead of relying on its built-in copy.

mod suggest;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/colleges";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(suggest::process))
}
