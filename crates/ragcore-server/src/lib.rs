//! HTTP surface for RAGCore (§6): thin Rocket handlers that parse a
//! request, call one application controller, and serialize its outcome.
//! No business logic lives here — see `ragcore-application` for that.

pub mod dto;
pub mod error_status;
pub mod routes;

use ragcore_application::services::Services;
use rocket::{routes, Build, Rocket};

/// Assemble the Rocket instance mounting all seven endpoints of §6 over
/// `services`.
#[must_use]
pub fn build_rocket(services: Services) -> Rocket<Build> {
    rocket::build().manage(services).mount(
        "/",
        routes![
            routes::ingestion::upload,
            routes::ingestion::process,
            routes::nlp::push,
            routes::nlp::collection_info,
            routes::nlp::search,
            routes::nlp::answer,
            routes::evaluation::evaluate,
        ],
    )
}
