//! Maps a raw (unmodeled) controller [`Error`] to an HTTP status, per §7:
//! 4xx for validation/not-found, 5xx for storage/provider/consistency/I/O.

use ragcore_domain::error::Error;
use rocket::http::Status;

/// The HTTP status an error should be reported with when the controller
/// didn't already classify it into a [`ragcore_domain::signal::Signal`].
#[must_use]
pub fn error_status(err: &Error) -> Status {
    match err {
        Error::Validation { .. } => Status::BadRequest,
        Error::NotFound { .. } => Status::NotFound,
        Error::Storage { .. }
        | Error::VectorDb { .. }
        | Error::Provider { .. }
        | Error::Io { .. }
        | Error::Config { .. }
        | Error::Internal { .. } => Status::InternalServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        assert_eq!(error_status(&Error::validation("bad")), Status::BadRequest);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(error_status(&Error::not_found("asset 1")), Status::NotFound);
    }

    #[test]
    fn storage_and_provider_map_to_500() {
        assert_eq!(error_status(&Error::storage("db down")), Status::InternalServerError);
        assert_eq!(error_status(&Error::provider("timeout")), Status::InternalServerError);
    }
}
