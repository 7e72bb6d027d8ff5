//! Ingestion endpoints: `POST /upload/{project_id}`,
//! `POST /upload/process/{project_id}` (§6).

use crate::dto::{ProcessRequest, ProcessResponse, UploadResponse};
use crate::error_status::error_status;
use ragcore_application::controllers::ingestion::IngestionController;
use ragcore_application::services::Services;
use ragcore_domain::signal::Signal;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{post, State};

/// Multipart upload body: a single file field.
#[derive(rocket::FromForm)]
pub struct UploadForm<'f> {
    file: TempFile<'f>,
}

#[post("/upload/<project_id>", data = "<form>")]
pub async fn upload(
    project_id: i64,
    mut form: Form<UploadForm<'_>>,
    services: &State<Services>,
) -> (Status, Json<UploadResponse>) {
    let original_name = form
        .file
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().to_string())
        .unwrap_or_else(|| "upload.bin".to_string());
    let mime_type = form
        .file
        .content_type()
        .map_or_else(|| "application/octet-stream".to_string(), |ct| ct.to_string());
    let size_bytes = form.file.len();

    let controller = IngestionController::new(services.inner().clone());
    let reader = match form.file.open().await {
        Ok(reader) => reader,
        Err(source) => {
            tracing::warn!(error = %source, "failed to open incoming upload stream");
            return (
                Status::InternalServerError,
                Json(UploadResponse { signal: Signal::FileUploadFailed, file_id: None }),
            );
        }
    };

    match controller
        .upload_file(project_id, &original_name, &mime_type, size_bytes, reader)
        .await
    {
        Ok(outcome) => {
            let status = Status::new(outcome.signal.http_status());
            (status, Json(UploadResponse { signal: outcome.signal, file_id: outcome.asset.and_then(|a| a.id) }))
        }
        Err(err) => {
            tracing::warn!(error = %err, "upload failed");
            (error_status(&err), Json(UploadResponse { signal: Signal::FileUploadFailed, file_id: None }))
        }
    }
}

#[post("/upload/process/<project_id>", data = "<body>")]
pub async fn process(
    project_id: i64,
    body: Json<ProcessRequest>,
    services: &State<Services>,
) -> (Status, Json<ProcessResponse>) {
    let controller = IngestionController::new(services.inner().clone());
    let body = body.into_inner();

    match controller
        .process(project_id, body.file_id, body.chunk_size, body.overlap_size, body.do_reset)
        .await
    {
        Ok(outcome) => {
            let status = outcome.signal.map_or(Status::Ok, |s| Status::new(s.http_status()));
            (
                status,
                Json(ProcessResponse {
                    signal: outcome.signal,
                    files_processed: outcome.files_processed,
                    records_created: outcome.records_created,
                }),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "processing failed");
            (error_status(&err), Json(ProcessResponse { signal: None, files_processed: 0, records_created: 0 }))
        }
    }
}
