//! NLP endpoints: push, collection info, search, answer (§6).

use crate::dto::{
    AnswerRequest, AnswerResponse, CollectionInfoResponse, PushRequest, PushResponse, SearchRequest,
    SearchResponse,
};
use crate::error_status::error_status;
use ragcore_application::controllers::nlp::NlpController;
use ragcore_application::services::Services;
use ragcore_domain::signal::Signal;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, State};

#[post("/nlp/push/<project_id>", data = "<body>")]
pub async fn push(
    project_id: i64,
    body: Json<PushRequest>,
    services: &State<Services>,
) -> (Status, Json<PushResponse>) {
    let controller = NlpController::new(services.inner().clone());
    match controller.push(project_id, body.into_inner().do_reset).await {
        Ok(outcome) => {
            let status = outcome.signal.map_or(Status::Ok, |s| Status::new(s.http_status()));
            (status, Json(PushResponse { signal: outcome.signal, indexed_chunks: outcome.inserted_count }))
        }
        Err(err) => {
            tracing::warn!(error = %err, "indexing failed");
            (error_status(&err), Json(PushResponse { signal: Some(Signal::IndexingFailed), indexed_chunks: 0 }))
        }
    }
}

#[get("/nlp/collection_info/<project_id>")]
pub async fn collection_info(project_id: i64, services: &State<Services>) -> (Status, Json<CollectionInfoResponse>) {
    let controller = NlpController::new(services.inner().clone());
    let collection = controller.collection_name(project_id);
    match services.vector_store.collection_info(&collection).await {
        Ok(info) => (
            Status::Ok,
            Json(CollectionInfoResponse { signal: Signal::FetchingCollectionInfoCompleted, collection_info: info }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "collection info lookup failed");
            (
                error_status(&err),
                Json(CollectionInfoResponse { signal: Signal::FetchingCollectionInfoFailed, collection_info: None }),
            )
        }
    }
}

#[post("/nlp/search/<project_id>", data = "<body>")]
pub async fn search(
    project_id: i64,
    body: Json<SearchRequest>,
    services: &State<Services>,
) -> (Status, Json<SearchResponse>) {
    let controller = NlpController::new(services.inner().clone());
    let body = body.into_inner();
    match controller.search(project_id, &body.text, body.top_k, None).await {
        Ok(results) => (
            Status::Ok,
            Json(SearchResponse {
                signal: Signal::SearchCompleted,
                results: results.into_iter().map(Into::into).collect(),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "search failed");
            (error_status(&err), Json(SearchResponse { signal: Signal::SearchFailed, results: Vec::new() }))
        }
    }
}

#[post("/nlp/answer/<project_id>", data = "<body>")]
pub async fn answer(
    project_id: i64,
    body: Json<AnswerRequest>,
    services: &State<Services>,
) -> (Status, Json<AnswerResponse>) {
    let controller = NlpController::new(services.inner().clone());
    let body = body.into_inner();
    match controller
        .answer(project_id, &body.text, body.top_k, body.use_reranking, body.max_tokens, body.temperature)
        .await
    {
        Ok(outcome) => {
            let status = Status::new(outcome.signal.http_status());
            (
                status,
                Json(AnswerResponse {
                    signal: outcome.signal,
                    answer: outcome.answer,
                    full_prompt: outcome.full_prompt,
                    chat_history: outcome.chat_history,
                }),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "answer generation failed");
            (
                error_status(&err),
                Json(AnswerResponse {
                    signal: Signal::AnswerGenerationFailed,
                    answer: String::new(),
                    full_prompt: String::new(),
                    chat_history: Vec::new(),
                }),
            )
        }
    }
}
