//! Evaluation endpoint: `POST /evaluation/{project_id}` (§6).

use crate::dto::{EvaluationRequest, EvaluationResponse};
use crate::error_status::error_status;
use ragcore_application::controllers::evaluation::{EvaluationCase, EvaluationController};
use ragcore_application::services::Services;
use ragcore_domain::ports::Metric;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{post, State};

/// Fixed RAGAS metric set every evaluation batch requests (§12).
const DEFAULT_METRICS: &[&str] = &["faithfulness", "answer_relevancy", "context_precision"];

#[post("/evaluation/<project_id>", data = "<body>")]
pub async fn evaluate(
    project_id: i64,
    body: Json<EvaluationRequest>,
    services: &State<Services>,
) -> (Status, Json<EvaluationResponse>) {
    let controller = EvaluationController::new(services.inner().clone());
    let cases: Vec<EvaluationCase> = body
        .into_inner()
        .test_queries
        .into_iter()
        .map(|q| EvaluationCase { question: q.question, ground_truth: q.ground_truth })
        .collect();
    let metrics: Vec<Metric> = DEFAULT_METRICS.iter().map(|name| Metric { name: (*name).to_string() }).collect();

    match controller.run(project_id, &cases, &metrics).await {
        Ok(rows) => (Status::Ok, Json(EvaluationResponse { signal: None, metrics: rows })),
        Err(err) => {
            tracing::warn!(error = %err, "evaluation failed");
            (error_status(&err), Json(EvaluationResponse { signal: None, metrics: Vec::new() }))
        }
    }
}
