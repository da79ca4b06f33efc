use axum::{extract::State, Json};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::errors::AppError;
use crate::recommend::shaping::{shape_recommendations, single_output};
use crate::recommend::validation::{parse_rating_submission, parse_recommendation_request};
use crate::space_client::{
    COURSES_ENDPOINT, RATINGS_ENDPOINT, RECOMMENDATIONS_ENDPOINT, TRAIN_ENDPOINT,
};
use crate::state::AppState;

fn body_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object()
        .ok_or_else(|| AppError::Validation("Request body must be a JSON object".to_string()))
}

/// POST /api/get_recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let request = parse_recommendation_request(body_object(&body)?)?;

    let outputs = state
        .predictor
        .predict(request.forwarded_args(), RECOMMENDATIONS_ENDPOINT)
        .await
        .map_err(|e| AppError::Upstream {
            action: "get recommendations",
            message: e.to_string(),
        })?;

    let recommendations = shape_recommendations(outputs).map_err(|e| AppError::Upstream {
        action: "get recommendations",
        message: e.to_string(),
    })?;

    Ok(Json(json!({
        "success": true,
        "recommendations": recommendations,
    })))
}

/// POST /api/submit_ratings
pub async fn handle_submit_ratings(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    debug!(payload = %body, "received ratings submission");

    let submission = parse_rating_submission(body_object(&body)?)?;

    let outputs = state
        .predictor
        .predict(submission.forwarded_args(), RATINGS_ENDPOINT)
        .await
        .map_err(|e| AppError::Upstream {
            action: "submit ratings",
            message: e.to_string(),
        })?;

    let feedback = single_output(outputs);
    debug!(%feedback, "ratings accepted by the Space");

    Ok(Json(json!({
        "success": true,
        "feedback": feedback,
    })))
}

/// POST /api/train_model
pub async fn handle_train_model(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let outputs = state
        .predictor
        .predict(vec![], TRAIN_ENDPOINT)
        .await
        .map_err(|e| AppError::Upstream {
            action: "train model",
            message: e.to_string(),
        })?;

    Ok(Json(json!({
        "success": true,
        "status": single_output(outputs),
    })))
}

/// GET /api/get_courses
pub async fn handle_get_courses(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let outputs = state
        .predictor
        .predict(vec![], COURSES_ENDPOINT)
        .await
        .map_err(|e| AppError::Upstream {
            action: "get courses",
            message: e.to_string(),
        })?;

    Ok(Json(json!({
        "success": true,
        "courses": single_output(outputs),
    })))
}

/// GET /api/test_connection
///
/// Probes the Space with the cheapest available call. Failures come back
/// as `{success: false, error}` rather than the bare `error` body the
/// other routes use.
pub async fn handle_test_connection(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let outputs = state
        .predictor
        .predict(vec![], COURSES_ENDPOINT)
        .await
        .map_err(|e| AppError::ConnectionTest(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Connection to Gradio API successful",
        "test_result": single_output(outputs),
    })))
}
