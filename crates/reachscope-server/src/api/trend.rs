use axum::{extract::rejection::JsonRejection, Extension, Json};
use reachscope_trend::{
    compute_trend, count_or_zero, render_prompt_context, to_samples, RawPost, TrendMetrics,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct TrendRequest {
    /// Read with the same coercion as post counts.
    #[serde(default)]
    pub followers: Option<serde_json::Value>,
    /// Most recent first.
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TrendResponseData {
    pub available: bool,
    pub metrics: Option<TrendMetrics>,
    pub prompt_context: String,
}

pub(super) async fn analyze_trend(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<TrendRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TrendResponseData>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        let code = match rejection {
            JsonRejection::JsonDataError(_) => "validation_error",
            _ => "bad_request",
        };
        tracing::debug!(error = %rejection, "rejected trend request body");
        ApiError::new(req_id.0.clone(), code, rejection.body_text())
    })?;

    let followers = count_or_zero(request.followers.as_ref());
    let samples = to_samples(request.posts);
    let metrics = compute_trend(&samples, followers);
    let prompt_context = render_prompt_context(metrics.as_ref());

    tracing::info!(
        request_id = %req_id.0,
        posts = samples.len(),
        followers,
        available = metrics.is_some(),
        "trend analyzed"
    );

    Ok(Json(ApiResponse {
        data: TrendResponseData {
            available: metrics.is_some(),
            metrics,
            prompt_context,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
