use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use revscope_profile::ProfileError;
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    pub query: Option<String>,
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    build(&state, req_id, &user_id).await
}

/// `GET /query?query=<user id>`, kept for the legacy web front end.
pub(super) async fn query_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ProfileQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user_id) = params.query else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "missing `query` parameter",
        ));
    };
    build(&state, req_id, &user_id).await
}

async fn build(
    state: &AppState,
    req_id: RequestId,
    user_id: &str,
) -> Result<Json<ApiResponse<revscope_profile::ProfileResult>>, ApiError> {
    match state.service.build_profile(user_id).await {
        Ok(profile) => Ok(Json(ApiResponse {
            data: profile,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(e) => Err(map_profile_error(req_id.0, user_id, &e)),
    }
}

pub(super) fn map_profile_error(request_id: String, user_id: &str, error: &ProfileError) -> ApiError {
    match error {
        ProfileError::InvalidUserId => ApiError::new(request_id, "bad_request", error.to_string()),
        ProfileError::UserNotFound { .. } => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        ProfileError::ServiceUnavailable { stage, source } => {
            tracing::error!(user_id, %stage, error = %source, "profile build failed");
            ApiError::new(
                request_id,
                "service_unavailable",
                format!("upstream service unavailable while reaching {stage}"),
            )
        }
        ProfileError::MalformedField { .. } => {
            tracing::error!(user_id, error = %error, "unexpected field error escaped profile build");
            ApiError::new(request_id, "internal_error", "profile build failed")
        }
    }
}
