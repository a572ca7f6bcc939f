use axum::http::StatusCode;
use axum_macros::debug_handler;

pub const PATH: &str = "/health";

/// Liveness only. The user store is not touched.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = PATH,
    responses(
        (status = 200, description = "Server is up"),
    ),
    tag = "probe"
))]
#[debug_handler]
#[tracing::instrument(ret)]
pub async fn handler() -> StatusCode {
    StatusCode::OK
}
