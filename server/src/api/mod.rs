pub mod health;
pub mod username;

#[cfg(feature = "openapi")]
pub const OPEN_API_DOCS_PATH: &str = "/api-docs/openapi.json";

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(health::handler, username::check_unique::handler),
    components(schemas(extra::ApiResponse))
)]
pub struct OpenApiDoc;

#[cfg(feature = "openapi")]
pub fn openapi() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi;

    OpenApiDoc::openapi()
}
