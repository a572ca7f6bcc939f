/// Body shared by every JSON answer of the api.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,

    #[cfg_attr(feature = "openapi", schema(example = "Username is unique"))]
    pub message: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

pub fn json_error_response(err: impl std::error::Error) -> ApiResponse {
    ApiResponse::failure(err.to_string())
}
