use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use contextual::Context;
use extra::{ApiResponse, json_error_response};
use validation::FieldErrors;

use crate::{AppState, types::Username};

pub const PATH: &str = "/api/check-username-unique";

pub const UNIQUE: &str = "Username is unique";
pub const TAKEN: &str = "Username is already taken";
pub const FAILED: &str = "Error checking username";

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub username: Option<String>,
}

impl Params {
    /// The first `username` pair wins; later repeats are ignored.
    pub fn from_query(query: Option<&str>) -> Result<Self, serde_urlencoded::de::Error> {
        let Some(query) = query else {
            return Ok(Self::default());
        };

        let username = serde_urlencoded::from_str::<Vec<(String, String)>>(query)?
            .into_iter()
            .find(|(key, _)| key == "username")
            .map(|(_, value)| value);

        Ok(Self { username })
    }
}

/// A taken name is still answered with `200 OK`; only `success` tells the two outcomes apart.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = PATH,
    operation_id = PATH,
    params(Params),
    responses(
        (status = 200, description = "Username is unique (`success: true`) or already taken (`success: false`)", body = ApiResponse),
        (status = 400, description = "Invalid username", body = ApiResponse),
        (status = 500, description = "Error checking username", body = ApiResponse),
    ),
    tag = "username"
))]
#[tracing::instrument(fields(username = tracing::field::Empty), skip_all, ret)]
#[debug_handler]
pub async fn handler(
    State(AppState { data_access, .. }): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<(StatusCode, Json<ApiResponse>), CheckUsernameUniqueError> {
    data_access.connect().await.context("connect user store")?;

    let Params { username } = Params::from_query(query.as_deref()).map_err(|err| {
        tracing::info!("unparsable query :: {}", err);
        CheckUsernameUniqueError::InvalidParams(FieldErrors::new())
    })?;

    if let Some(username) = &username {
        tracing::Span::current().record("username", tracing::field::debug(username));
    }

    let username = Username::try_from(username)?;

    match super::verified_username_exists(&data_access, &username)
        .await
        .context("check username uniqueness")?
    {
        true => Ok((StatusCode::OK, Json(ApiResponse::failure(TAKEN)))),
        false => Ok((StatusCode::OK, Json(ApiResponse::success(UNIQUE)))),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CheckUsernameUniqueError {
    #[error("{0}")]
    InvalidParams(#[from] FieldErrors),

    #[error("{0}")]
    DataAccess(#[from] contextual::Error<data_access::Error>),
}

impl IntoResponse for CheckUsernameUniqueError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CheckUsernameUniqueError::InvalidParams(_) => {
                tracing::info!("{:?}", self);
                (StatusCode::BAD_REQUEST, Json(json_error_response(self))).into_response()
            }
            CheckUsernameUniqueError::DataAccess(err) => {
                tracing::error!("{:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure(FAILED)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_query_has_no_username() {
        assert_eq!(Params::from_query(None).unwrap(), Params::default());
        assert_eq!(Params::from_query(Some("")).unwrap(), Params::default());
        assert_eq!(Params::from_query(Some("name=alice")).unwrap(), Params::default());
    }

    #[test]
    fn first_username_wins() {
        let params = Params::from_query(Some("username=alice&username=bob")).unwrap();
        assert_eq!(params.username.as_deref(), Some("alice"));
    }

    #[test]
    fn values_are_percent_decoded() {
        let params = Params::from_query(Some("other=1&username=a+b%21")).unwrap();
        assert_eq!(params.username.as_deref(), Some("a b!"));
    }

    #[test]
    fn empty_value_is_kept() {
        let params = Params::from_query(Some("username=")).unwrap();
        assert_eq!(params.username.as_deref(), Some(""));
    }
}
