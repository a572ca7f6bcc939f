mod api_response;

pub use api_response::{ApiResponse, json_error_response};
