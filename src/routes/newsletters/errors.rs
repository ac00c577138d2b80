use actix_web::{ResponseError, http::StatusCode};

use crate::newsletter::{DispatchError, RenderError};

impl ResponseError for DispatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::MissingRequiredField(_) => StatusCode::BAD_REQUEST,
            DispatchError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for RenderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
