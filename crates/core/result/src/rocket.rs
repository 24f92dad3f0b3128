use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};

use crate::{Error, ErrorType};

/// HTTP response builder for Error enum
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self.error_type {
            ErrorType::MissingFields => Status::BadRequest,
            ErrorType::InvalidEmail => Status::BadRequest,
            ErrorType::InvalidImage => Status::BadRequest,
            ErrorType::InvalidStatus => Status::BadRequest,
            ErrorType::FailedValidation { .. } => Status::BadRequest,

            ErrorType::NotFound => Status::NotFound,
            ErrorType::PayloadTooLarge => Status::PayloadTooLarge,

            ErrorType::DatabaseError { .. } => Status::InternalServerError,
            ErrorType::InternalError => Status::InternalServerError,
        };

        // Serialize the error data structure into JSON.
        let string = serde_json::to_string(&self).unwrap();

        // Build and send the request.
        Response::build()
            .sized_body(string.len(), Cursor::new(string))
            .header(ContentType::new("application", "json"))
            .status(status)
            .ok()
    }
}
