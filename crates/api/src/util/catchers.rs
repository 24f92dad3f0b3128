use meld_result::{create_error, Result};
use rocket::Catcher;

#[catch(400)]
pub fn bad_request() -> Result<()> {
    Err(create_error!(FailedValidation {
        error: "Invalid request.".to_string()
    }))
}

#[catch(404)]
pub fn not_found() -> Result<()> {
    Err(create_error!(NotFound))
}

#[catch(413)]
pub fn payload_too_large() -> Result<()> {
    Err(create_error!(PayloadTooLarge))
}

#[catch(422)]
pub fn unprocessable_entity() -> Result<()> {
    Err(create_error!(FailedValidation {
        error: "Invalid request body.".to_string()
    }))
}

#[catch(500)]
pub fn internal_server_error() -> Result<()> {
    Err(create_error!(InternalError))
}

pub fn catchers() -> Vec<Catcher> {
    catchers![
        bad_request,
        not_found,
        payload_too_large,
        unprocessable_entity,
        internal_server_error
    ]
}
