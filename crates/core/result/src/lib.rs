#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(feature = "schemas")]
#[macro_use]
extern crate schemars;

#[cfg(feature = "rocket")]
pub mod rocket;

#[cfg(feature = "okapi")]
pub mod okapi;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "schemas", derive(JsonSchema))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Human-readable message for the caller
    pub message: String,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[cfg_attr(feature = "schemas", derive(JsonSchema))]
#[derive(Debug, Clone)]
pub enum ErrorType {
    // ? Submission related errors
    MissingFields,
    InvalidEmail,
    InvalidImage,

    // ? Triage related errors
    InvalidStatus,

    // ? General errors
    FailedValidation {
        error: String,
    },
    NotFound,
    PayloadTooLarge,
    DatabaseError {
        operation: String,
        collection: String,
    },
    InternalError,
}

impl ErrorType {
    /// Message presented to the caller alongside this error type
    pub fn message(&self) -> String {
        match self {
            ErrorType::MissingFields => "Location, description and email are required.",
            ErrorType::InvalidEmail => "Invalid email address.",
            ErrorType::InvalidImage => "Invalid image format, expected a data:image/ URI.",
            ErrorType::InvalidStatus => "Invalid report status.",
            ErrorType::FailedValidation { error } => return error.clone(),
            ErrorType::NotFound => "Not found.",
            ErrorType::PayloadTooLarge => "Payload too large.",
            ErrorType::DatabaseError { .. } | ErrorType::InternalError => "Internal server error.",
        }
        .to_string()
    }
}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {{
        let error_type = $crate::ErrorType::$error $( $tt )?;
        $crate::Error {
            message: error_type.message(),
            error_type,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    }};
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        create_error!(DatabaseError {
            operation: $operation.to_string(),
            collection: $collection.to_string()
        })
    };
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! query {
    ( $self: ident, $type: ident, $collection: expr, $($rest:expr),+ ) => {
        Ok($self.$type($collection, $($rest),+).await.unwrap())
    };
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! query {
    ( $self: ident, $type: ident, $collection: expr, $($rest:expr),+ ) => {
        $self.$type($collection, $($rest),+).await
            .map_err(|_| create_database_error!(stringify!($type), $collection))
    };
}
