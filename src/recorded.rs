//! Errors recorded by handlers for the access log.
//!
//! Handlers do not fail the request to report a problem. They attach
//! [`RecordedErrors`] to the response they return, and the access log reads
//! them back once the chain has finished.

use axum::{
    http::StatusCode,
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use std::{convert::Infallible, fmt};

/// Who a recorded error is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Operator-facing; written to the access log
    Private,
    /// Client-facing; shown in the response body, not logged
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub scope: ErrorScope,
    pub message: String,
}

impl RecordedError {
    pub fn private(message: impl Into<String>) -> Self {
        Self {
            scope: ErrorScope::Private,
            message: message.into(),
        }
    }

    pub fn public(message: impl Into<String>) -> Self {
        Self {
            scope: ErrorScope::Public,
            message: message.into(),
        }
    }

    pub fn is_private(&self) -> bool {
        self.scope == ErrorScope::Private
    }
}

impl fmt::Display for RecordedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Lets handlers return `Result<_, RecordedError>`.
///
/// Public errors echo their message to the client; private ones only reach
/// the log.
impl IntoResponse for RecordedError {
    fn into_response(self) -> Response {
        let body = match self.scope {
            ErrorScope::Public => self.message.clone(),
            ErrorScope::Private => "internal server error".to_string(),
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            RecordedErrors::from(self),
            body,
        )
            .into_response()
    }
}

/// Ordered list of errors travelling back with a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedErrors(Vec<RecordedError>);

impl RecordedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: RecordedError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedError> {
        self.0.iter()
    }

    /// Messages of the private errors, in the order they were recorded
    pub fn private_messages(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|error| error.is_private())
            .map(|error| error.message.as_str())
    }

    /// Appends `error` to whatever is already attached to `response`.
    ///
    /// For middleware that sits between a handler and the access log.
    pub fn record(response: &mut Response, error: RecordedError) {
        match response.extensions_mut().get_mut::<RecordedErrors>() {
            Some(existing) => existing.push(error),
            None => {
                response
                    .extensions_mut()
                    .insert(RecordedErrors(vec![error]));
            }
        }
    }
}

impl From<RecordedError> for RecordedErrors {
    fn from(error: RecordedError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<RecordedError> for RecordedErrors {
    fn from_iter<I: IntoIterator<Item = RecordedError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoResponseParts for RecordedErrors {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        match res.extensions_mut().get_mut::<RecordedErrors>() {
            Some(existing) => existing.0.extend(self.0),
            None => {
                res.extensions_mut().insert(self);
            }
        }
        Ok(res)
    }
}
