//!
//! # Client Error Handling
//!
//! This module defines the error type `ClientError` used throughout the client.
//! It centralizes failure reporting, providing a consistent way to represent the
//! three ways a request can go wrong from the caller's point of view: the server
//! was never reached, the server answered with a non-success status, or a success
//! body could not be decoded.
//!
//! Every variant carries the request path it arose from. The failure pipeline
//! depends on that context to classify the error, so `ClientError` values are
//! constructed explicitly at the transport seam rather than through `From`
//! conversions that would lose it.

use std::error::Error;
use std::fmt;

/// Represents all possible failures surfaced by the client.
///
/// Each variant corresponds to a distinct failure stage. Values are created by
/// the request pipeline, shown to the installed failure hook once, and then
/// returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS failure,
    /// timeout). There is no status code to inspect.
    Network {
        /// Path of the request that failed.
        path: String,
        /// Transport-level description of what went wrong.
        detail: String,
    },
    /// The server answered with a non-success status code.
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Path of the request that failed.
        path: String,
        /// Textual server message, when the error body carried one.
        message: Option<String>,
    },
    /// A success response whose body could not be parsed into the expected
    /// shape. Not routed through the failure hook; a malformed body is a
    /// caller-level problem, not a session or notification concern.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Network { path, detail } => {
                write!(f, "Network Error: {} ({})", detail, path)
            }
            ClientError::Api {
                status,
                path,
                message: Some(msg),
            } => write!(f, "API Error: {} {} ({})", status, path, msg),
            ClientError::Api {
                status,
                path,
                message: None,
            } => write!(f, "API Error: {} {}", status, path),
            ClientError::Decode(msg) => write!(f, "Decode Error: {}", msg),
        }
    }
}

impl Error for ClientError {}

impl ClientError {
    /// Returns the HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
