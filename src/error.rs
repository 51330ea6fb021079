//! Error types for the table facade, the seed loader and the driver.

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use std::path;
use thiserror::Error;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to DynamoDB or driving the walkthrough.
#[derive(Error, Debug)]
pub enum Error {
    /// DynamoDB rejected or failed a request.
    #[error("{operation} on '{target}' failed: {}", service_detail(.message, .code))]
    Service {
        /// DynamoDB operation name, e.g. `PutItem`.
        operation: &'static str,
        /// Table (or other resource) the request addressed.
        target: String,
        /// Service error code, e.g. `ResourceNotFoundException`.
        code: Option<String>,
        /// Service error message.
        message: Option<String>,
        /// Underlying SDK error.
        #[source]
        source: Box<aws_sdk_dynamodb::Error>,
    },

    /// The table did not reach `ACTIVE` within the polling budget.
    #[error("timeout waiting for table '{table_name}' to become active")]
    TableActivationTimeout {
        /// Table being created.
        table_name: String,
    },

    /// Batch items DynamoDB kept returning as unprocessed.
    #[error("{count} items were left unprocessed writing to '{table_name}'")]
    UnprocessedItems {
        /// Table being written.
        table_name: String,
        /// Number of items never written.
        count: usize,
    },

    /// An item returned by DynamoDB does not have the record shape.
    #[error("malformed item attribute '{attribute}': {reason}")]
    MalformedItem {
        /// Attribute path that failed to decode.
        attribute: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The seed file is missing and could not be obtained.
    #[error("seed file not found: {}", .path.display())]
    SeedFileNotFound {
        /// Expected location of the seed file.
        path: path::PathBuf,
    },

    /// Downloading the seed archive failed.
    #[error("seed archive download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// The seed archive could not be read or extracted.
    #[error("seed archive is invalid: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The seed file is not a JSON array of records.
    #[error("seed file is invalid: {0}")]
    SeedFormat(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal interaction failed.
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

fn service_detail<'a>(message: &'a Option<String>, code: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(code.as_deref())
        .unwrap_or("unknown service error")
}

impl Error {
    /// Classify an SDK failure, logging it once with its service metadata.
    pub(crate) fn service<E, R>(
        operation: &'static str,
        target: impl Into<String>,
        err: SdkError<E, R>,
    ) -> Self
    where
        E: ProvideErrorMetadata,
        aws_sdk_dynamodb::Error: From<SdkError<E, R>>,
    {
        let target = target.into();
        let code = err.code().map(str::to_string);
        let message = err.message().map(str::to_string);
        tracing::error!(
            operation,
            target = %target,
            code = code.as_deref().unwrap_or("-"),
            message = message.as_deref().unwrap_or("-"),
            "DynamoDB request failed"
        );
        Self::Service {
            operation,
            target,
            code,
            message,
            source: Box::new(err.into()),
        }
    }

    pub(crate) fn malformed(attribute: &str, reason: impl Into<String>) -> Self {
        Self::MalformedItem {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }

    /// Service error code, when this is a DynamoDB fault.
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
