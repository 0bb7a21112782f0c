//! Wire envelopes for procedure calls.
//!
//! A successful call answers `{"result": {"data": ..}}`; a failed one answers
//! `{"error": {"kind", "message", "field"}}` with a status derived from the
//! error kind.

use crate::errors::{Error, Result};
use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

/// Successful call payload.
#[derive(Debug, Serialize)]
pub struct RpcSuccess<T> {
    pub result: RpcData<T>,
}

#[derive(Debug, Serialize)]
pub struct RpcData<T> {
    pub data: T,
}

/// What every procedure handler returns.
pub type RpcResult<T> = Result<Json<RpcSuccess<T>>>;

/// Wraps `data` in the success envelope.
#[allow(clippy::unnecessary_wraps)]
pub fn respond<T>(data: T) -> RpcResult<T> {
    Ok(Json(RpcSuccess {
        result: RpcData { data },
    }))
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

impl Error {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ReferentialIntegrity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Procedure failed");
        } else {
            debug!(error = %self, "Procedure rejected");
        }

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
                field: self.field(),
            },
        };
        (status, Json(envelope)).into_response()
    }
}

/// Picks the offending field out of a serde error message.
///
/// Messages look like `status: unknown variant ..` when the path is known and
/// `missing field `name` ..` for absent keys.
fn rejection_field(detail: &str) -> String {
    let (path, message) = match detail.split_once(": ") {
        Some((path, rest)) if !path.contains(char::is_whitespace) => (Some(path), rest),
        _ => (None, detail),
    };
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(name, _)| name);

    match (path, missing) {
        (Some(path), Some(name)) => format!("{path}.{name}"),
        (Some(path), None) => path.to_string(),
        (None, Some(name)) => name.to_string(),
        (None, None) => "body".to_string(),
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let detail = text.split_once(": ").map_or(text.as_str(), |(_, rest)| rest);
        match rejection {
            JsonRejection::JsonDataError(_) => Self::validation(rejection_field(detail), detail),
            _ => Self::validation("body", detail),
        }
    }
}

/// JSON procedure input.
///
/// An empty body reads as `{}` so procedures whose parameters are all
/// optional can be called without one.
#[derive(Debug, Clone)]
pub struct RpcInput<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for RpcInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::validation("body", e.body_text()))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let Json(value) = Json::<T>::from_bytes(body)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_field_from_path() {
        assert_eq!(
            rejection_field("status: unknown variant `paused`, expected one of `planned`"),
            "status"
        );
        assert_eq!(
            rejection_field("filters.page: invalid type: string \"x\", expected u64"),
            "filters.page"
        );
    }

    #[test]
    fn test_rejection_field_from_missing_key() {
        assert_eq!(
            rejection_field("missing field `name` at line 1 column 2"),
            "name"
        );
        assert_eq!(
            rejection_field("owner: missing field `email` at line 1 column 20"),
            "owner.email"
        );
        assert_eq!(rejection_field("expected value at line 1 column 1"), "body");
    }

    #[test]
    fn test_status_per_kind() {
        assert_eq!(
            Error::validation("name", "must not be empty").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::NotFound {
                entity: "alert",
                id: 1
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::ReferentialIntegrity {
                entity: "project",
                field: "project_id",
                id: 1
            }
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Conflict {
                message: "taken".to_string()
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::Config {
                message: "bad".to_string()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
