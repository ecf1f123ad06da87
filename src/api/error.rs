use reqwest::StatusCode;

/// Failure of a call to the contact backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Map a non-success HTTP status and its body text to an error.
    pub fn from_status(status: StatusCode, body: &str, resource: &str) -> Self {
        if status == StatusCode::NOT_FOUND {
            return ServiceError::NotFound(resource.to_string());
        }
        ServiceError::Server {
            status: status.as_u16(),
            message: error_message(body).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            }),
        }
    }
}

// Backends commonly answer `{"error": ".."}` or `{"message": ".."}`.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(json) => json
            .get("error")
            .or_else(|| json.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::from_status(status, "", err.url().map(|u| u.path()).unwrap_or(""))
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_resource() {
        let err = ServiceError::from_status(StatusCode::NOT_FOUND, "", "contacto 9");
        assert_eq!(err, ServiceError::NotFound("contacto 9".into()));
    }

    #[test]
    fn server_error_prefers_json_message() {
        let err = ServiceError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"db down"}"#,
            "contactos",
        );
        assert_eq!(
            err,
            ServiceError::Server {
                status: 500,
                message: "db down".into()
            }
        );
    }

    #[test]
    fn server_error_falls_back_to_plain_body_then_reason() {
        let err = ServiceError::from_status(StatusCode::BAD_GATEWAY, "upstream gone", "x");
        assert_eq!(
            err,
            ServiceError::Server {
                status: 502,
                message: "upstream gone".into()
            }
        );

        let err = ServiceError::from_status(StatusCode::BAD_REQUEST, "  ", "x");
        assert_eq!(
            err,
            ServiceError::Server {
                status: 400,
                message: "Bad Request".into()
            }
        );
    }
}
