use thiserror::Error;

/// Coarse failure category seen by callers of the clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UpstreamUnavailable,
}

/// Any failure to get usable data out of the upstream API.
///
/// Bad status, transport errors and malformed payloads all collapse into
/// the same kind; the detail string is only for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl FetchError {
    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(detail.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(format!("transport error: {err}"))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::UpstreamUnavailable(format!("malformed payload: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_collapse_to_upstream_unavailable() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();

        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(err.to_string().contains("malformed payload"));
    }
}
