use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Failure of a single connectivity probe.
///
/// Secret retrieval, connection, and query failures all belong to the
/// database probe and are critical; DNS resolution failures are not.
/// The orchestrator captures these into probe results - they never escape
/// to the HTTP layer as errors.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to retrieve database credentials: {0}")]
    SecretRetrieval(#[from] SecretStoreError),

    #[error("database connection failed: {0}")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("database query failed: {0}")]
    DatabaseQuery(#[source] sqlx::Error),

    #[error("DNS resolution failed: {0}")]
    DnsResolution(#[source] std::io::Error),
}

/// Failure while fetching or decoding a secret payload.
#[derive(Debug, thiserror::Error)]
pub enum SecretStoreError {
    #[error("secret store request failed: {0}")]
    Request(String),

    #[error("secret has no string payload")]
    MissingSecretString,

    #[error("failed to parse secret payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Request handling error. Probe failures are reported on the status page
/// itself, so the only way a request can fail outright is template rendering.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Internal error: {:?}", self);
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
</head>
<body>
    <h1>Error {}</h1>
    <p>Internal server error</p>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16()
        );

        (status, Html(body)).into_response()
    }
}
