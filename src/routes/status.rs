//! Status page handler.
//!
//! Runs the configured probe sequence and renders the result as an HTML
//! page: 200 when every critical probe passed, 500 otherwise. The report is
//! built fresh on every request and discarded once rendered.

use axum::{extract::State, http::StatusCode, response::Html};
use serde::Serialize;
use tracing::instrument;

use crate::config::STATUS_OK_MESSAGE;
use crate::error::AppError;
use crate::probe::{run_health_checks, HealthReport, Overall, ProbeSpec, ProbeStatus};
use crate::state::AppState;

/// One table row on the status page.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct StatusRow {
    label: String,
    value: String,
    ok: bool,
}

/// Status page handler.
#[instrument(name = "status::index", skip(state))]
pub async fn index(
    State(state): State<AppState>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let report = run_health_checks(&state.probes).await;
    let (status, context) = page_context(&state.probes, &report);

    let html = state.tera.render("status.html", &context)?;
    Ok((status, Html(html)))
}

/// Build the HTTP status and template context for a finished report.
///
/// On failure the page deliberately shows each probe's offline text rather
/// than raw probe details, with the triggering error message in a separate
/// paragraph - the per-row details of a failed report are skip markers and
/// error strings, not presentable values.
fn page_context(specs: &[ProbeSpec], report: &HealthReport) -> (StatusCode, tera::Context) {
    let ok = report.overall == Overall::Ok;

    let rows: Vec<StatusRow> = specs
        .iter()
        .zip(&report.probes)
        .map(|(spec, result)| StatusRow {
            label: spec.label.clone(),
            value: if ok {
                result.detail.clone()
            } else {
                spec.offline_detail.clone()
            },
            ok: ok && result.status == ProbeStatus::Ok,
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("ok", &ok);
    context.insert("rows", &rows);
    if ok {
        context.insert("message", STATUS_OK_MESSAGE);
    }
    if let Some(message) = report.failure_message() {
        context.insert("error", message);
    }

    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::Probe;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Probe for Unreachable {
        async fn execute(&self) -> Result<String, ProbeError> {
            unreachable!("specs in these tests are never executed")
        }
    }

    fn specs() -> Vec<ProbeSpec> {
        vec![
            ProbeSpec::critical("database", "Database Time", "Not connected to RDS", Unreachable),
            ProbeSpec::non_critical("dns", "Google IP", "Not connected to Internet", Unreachable),
        ]
    }

    fn report(overall: Overall, probes: Vec<(&str, ProbeStatus, &str)>) -> HealthReport {
        let probes = probes
            .into_iter()
            .map(|(name, status, detail)| crate::probe::ProbeResult {
                name: name.to_string(),
                status,
                detail: detail.to_string(),
            })
            .collect();
        HealthReport { overall, probes }
    }

    #[test]
    fn healthy_report_renders_probe_details() {
        let report = report(
            Overall::Ok,
            vec![
                ("database", ProbeStatus::Ok, "2024-01-01 00:00:00"),
                ("dns", ProbeStatus::Ok, "142.250.64.100"),
            ],
        );

        let (status, context) = page_context(&specs(), &report);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(context.get("ok").unwrap(), &tera::Value::Bool(true));
        assert_eq!(
            context.get("message").unwrap().as_str().unwrap(),
            STATUS_OK_MESSAGE
        );
        let rows = context.get("rows").unwrap().as_array().unwrap();
        assert_eq!(rows[0]["value"], "2024-01-01 00:00:00");
        assert_eq!(rows[1]["value"], "142.250.64.100");
        assert!(context.get("error").is_none());
    }

    #[test]
    fn dns_fallback_keeps_page_healthy() {
        let report = report(
            Overall::Ok,
            vec![
                ("database", ProbeStatus::Ok, "2024-01-01 00:00:00"),
                ("dns", ProbeStatus::Failed, "Not connected to Internet"),
            ],
        );

        let (status, context) = page_context(&specs(), &report);

        assert_eq!(status, StatusCode::OK);
        let rows = context.get("rows").unwrap().as_array().unwrap();
        assert_eq!(rows[1]["value"], "Not connected to Internet");
        assert_eq!(rows[1]["ok"], false);
        assert!(context.get("error").is_none());
    }

    #[test]
    fn failed_report_shows_offline_rows_and_error() {
        let report = report(
            Overall::Error,
            vec![
                ("database", ProbeStatus::Failed, "connect ECONNREFUSED 10.0.0.12:3306"),
                ("dns", ProbeStatus::Failed, crate::probe::SKIPPED_DETAIL),
            ],
        );

        let (status, context) = page_context(&specs(), &report);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(context.get("ok").unwrap(), &tera::Value::Bool(false));
        let rows = context.get("rows").unwrap().as_array().unwrap();
        assert_eq!(rows[0]["value"], "Not connected to RDS");
        assert_eq!(rows[1]["value"], "Not connected to Internet");
        assert_eq!(
            context.get("error").unwrap().as_str().unwrap(),
            "connect ECONNREFUSED 10.0.0.12:3306"
        );
        assert!(context.get("message").is_none());
    }
}
