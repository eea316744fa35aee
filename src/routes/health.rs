//! Liveness endpoint for the gateway and container orchestration.
//!
//! Returns 200 OK whenever the process can answer HTTP at all. Connectivity
//! probing deliberately lives on the status page instead: a load balancer
//! restarting this service cannot fix a broken NAT gateway or RDS instance.

/// Liveness handler.
pub async fn health() -> &'static str {
    "ok"
}
