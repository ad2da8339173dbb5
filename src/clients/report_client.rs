use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::{ApiCall, Transport};
use crate::domain::{DateRange, PAYMENT_SUCCEEDED};
use crate::error::ReportError;

/// A downloadable PDF report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportKind {
    PaymentsForOrder(String),
    PaymentsForCustomer(String),
    PaymentsInRange(DateRange),
    /// `success` is accepted as an alias for the backend's `succeeded`.
    PaymentsByStatus(String),
    User(String),
    Role(String),
}

impl ReportKind {
    pub fn call(&self) -> ApiCall {
        match self {
            ReportKind::PaymentsForOrder(id) => payments_report(&["order", id.as_str()]),
            ReportKind::PaymentsForCustomer(email) => payments_report(&["user", email.as_str()]),
            ReportKind::PaymentsInRange(range) => {
                let mut call = payments_report(&["date-range"]);
                call.query.extend(range.query("startDate", "endDate"));
                call
            }
            ReportKind::PaymentsByStatus(status) => {
                let status = backend_status(status);
                payments_report(&["status", status.as_str()])
            }
            ReportKind::User(id) => ApiCall::get(["api", "reports", "users", id.as_str()]).binary(),
            ReportKind::Role(role) => ApiCall::get(["api", "reports", "roles", role.as_str()]).binary(),
        }
    }

    /// Default file name for the saved PDF.
    pub fn file_name(&self) -> String {
        let stem = match self {
            ReportKind::PaymentsForOrder(id) => format!("payment-report-order-{}", id),
            ReportKind::PaymentsForCustomer(email) => format!("payment-report-user-{}", email),
            ReportKind::PaymentsInRange(range) => {
                format!("payment-report-{}-to-{}", range.start.format("%Y-%m-%d"), range.end.format("%Y-%m-%d"))
            }
            ReportKind::PaymentsByStatus(status) => format!("payment-report-status-{}", backend_status(status)),
            ReportKind::User(id) => format!("user-report-{}", id),
            ReportKind::Role(role) => format!("role-report-{}", role),
        };
        let safe: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@') { c } else { '_' })
            .collect();
        format!("{}.pdf", safe)
    }
}

fn payments_report(tail: &[&str]) -> ApiCall {
    ApiCall::get(["api", "payments", "reports"].iter().chain(tail))
        .payments()
        .binary()
}

fn backend_status(status: &str) -> String {
    if status.eq_ignore_ascii_case("success") {
        PAYMENT_SUCCEEDED.to_string()
    } else {
        status.to_lowercase()
    }
}

#[derive(Clone)]
pub struct ReportClient {
    transport: Arc<dyn Transport>,
}

impl ReportClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn download(&self, kind: ReportKind) -> Result<Vec<u8>, ReportError> {
        let bytes = self.transport.execute(kind.call()).await?.bytes()?;
        if bytes.is_empty() {
            return Err(ReportError::EmptyReport);
        }
        info!(bytes = bytes.len(), "Report downloaded");
        Ok(bytes)
    }
}

/// Writes a downloaded report into `dir`, returning the full path.
#[instrument(skip(bytes, dir), fields(dir = %dir.as_ref().display()))]
pub async fn save_report(bytes: &[u8], dir: impl AsRef<Path>, name: &str) -> Result<PathBuf, ReportError> {
    if bytes.is_empty() {
        return Err(ReportError::EmptyReport);
    }
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await?;
    info!(path = %path.display(), "Report saved");
    Ok(path)
}
