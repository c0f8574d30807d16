//! Write-only JSON dump of the session, mirroring the in-memory shapes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::timestamp;
use crate::domain::{Notification, Order};
use crate::error::ExportError;
use crate::store::DashboardState;

pub const EXPORT_FILE_NAME: &str = "customer-analytics-data.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSnapshot {
    pub orders: Vec<Order>,
    pub notifications: Vec<Notification>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl ExportSnapshot {
    /// Orders and notifications in store order, stamped with `now`.
    pub fn capture(state: &DashboardState, now: DateTime<Utc>) -> Self {
        Self {
            orders: state.orders.orders().to_vec(),
            notifications: state.notifications.entries().to_vec(),
            timestamp: now,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes `snapshot` to `<dir>/customer-analytics-data.json`.
#[instrument(skip(snapshot), fields(dir = %dir.display()))]
pub fn write_export(dir: &Path, snapshot: &ExportSnapshot) -> Result<PathBuf, ExportError> {
    let json = snapshot.to_json_pretty()?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        orders = snapshot.orders.len(),
        notifications = snapshot.notifications.len(),
        "Export written"
    );
    Ok(path)
}
