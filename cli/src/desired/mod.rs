//! Package desired state: manifest composition, extraction, and snapshots.
//!
//! The package-state path runs compose → extract → snapshot and shares no
//! runtime state with file reconciliation.
pub mod compose;
pub mod manifest;
pub mod snapshot;

/// `chrono` format of snapshot and composed-manifest timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Format `ts` with [`TIMESTAMP_FORMAT`] (second precision).
#[must_use]
pub fn format_timestamp(ts: &chrono::NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
