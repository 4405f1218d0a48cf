use serde::Deserialize;

use crate::models::ActivityMode;

/// Status message the upstream uses for a successful call
pub const SUCCESS_MESSAGE: &str = "Ok";

/// JSON envelope wrapping one page of activity history.
///
/// Upstream leaves out `Response` on failures and `activities` on empty
/// pages, so both default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityHistory {
    #[serde(rename = "Response", default)]
    pub response: HistoryResponse,
    #[serde(rename = "ErrorStatus", default)]
    pub error_status: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub data: HistoryData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// RFC 3339 timestamp, parsed lazily so a bad value fails only its record
    pub period: String,
    pub activity_details: ActivityDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDetails {
    pub mode: ActivityMode,
}

impl ActivityHistory {
    pub fn is_ok(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }

    pub fn activities(&self) -> &[Activity] {
        &self.response.data.activities
    }
}
