use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    PunchIn,
    PunchOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub user_id: u64,
    #[schema(example = "Punched in successfully")]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[schema(format = "date-time", value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(
        id: u64,
        user_id: u64,
        message: impl Into<String>,
        kind: NotificationKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            message: message.into(),
            kind,
            timestamp,
            read: false,
        }
    }
}
