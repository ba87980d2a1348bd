use crate::model::office::GeoPoint;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    HalfDay,
    Absent,
}

/// One employee's attendance for one office-local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = 17)]
    pub id: u64,
    #[schema(example = 4)]
    pub employee_id: u64,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "2026-01-05T03:35:00Z", format = "date-time", value_type = String)]
    pub punch_in: DateTime<Utc>,
    pub location: GeoPoint,
    #[schema(example = "2026-01-05T12:40:00Z", format = "date-time", value_type = String, nullable = true)]
    pub punch_out: Option<DateTime<Utc>>,
    #[schema(nullable = true)]
    pub punch_out_location: Option<GeoPoint>,
    /// Whole meters from the office at punch-in.
    #[schema(example = 12)]
    pub distance: u32,
    pub status: AttendanceStatus,
    #[schema(example = 9.08, nullable = true)]
    pub working_hours: Option<f64>,
}

impl AttendanceRecord {
    pub fn open(
        id: u64,
        employee_id: u64,
        date: NaiveDate,
        punch_in: DateTime<Utc>,
        location: GeoPoint,
        distance: u32,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id,
            employee_id,
            date,
            punch_in,
            location,
            punch_out: None,
            punch_out_location: None,
            distance,
            status,
            working_hours: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.punch_out.is_none()
    }

    /// Records the punch-out. A closed record is never reopened or rewritten,
    /// so this returns `false` and leaves the record untouched if already closed.
    pub fn close(
        &mut self,
        at: DateTime<Utc>,
        location: GeoPoint,
        status: AttendanceStatus,
        working_hours: f64,
    ) -> bool {
        if !self.is_open() {
            return false;
        }
        self.punch_out = Some(at);
        self.punch_out_location = Some(location);
        self.status = status;
        self.working_hours = Some(round2(working_hours));
        true
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
