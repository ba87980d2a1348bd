use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::AppError,
    model::{attendance::{AttendanceRecord, round2}, role::Role},
    store::{Snapshot, Store},
    utils::clock::{Clock, local_date, working_hours},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[schema(example = 42)]
    pub total_employees: usize,
    /// Records dated today, whatever their status.
    #[schema(example = 37)]
    pub present_today: usize,
    #[schema(example = 1250)]
    pub total_attendance_records: usize,
    #[schema(example = 8.42)]
    pub avg_working_hours: f64,
}

/// Mean hours over records with both punches, from the timestamps.
fn avg_working_hours(records: &[AttendanceRecord]) -> f64 {
    let hours: Vec<f64> = records
        .iter()
        .filter_map(|a| a.punch_out.map(|out| working_hours(a.punch_in, out)))
        .collect();

    if hours.is_empty() {
        return 0.0;
    }
    round2(hours.iter().sum::<f64>() / hours.len() as f64)
}

pub fn summarize(data: &Snapshot, today: NaiveDate) -> Analytics {
    Analytics {
        total_employees: data.users.iter().filter(|u| u.role == Role::Employee).count(),
        present_today: data.attendance.iter().filter(|a| a.date == today).count(),
        total_attendance_records: data.attendance.len(),
        avg_working_hours: avg_working_hours(&data.attendance),
    }
}

/// Attendance analytics (admin, HR, manager)
#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Headline numbers", body = Analytics),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Analytics"
)]
pub async fn analytics(
    auth: AuthUser,
    store: web::Data<Store>,
    config: web::Data<Config>,
    clock: web::Data<dyn Clock>,
) -> Result<HttpResponse, AppError> {
    auth.require_staff()?;

    let today = local_date(clock.now(), config.utc_offset);
    let summary = store.read(|d| summarize(d, today));

    Ok(HttpResponse::Ok().json(summary))
}
