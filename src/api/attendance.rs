use crate::{
    auth::auth::AuthUser,
    config::Config,
    engine::{evaluate_punch_in, evaluate_punch_out, geofence},
    error::{AppError, AttendanceError},
    model::{
        attendance::{AttendanceRecord, AttendanceStatus, round2},
        notification::{Notification, NotificationKind},
        office::GeoPoint,
    },
    store::Store,
    utils::clock::{Clock, local_date, minutes_since_midnight, working_hours},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PunchRequest {
    #[schema(example = 28.460315)]
    pub latitude: f64,
    #[schema(example = 77.0336622)]
    pub longitude: f64,
}

impl From<&PunchRequest> for GeoPoint {
    fn from(p: &PunchRequest) -> Self {
        GeoPoint::new(p.latitude, p.longitude)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PunchInResponse {
    pub success: bool,
    #[schema(example = "Punched in successfully")]
    pub message: String,
    #[schema(example = 12)]
    pub distance: u32,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchOutResponse {
    pub success: bool,
    #[schema(example = "Punched out successfully - Present")]
    pub message: String,
    pub status: AttendanceStatus,
    #[schema(example = 9.08)]
    pub working_hours: f64,
}

/// Attendance record joined with the owner's display name.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithName {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    #[schema(example = "John Doe")]
    pub user_name: String,
}

/// Punch in
#[utoipa::path(
    post,
    path = "/api/punch-in",
    request_body = PunchRequest,
    responses(
        (status = 200, description = "Punched in", body = PunchInResponse),
        (status = 400, description = "Invalid coordinates, out of range, before 9:00 AM, or already punched in today", body = Object, example = json!({
            "error": "Already punched in today"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(name = "punch_in", skip_all, fields(user_id = auth.user_id, username = %auth.username))]
pub async fn punch_in(
    auth: AuthUser,
    store: web::Data<Store>,
    config: web::Data<Config>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<PunchRequest>,
) -> Result<HttpResponse, AppError> {
    let now = clock.now();
    let today = local_date(now, config.utc_offset);
    let minutes = minutes_since_midnight(now, config.utc_offset);
    let location = GeoPoint::from(&*payload);
    let office = config.office();
    let user_id = auth.user_id;

    let verdict = store.into_inner().update_blocking(move |data| -> Result<_, AppError> {
        if data.record_for_day(user_id, today).is_some() {
            return Err(AttendanceError::DuplicatePunchIn.into());
        }

        let verdict = evaluate_punch_in(minutes, location, &office)?;

        let record_id = data.next_id();
        data.attendance.push(AttendanceRecord::open(
            record_id,
            user_id,
            today,
            now,
            location,
            verdict.distance,
            verdict.status,
        ));

        let notification_id = data.next_id();
        data.notifications.push(Notification::new(
            notification_id,
            user_id,
            verdict.message(),
            NotificationKind::PunchIn,
            now,
        ));

        Ok(verdict)
    })
    .await;

    let verdict = match verdict {
        Ok(v) => v,
        Err(e) => {
            info!(reason = %e, minutes, "Punch-in rejected");
            return Err(e);
        }
    };

    info!(
        status = %verdict.status,
        distance = verdict.distance,
        minutes,
        "Punched in"
    );

    Ok(HttpResponse::Ok().json(PunchInResponse {
        success: true,
        message: verdict.message().to_string(),
        distance: verdict.distance,
        status: verdict.status,
    }))
}

/// Punch out
#[utoipa::path(
    post,
    path = "/api/punch-out",
    request_body = PunchRequest,
    responses(
        (status = 200, description = "Punched out with the day's final status", body = PunchOutResponse),
        (status = 400, description = "Invalid coordinates, out of range, or no open punch-in today", body = Object, example = json!({
            "error": "No punch in record found"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(name = "punch_out", skip_all, fields(user_id = auth.user_id, username = %auth.username))]
pub async fn punch_out(
    auth: AuthUser,
    store: web::Data<Store>,
    config: web::Data<Config>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<PunchRequest>,
) -> Result<HttpResponse, AppError> {
    let now = clock.now();
    let offset = config.utc_offset;
    let today = local_date(now, offset);
    let now_minutes = minutes_since_midnight(now, offset);
    let location = GeoPoint::from(&*payload);
    let office = config.office();
    let user_id = auth.user_id;

    let result = store.into_inner().update_blocking(move |data| -> Result<_, AppError> {
        let record = data
            .open_record_mut(user_id, today)
            .ok_or(AttendanceError::NoOpenPunchIn)?;

        geofence(location, &office)?;

        let hours = working_hours(record.punch_in, now);
        let punch_in_minutes = minutes_since_midnight(record.punch_in, offset);
        let verdict = evaluate_punch_out(punch_in_minutes, now_minutes, hours);

        record.close(now, location, verdict.status, hours);

        let notification_id = data.next_id();
        data.notifications.push(Notification::new(
            notification_id,
            user_id,
            verdict.message,
            NotificationKind::PunchOut,
            now,
        ));

        Ok((verdict, round2(hours)))
    })
    .await;

    let (verdict, hours) = match result {
        Ok(v) => v,
        Err(e) => {
            info!(reason = %e, minutes = now_minutes, "Punch-out rejected");
            return Err(e);
        }
    };

    info!(status = %verdict.status, working_hours = hours, "Punched out");

    Ok(HttpResponse::Ok().json(PunchOutResponse {
        success: true,
        message: verdict.message.to_string(),
        status: verdict.status,
        working_hours: hours,
    }))
}

/// Attendance history of one user, newest day first
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Employees may only read their own records")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn user_attendance(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    auth.require_self_or_staff(user_id)?;

    let mut records: Vec<AttendanceRecord> = store.read(|d| {
        d.attendance
            .iter()
            .filter(|a| a.employee_id == user_id)
            .cloned()
            .collect()
    });
    records.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(HttpResponse::Ok().json(records))
}

/// All attendance records with user names (admin, HR, manager)
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records", body = [AttendanceWithName]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(
    auth: AuthUser,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    auth.require_staff()?;

    let rows: Vec<AttendanceWithName> = store.read(|d| {
        d.attendance
            .iter()
            .map(|a| AttendanceWithName {
                record: a.clone(),
                user_name: d
                    .user(a.employee_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect()
    });

    Ok(HttpResponse::Ok().json(rows))
}
