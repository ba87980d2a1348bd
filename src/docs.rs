use crate::api::analytics::Analytics;
use crate::api::attendance::{AttendanceWithName, PunchInResponse, PunchOutResponse, PunchRequest};
use crate::api::user::CreateUser;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::notification::{Notification, NotificationKind};
use crate::model::office::GeoPoint;
use crate::model::role::Role;
use crate::model::user::UserProfile;
use crate::models::{LoginReqDto, LoginResponse, OtpChallenge, VerifyOtpReq};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geofenced Attendance API",
        version = "1.0.0",
        description = r#"
## Geofenced Attendance Tracker

Employees punch in and out from their phones; a punch only counts when it
happens within the allowed radius of the office.

### Rules
- Punch-in opens at **09:00**; punching in after **10:10** is a late arrival (half day).
- At punch-out the day is settled: under 4 hours worked is **absent**, 4-6 hours is
  **half day**, otherwise late arrivals and departures before **18:00** are half days.
- One punch-in per employee per day.

### Security
Every endpoint except login is protected with **JWT Bearer authentication**.
Admin, HR and manager accounts confirm their login with a one-time password.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::verify_otp,

        crate::api::attendance::punch_in,
        crate::api::attendance::punch_out,
        crate::api::attendance::user_attendance,
        crate::api::attendance::all_attendance,

        crate::api::notification::list_notifications,
        crate::api::notification::mark_read,

        crate::api::user::list_users,
        crate::api::user::create_user,

        crate::api::analytics::analytics
    ),
    components(
        schemas(
            LoginReqDto,
            VerifyOtpReq,
            LoginResponse,
            OtpChallenge,
            UserProfile,
            Role,
            CreateUser,
            GeoPoint,
            PunchRequest,
            PunchInResponse,
            PunchOutResponse,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceWithName,
            NotificationKind,
            Notification,
            Analytics
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and OTP verification"),
        (name = "Attendance", description = "Punch in / punch out and attendance history"),
        (name = "Notification", description = "Per-user punch notifications"),
        (name = "User", description = "Account management"),
        (name = "Analytics", description = "Attendance analytics"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/login",
            "/api/verify-otp",
            "/api/punch-in",
            "/api/punch-out",
            "/api/attendance",
            "/api/attendance/{user_id}",
            "/api/notifications/{user_id}",
            "/api/notifications/{id}/read",
            "/api/users",
            "/api/analytics",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
        assert!(
            doc.components
                .unwrap()
                .security_schemes
                .contains_key("bearer_auth")
        );
    }
}
