use crate::engine::geo::geofence;
use crate::error::AttendanceError;
use crate::model::attendance::AttendanceStatus;
use crate::model::office::{GeoPoint, OfficeLocation};

/// 09:00, earliest accepted punch-in.
pub const EARLIEST_PUNCH_IN: u32 = 9 * 60;
/// 10:10, punching in after this is a late arrival.
pub const LATE_AFTER: u32 = 10 * 60 + 10;
/// 18:00, punching out before this is an early departure.
pub const DAY_END: u32 = 18 * 60;

pub const ABSENT_BELOW_HOURS: f64 = 4.0;
pub const FULL_DAY_HOURS: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PunchInVerdict {
    pub status: AttendanceStatus,
    pub distance: u32,
}

impl PunchInVerdict {
    pub fn message(&self) -> &'static str {
        match self.status {
            AttendanceStatus::HalfDay => "Punched in successfully (Late arrival - Half day)",
            _ => "Punched in successfully",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchOutVerdict {
    pub status: AttendanceStatus,
    pub message: &'static str,
}

/// Decides whether a punch-in is accepted and with which provisional status.
///
/// The geofence is checked before the clock, so an out-of-range location is
/// always reported as such regardless of the time of day.
pub fn evaluate_punch_in(
    now_minutes: u32,
    location: GeoPoint,
    office: &OfficeLocation,
) -> Result<PunchInVerdict, AttendanceError> {
    let distance = geofence(location, office)?;

    if now_minutes < EARLIEST_PUNCH_IN {
        return Err(AttendanceError::TooEarly);
    }

    let status = if now_minutes > LATE_AFTER {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    };

    Ok(PunchInVerdict { status, distance })
}

/// Final status of a day, from the office-local punch-in minute, the
/// office-local punch-out minute and the hours worked in between.
pub fn evaluate_punch_out(
    punch_in_minutes: u32,
    now_minutes: u32,
    working_hours: f64,
) -> PunchOutVerdict {
    use AttendanceStatus::*;

    let (status, message) = if working_hours < ABSENT_BELOW_HOURS {
        (Absent, "Punched out - Marked as Absent (Less than 4 hours)")
    } else if working_hours < FULL_DAY_HOURS {
        (HalfDay, "Punched out - Half Day (4-6 hours worked)")
    } else if punch_in_minutes > LATE_AFTER {
        (HalfDay, "Punched out - Half Day (Late arrival)")
    } else if punch_in_minutes >= EARLIEST_PUNCH_IN && now_minutes >= DAY_END {
        (Present, "Punched out successfully - Present")
    } else if now_minutes < DAY_END {
        (HalfDay, "Punched out - Half Day (Early departure)")
    } else {
        // Punch-in before 09:00 with a full day worked. No rung names this
        // case; it keeps the default verdict.
        (Present, "Punched out successfully")
    };

    PunchOutVerdict { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttendanceStatus::*;

    const OFFICE: OfficeLocation = OfficeLocation {
        center: GeoPoint::new(28.460315, 77.0336622),
        allowed_radius_m: 200,
    };

    fn at_office() -> GeoPoint {
        OFFICE.center
    }

    #[test]
    fn punch_in_at_nine_oh_five_on_site_is_present() {
        let v = evaluate_punch_in(545, at_office(), &OFFICE).unwrap();
        assert_eq!(
            v,
            PunchInVerdict {
                status: Present,
                distance: 0
            }
        );
        assert_eq!(v.message(), "Punched in successfully");
    }

    #[test]
    fn punch_in_before_nine_is_too_early() {
        assert_eq!(
            evaluate_punch_in(539, at_office(), &OFFICE),
            Err(AttendanceError::TooEarly)
        );
        assert!(evaluate_punch_in(540, at_office(), &OFFICE).is_ok());
    }

    #[test]
    fn punch_in_status_by_minute() {
        for minute in [540, 575, 600, 610] {
            let v = evaluate_punch_in(minute, at_office(), &OFFICE).unwrap();
            assert_eq!(v.status, Present, "minute {minute}");
        }
        for minute in [611, 700, 1080, 1439] {
            let v = evaluate_punch_in(minute, at_office(), &OFFICE).unwrap();
            assert_eq!(v.status, HalfDay, "minute {minute}");
            assert_eq!(v.message(), "Punched in successfully (Late arrival - Half day)");
        }
    }

    #[test]
    fn out_of_range_wins_at_any_time() {
        let far = GeoPoint::new(28.47, 77.0336622);
        for minute in [0, 539, 540, 611, 1439] {
            match evaluate_punch_in(minute, far, &OFFICE) {
                Err(AttendanceError::OutOfRange { distance, radius }) => {
                    assert!(distance > radius);
                    assert_eq!(radius, 200);
                }
                other => panic!("minute {minute}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn punch_out_ladder() {
        // (punch_in, now, hours, status, message)
        let cases = [
            (570, 804, 3.9, Absent, "Punched out - Marked as Absent (Less than 4 hours)"),
            (570, 810, 4.0, HalfDay, "Punched out - Half Day (4-6 hours worked)"),
            (570, 924, 5.9, HalfDay, "Punched out - Half Day (4-6 hours worked)"),
            (600, 960, 6.0, HalfDay, "Punched out - Half Day (Early departure)"),
            (611, 1100, 6.0, HalfDay, "Punched out - Half Day (Late arrival)"),
            (700, 1200, 8.3, HalfDay, "Punched out - Half Day (Late arrival)"),
            (570, 1080, 6.0, Present, "Punched out successfully - Present"),
            (540, 1080, 9.0, Present, "Punched out successfully - Present"),
            (610, 1200, 9.8, Present, "Punched out successfully - Present"),
            (570, 1079, 8.5, HalfDay, "Punched out - Half Day (Early departure)"),
        ];

        for (punch_in, now, hours, status, message) in cases {
            let v = evaluate_punch_out(punch_in, now, hours);
            assert_eq!(
                v,
                PunchOutVerdict { status, message },
                "punch_in={punch_in} now={now} hours={hours}"
            );
        }
    }

    #[test]
    fn short_hours_override_arrival_time() {
        assert_eq!(evaluate_punch_out(700, 900, 3.0).status, Absent);
        assert_eq!(evaluate_punch_out(570, 1200, 5.0).status, HalfDay);
    }

    #[test]
    fn unnamed_fallthrough_defaults_to_present() {
        // Punch-in at 08:30 (only possible for records not created through
        // punch-in), full day worked, out after 18:00.
        let v = evaluate_punch_out(510, 1090, 9.6);
        assert_eq!(v.status, Present);
        assert_eq!(v.message, "Punched out successfully");
    }
}
