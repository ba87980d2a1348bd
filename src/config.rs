use crate::model::office::{GeoPoint, OfficeLocation};
use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::{env, path::PathBuf, str::FromStr};

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub data_file: PathBuf,
    pub jwt_secret: String,
    pub access_token_ttl: usize,
    pub otp_ttl_secs: u64,

    // Geofence
    pub office_latitude: f64,
    pub office_longitude: f64,
    pub allowed_radius: u32,
    /// Offset of the office's wall clock from UTC. Day boundaries and the
    /// 09:00 / 10:10 / 18:00 thresholds are read in this offset.
    pub utc_offset: FixedOffset,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_otp_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub log_level: tracing::Level,
}

/// Reads `key`, falling back to `default` when unset. A set but unparsable
/// value is an error rather than a silent default.
fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| anyhow!("{key}={raw:?} is invalid: {e}"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let offset_minutes: i32 = var_or("OFFICE_UTC_OFFSET_MINUTES", "330")?;
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| anyhow!("OFFICE_UTC_OFFSET_MINUTES={offset_minutes} is out of range"))?;

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:3002")?,
            data_file: var_or("DATA_FILE", "data.json")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_ttl: var_or("ACCESS_TOKEN_TTL", "43200")?, // default 12 h
            otp_ttl_secs: var_or("OTP_TTL", "300")?,                 // default 5 min

            office_latitude: var_or("OFFICE_LATITUDE", "28.460315")?,
            office_longitude: var_or("OFFICE_LONGITUDE", "77.0336622")?,
            allowed_radius: var_or("ALLOWED_RADIUS", "200")?,
            utc_offset,

            rate_login_per_min: var_or("RATE_LOGIN_PER_MIN", "60")?,
            rate_otp_per_min: var_or("RATE_OTP_PER_MIN", "30")?,
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", "1000")?,

            api_prefix: var_or("API_PREFIX", "/api")?,
            log_dir: var_or("LOG_DIR", "logs")?,
            log_level: var_or("LOG_LEVEL", "debug")?,
        })
    }

    pub fn office(&self) -> OfficeLocation {
        OfficeLocation {
            center: GeoPoint::new(self.office_latitude, self.office_longitude),
            allowed_radius_m: self.allowed_radius,
        }
    }
}

#[cfg(test)]
pub fn test_config(data_file: PathBuf) -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        data_file,
        jwt_secret: "test-secret".into(),
        access_token_ttl: 3600,
        otp_ttl_secs: 300,
        office_latitude: 28.460315,
        office_longitude: 77.0336622,
        allowed_radius: 200,
        utc_offset: FixedOffset::east_opt(330 * 60).unwrap(),
        rate_login_per_min: 10_000,
        rate_otp_per_min: 10_000,
        rate_protected_per_min: 10_000,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
        log_level: tracing::Level::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_or_falls_back_and_rejects_garbage() {
        // Keys are unique to this test so parallel tests don't interfere.
        let v: u32 = var_or("GEO_ATT_TEST_UNSET_RADIUS", "200").unwrap();
        assert_eq!(v, 200);

        unsafe { env::set_var("GEO_ATT_TEST_BAD_RADIUS", "two hundred") };
        let err = var_or::<u32>("GEO_ATT_TEST_BAD_RADIUS", "200").unwrap_err();
        assert!(err.to_string().contains("GEO_ATT_TEST_BAD_RADIUS"));
    }

    #[test]
    fn office_combines_center_and_radius() {
        let c = test_config("data.json".into());
        let office = c.office();
        assert_eq!(office.center, GeoPoint::new(28.460315, 77.0336622));
        assert_eq!(office.allowed_radius_m, 200);
    }
}
