use crate::model::user::UserProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "emp001")]
    pub username: String,
    #[schema(example = "emp123")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpReq {
    #[schema(example = 1)]
    pub user_id: u64,
    #[schema(example = "482913")]
    pub otp: String,
}

/// Issued token plus the caller's profile.
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

/// Returned instead of a token to roles that need a second factor.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpChallenge {
    #[serde(rename = "requiresOTP")]
    pub requires_otp: bool,
    pub user_id: u64,
    #[schema(example = "OTP sent to your email")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
}
