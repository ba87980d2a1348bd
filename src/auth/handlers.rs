use crate::{
    auth::{jwt::generate_access_token, otp::OtpStore, password::verify_password},
    config::Config,
    error::AppError,
    model::user::{User, UserProfile},
    models::{LoginReqDto, LoginResponse, OtpChallenge, VerifyOtpReq},
    store::Store,
};
use actix_web::{HttpResponse, web};
use tracing::{debug, info, instrument, warn};

fn issue_token(user: &User, config: &Config) -> Result<HttpResponse, AppError> {
    let token = generate_access_token(
        user.id,
        user.username.clone(),
        user.role,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| {
        tracing::error!(error = %e, user_id = user.id, "Failed to sign token");
        AppError::Internal
    })?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token,
        user: UserProfile::from(user),
    }))
}

/// Login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token issued, or OTP challenge for admin/hr/manager", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "error": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, otps, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<Store>,
    config: web::Data<Config>,
    otps: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(AppError::BadRequest("Username or password required".into()));
    }

    let Some(account) = store.read(|d| d.user_by_username(&user.username).cloned()) else {
        info!("Invalid credentials: user not found");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    debug!(user_id = account.id, "Verifying password");
    let (password, hash) = (user.password.clone(), account.password.clone());
    let verified = web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|_| AppError::Internal)?;
    if let Err(e) = verified {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    if account.role.requires_otp() {
        let otp = otps.issue(account.id).await;
        // No mail transport; the code is only delivered through the log.
        warn!(user_id = account.id, name = %account.name, otp = %otp, "DEMO OTP issued");

        return Ok(HttpResponse::Ok().json(OtpChallenge {
            requires_otp: true,
            user_id: account.id,
            message: "OTP sent to your email".into(),
        }));
    }

    info!(user_id = account.id, "Login successful");
    issue_token(&account, &config)
}

/// Verify OTP
#[utoipa::path(
    post,
    path = "/api/verify-otp",
    request_body = VerifyOtpReq,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid or expired OTP", body = Object, example = json!({
            "error": "Invalid or expired OTP"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_verify_otp", skip(store, config, otps, req), fields(user_id = req.user_id))]
pub async fn verify_otp(
    req: web::Json<VerifyOtpReq>,
    store: web::Data<Store>,
    config: web::Data<Config>,
    otps: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    let invalid = || AppError::Unauthorized("Invalid or expired OTP".into());

    if !otps.verify(req.user_id, req.otp.trim()).await {
        info!("OTP rejected");
        return Err(invalid());
    }

    let account = store.read(|d| d.user(req.user_id).cloned()).ok_or_else(invalid)?;

    info!("OTP accepted, login successful");
    issue_token(&account, &config)
}
