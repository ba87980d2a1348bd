use crate::{
    auth::jwt::verify_token, config::Config, error::AppError, model::role::Role,
};
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, dev::Payload, http::header::HeaderValue, web::Data,
};
use futures::future::{Ready, ready};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

/// Resolves the caller from an `Authorization: Bearer <jwt>` header.
pub fn authenticate(header: Option<&HeaderValue>, secret: &str) -> Result<AuthUser, AppError> {
    let token = header
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No token provided".into()))?;

    let claims = verify_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        AppError::Unauthorized("Invalid token".into())
    })?;

    let role = Role::from_id(claims.role)
        .ok_or_else(|| AppError::Unauthorized("Invalid token".into()))?;

    Ok(AuthUser {
        user_id: claims.user_id,
        username: claims.sub,
        role,
    })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Set by `auth_middleware` on protected scopes.
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let Some(config) = req.app_data::<Data<Config>>() else {
            tracing::error!("Config is not registered as app data");
            return ready(Err(AppError::Internal));
        };

        ready(authenticate(
            req.headers().get("Authorization"),
            &config.jwt_secret,
        ))
    }
}

impl AuthUser {
    /// Admin, HR or manager.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_user_manager(&self) -> Result<(), AppError> {
        if self.role.manages_users() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Employees may only look at their own data; staff may look at anyone's.
    pub fn require_self_or_staff(&self, user_id: u64) -> Result<(), AppError> {
        if self.user_id == user_id || self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;

    fn header(v: &str) -> HeaderValue {
        HeaderValue::from_str(v).unwrap()
    }

    #[test]
    fn missing_or_malformed_header() {
        let err = authenticate(None, "k").unwrap_err();
        assert_eq!(err.to_string(), "No token provided");

        let err = authenticate(Some(&header("Token abc")), "k").unwrap_err();
        assert_eq!(err.to_string(), "No token provided");
    }

    #[test]
    fn bad_token() {
        let err = authenticate(Some(&header("Bearer abc.def.ghi")), "k").unwrap_err();
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn valid_token_resolves_user() {
        let token = generate_access_token(3, "mgr001".into(), Role::Manager, "k", 60).unwrap();
        let user = authenticate(Some(&header(&format!("Bearer {token}"))), "k").unwrap();
        assert_eq!(user.user_id, 3);
        assert_eq!(user.username, "mgr001");
        assert_eq!(user.role, Role::Manager);
        assert!(user.require_staff().is_ok());
        assert!(user.require_user_manager().is_err());
        assert!(user.require_self_or_staff(4).is_ok());
    }

    #[actix_web::test]
    async fn extractor_without_config_is_a_server_error() {
        let req = actix_web::test::TestRequest::get().to_http_request();
        let err = AuthUser::extract(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Internal));
    }

    #[actix_web::test]
    async fn extractor_prefers_middleware_user() {
        let req = actix_web::test::TestRequest::get().to_http_request();
        req.extensions_mut().insert(AuthUser {
            user_id: 2,
            username: "hr001".into(),
            role: Role::Hr,
        });
        let user = AuthUser::extract(&req).await.unwrap();
        assert_eq!(user.username, "hr001");
        assert_eq!(user.role, Role::Hr);
    }

    #[test]
    fn employees_only_see_themselves() {
        let user = AuthUser {
            user_id: 4,
            username: "emp001".into(),
            role: Role::Employee,
        };
        assert!(user.require_self_or_staff(4).is_ok());
        assert!(user.require_self_or_staff(5).is_err());
        assert!(user.require_staff().is_err());
    }
}
