use crate::{
    auth::{auth::AuthUser, password::hash_password},
    error::{AppError, StoreError},
    model::{
        role::Role,
        user::{User, UserProfile},
    },
    store::Store,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "emp002")]
    pub username: String,
    #[schema(example = "emp456")]
    pub password: String,
    #[schema(example = "Jane Roe")]
    pub name: String,
    #[schema(example = "jane@company.com", format = "email")]
    pub email: String,
    /// Defaults to `employee`.
    #[serde(default)]
    pub role: Role,
}

/// List users (admin, HR)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts without password hashes", body = [UserProfile]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "User"
)]
pub async fn list_users(
    auth: AuthUser,
    store: web::Data<Store>,
) -> Result<HttpResponse, AppError> {
    auth.require_user_manager()?;

    let users: Vec<UserProfile> = store.read(|d| d.users.iter().map(UserProfile::from).collect());
    Ok(HttpResponse::Ok().json(users))
}

/// Create a user (admin, HR)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User added", body = Object, example = json!({
            "success": true,
            "message": "User added successfully"
        })),
        (status = 400, description = "Missing fields or username taken", body = Object, example = json!({
            "error": "Username already exists"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "User"
)]
#[instrument(name = "create_user", skip_all, fields(by = auth.user_id, username = %payload.username))]
pub async fn create_user(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<CreateUser>,
) -> Result<HttpResponse, AppError> {
    auth.require_user_manager()?;

    let CreateUser {
        username,
        password,
        name,
        email,
        role,
    } = payload.into_inner();

    let username = username.trim().to_string();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password must not be empty".into(),
        ));
    }

    let taken = || AppError::BadRequest("Username already exists".into());
    if store.read(|d| d.user_by_username(&username).is_some()) {
        return Err(taken());
    }

    // Hash outside the store lock; uniqueness is re-checked inside the update.
    let hashed = web::block(move || hash_password(&password))
        .await
        .map_err(|_| StoreError::Blocking)?
        .map_err(|_| StoreError::Hash)?;

    let id = store
        .into_inner()
        .update_blocking(move |d| -> Result<u64, AppError> {
            if d.user_by_username(&username).is_some() {
                return Err(taken());
            }
            let id = d.next_id();
            d.users.push(User {
                id,
                username,
                password: hashed,
                name: name.trim().to_string(),
                role,
                email: email.trim().to_string(),
            });
            Ok(id)
        })
        .await?;

    info!(user_id = id, %role, "User added");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User added successfully"
    })))
}
