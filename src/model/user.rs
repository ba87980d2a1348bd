use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored account. `password` holds an argon2 PHC string, never plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub email: String,
}

/// Account as exposed over the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    #[schema(example = 4)]
    pub id: u64,
    #[schema(example = "emp001")]
    pub username: String,
    #[schema(example = "John Doe")]
    pub name: String,
    pub role: Role,
    #[schema(example = "john@company.com")]
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            name: u.name.clone(),
            role: u.role,
            email: u.email.clone(),
        }
    }
}
