use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    #[default]
    Employee,
}

impl Role {
    /// Stable numeric id carried in access tokens.
    pub fn id(self) -> u8 {
        match self {
            Role::Admin => 1,
            Role::Hr => 2,
            Role::Manager => 3,
            Role::Employee => 4,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Manager),
            4 => Some(Role::Employee),
            _ => None,
        }
    }

    /// Admin, HR and managers: may read everyone's attendance and analytics.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Hr | Role::Manager)
    }

    /// Admin and HR: may list and create accounts.
    pub fn manages_users(self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }

    /// Privileged roles sign in with a one-time password as a second step.
    pub fn requires_otp(self) -> bool {
        self.is_staff()
    }
}
