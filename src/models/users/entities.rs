use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    #[ts(export, export_to = "user.ts")]
    pub enum UserRole {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
        Parent => "parent",
        Staff => "staff",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }

    /// Roles allowed to manage academic records.
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Teacher]
    }

    /// Roles allowed to handle money and stock.
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff]
    }

    pub fn school_staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff, &Self::Teacher]
    }

    pub fn is_staff_member(&self) -> bool {
        matches!(self, Self::Admin | Self::Teacher | Self::Staff)
    }
}

string_enum! {
    #[ts(export, export_to = "user.ts")]
    pub enum UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role.as_str())
            .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}
