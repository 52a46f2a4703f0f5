use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A row of the `users` table. `password` holds the PHC hash.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role_id: i32,
    pub online: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Row returned by the user upsert.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SeededUser {
    pub id: i32,
    pub name: String,
    pub username: String,
    /// True when the row was inserted, false when an existing row was updated.
    pub inserted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleStatus {
    Created,
    AlreadyPresent,
}

impl RoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Created => "created",
            RoleStatus::AlreadyPresent => "already present",
        }
    }
}

/// Outcome of one seed run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub role_id: i32,
    pub role_name: String,
    pub role_status: RoleStatus,
    pub user: SeededUser,
}

impl SeedReport {
    pub fn user_action(&self) -> &'static str {
        if self.user.inserted {
            "created"
        } else {
            "updated"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(inserted: bool) -> SeedReport {
        SeedReport {
            role_id: 1,
            role_name: "admin".to_string(),
            role_status: RoleStatus::Created,
            user: SeededUser {
                id: 7,
                name: "Administrador".to_string(),
                username: "admin".to_string(),
                inserted,
            },
        }
    }

    #[test]
    fn test_user_action() {
        assert_eq!(report(true).user_action(), "created");
        assert_eq!(report(false).user_action(), "updated");
    }

    #[test]
    fn test_role_status_str() {
        assert_eq!(RoleStatus::Created.as_str(), "created");
        assert_eq!(RoleStatus::AlreadyPresent.as_str(), "already present");
    }
}
