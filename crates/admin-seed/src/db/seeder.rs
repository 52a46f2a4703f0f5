//! Administrator seeding.

use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{AdminCredentials, DatabaseConfig, RoleSpec, SeedConfig};
use crate::models::{RoleStatus, SeedReport, SeededUser};
use crate::password::hash_password;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Password hashing error: {0}")]
    Hash(String),
}

/// Opens the single connection used for a seed run.
pub async fn connect(database: &DatabaseConfig) -> Result<PgConnection, SeedError> {
    let options = database.connect_options()?;
    PgConnection::connect_with(&options)
        .await
        .map_err(SeedError::Connect)
}

/// Connects, seeds, and closes the connection whatever the outcome.
pub async fn run(config: &SeedConfig) -> Result<SeedReport, SeedError> {
    let seeder = AdminSeeder::from_config(config);
    // Hash before connecting so the connection is never held across it.
    let password_hash = hash_password(&config.admin.password)?;

    let mut conn = connect(&config.database).await?;
    info!("Connected to database at {}", config.database.describe());

    let result = seeder.seed_with_hash(&mut conn, &password_hash).await;

    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection cleanly: {e}");
    }
    info!("Database connection closed");

    result
}

/// Ensures the administrator role and account exist.
///
/// Both statements run in one transaction: a failure in the user upsert
/// leaves no freshly inserted role behind.
pub struct AdminSeeder {
    role: RoleSpec,
    admin: AdminCredentials,
}

impl AdminSeeder {
    pub fn new(role: RoleSpec, admin: AdminCredentials) -> Self {
        Self { role, admin }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(config.role.clone(), config.admin.clone())
    }

    /// Hashes the bootstrap password and seeds both rows.
    pub async fn seed(&self, conn: &mut PgConnection) -> Result<SeedReport, SeedError> {
        let password_hash = hash_password(&self.admin.password)?;
        self.seed_with_hash(conn, &password_hash).await
    }

    async fn seed_with_hash(
        &self,
        conn: &mut PgConnection,
        password_hash: &str,
    ) -> Result<SeedReport, SeedError> {
        // Dropping an uncommitted transaction rolls it back.
        let mut tx = conn.begin().await?;

        let (role_status, role_name) = self.ensure_role(&mut tx).await?;
        let user = self.upsert_user(&mut tx, password_hash).await?;

        tx.commit().await?;

        let report = SeedReport {
            role_id: self.role.id,
            role_name,
            role_status,
            user,
        };
        match report.role_status {
            RoleStatus::Created => {
                info!("Role '{}' (id {}) created", report.role_name, report.role_id)
            }
            RoleStatus::AlreadyPresent => info!(
                "Role '{}' (id {}) already present, left unchanged",
                report.role_name, report.role_id
            ),
        }
        info!(
            "User {}: id={}, name={}, username={}",
            report.user_action(),
            report.user.id,
            report.user.name,
            report.user.username
        );

        Ok(report)
    }

    /// Inserts the well-known role; an existing row with that id is left as is.
    ///
    /// Returns the name actually stored under the role id.
    async fn ensure_role(
        &self,
        conn: &mut PgConnection,
    ) -> Result<(RoleStatus, String), SeedError> {
        let inserted: Option<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO roles (id, name, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(self.role.id)
        .bind(&self.role.name)
        .fetch_optional(&mut *conn)
        .await?;

        if inserted.is_some() {
            return Ok((RoleStatus::Created, self.role.name.clone()));
        }

        let stored: String = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(self.role.id)
            .fetch_one(&mut *conn)
            .await?;
        if stored != self.role.name {
            warn!(
                "Role id {} is stored as '{}', not the configured '{}'",
                self.role.id, stored, self.role.name
            );
        }

        Ok((RoleStatus::AlreadyPresent, stored))
    }

    /// Inserts the administrator, or refreshes only the password hash and
    /// `updated_at` of the row already holding this username.
    async fn upsert_user(
        &self,
        conn: &mut PgConnection,
        password_hash: &str,
    ) -> Result<SeededUser, SeedError> {
        // PostgreSQL-specific: the system column xmax is zero only for a row
        // version created by this INSERT, and holds the locking transaction id
        // when ON CONFLICT took the update path.
        let user = sqlx::query_as::<_, SeededUser>(
            r#"
            INSERT INTO users (name, username, password, role_id, online, created_at, updated_at)
            VALUES ($1, $2, $3, $4, false, NOW(), NOW())
            ON CONFLICT (username) DO UPDATE
            SET password = EXCLUDED.password,
                updated_at = NOW()
            RETURNING id, name, username, (xmax = 0) AS inserted
            "#,
        )
        .bind(&self.admin.name)
        .bind(&self.admin.username)
        .bind(password_hash)
        .bind(self.role.id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }
}
