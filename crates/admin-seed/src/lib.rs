//! Bootstrap of the administrator role and account.
//!
//! Running the seed any number of times leaves exactly one `admin` role and
//! one administrator user whose password hash matches the configured
//! bootstrap password.
//!
//! ```rust,ignore
//! use admin_seed::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let report = run(&config).await?;
//! println!("admin user id {}", report.user.id);
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod password;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{AdminCredentials, DatabaseConfig, RoleSpec, SeedConfig};
    pub use crate::db::{AdminSeeder, SeedError, connect, run};
    pub use crate::models::{AdminUser, Role, RoleStatus, SeedReport, SeededUser};
    pub use crate::password::{hash_password, verify_password};
}
