//! Database integration for the administrator seed.
//!
//! [`run`] owns the whole lifecycle of a seed: one connection, one
//! transaction, and a guaranteed close. [`AdminSeeder`] holds the statements
//! and can be driven against a caller-owned connection.

mod seeder;

pub use seeder::{AdminSeeder, SeedError, connect, run};
