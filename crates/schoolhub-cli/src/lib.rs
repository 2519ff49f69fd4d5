//! # SchoolHub CLI
//!
//! Administrative tasks run against the database directly: creating admin
//! accounts and seeding fake teachers and students for development.
//!
//! ```ignore
//! use schoolhub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10).with_students_per_teacher(20);
//! seed_all(&pool, &config).await?;
//! ```

pub mod admin;
pub mod seeder;
