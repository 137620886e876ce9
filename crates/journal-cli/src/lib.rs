//! # Journal CLI
//!
//! Out-of-band administration for the journal database: users and
//! disciplines are never created through the HTTP API, so this crate is the
//! supported way to provision them.
//!
//! ## Usage
//!
//! ```ignore
//! use journal_cli::seeder::{seed_all, SeedConfig};
//!
//! let report = seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod accounts;
pub mod seeder;
