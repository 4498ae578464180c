//! # Free Learn DB
//!
//! Persistence gateway for the Free Learn API.
//!
//! Services talk to the [`UserRepository`] and [`CourseRepository`] traits.
//! Two implementations exist:
//!
//! - [`PostgresStore`]: the production backend, one row per document
//! - [`MemoryStore`]: a process-local backend for tests and local runs
//!
//! Every mutation that guards an invariant (unique email, one rating per
//! user, creator-only edits, set-like enrollment) is a single conditional
//! write, so concurrent requests cannot slip between a check and a write.
//!
//! # Example
//!
//! ```ignore
//! use freelearn_db::{PostgresStore, init_db_pool};
//!
//! let pool = init_db_pool(&config.database).await?;
//! let store = PostgresStore::new(pool, config.database.timeout());
//! store.migrate().await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{PostgresStore, init_db_pool};
pub use repository::{CourseRepository, UserRepository};

pub use sqlx::PgPool;
