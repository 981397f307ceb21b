//! # band-db
//!
//! PostgreSQL implementations of the `band-core` repository ports.
//!
//! - Connection pool and schema migrations
//! - `FromRow` models and model -> entity mappers
//! - Repositories and the transactional unit of work
//!
//! ```rust,ignore
//! use band_db::{create_pool, run_migrations, DatabaseConfig, PgBandRepository};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! run_migrations(&pool).await?;
//! let bands = PgBandRepository::new(pool.clone());
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccountRepository, PgBandRepository, PgInvitationRepository, PgMemberRepository,
    PgUnitOfWork,
};
