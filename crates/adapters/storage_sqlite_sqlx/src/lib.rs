//! # kaddem-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository and transaction port traits defined in
//!   `kaddem-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `kaddem-app` (for port traits) and `kaddem-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod contract_repo;
mod department_repo;
mod error;
mod pool;
mod student_repo;
mod team_repo;
mod unit_of_work;

pub use contract_repo::SqliteContractRepository;
pub use department_repo::SqliteDepartmentRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use student_repo::SqliteStudentRepository;
pub use team_repo::SqliteTeamRepository;
pub use unit_of_work::{SqliteTransaction, SqliteUnitOfWork};
