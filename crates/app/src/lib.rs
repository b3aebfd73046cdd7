//! # kaddem-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StudentRepository`: CRUD plus the by-department query
//!   - `ContractRepository`, `TeamRepository`: lookup and save
//!   - `DepartmentRepository`: lookup (and save, for seeding)
//!   - `UnitOfWork` / `Transaction`: one all-or-nothing store transaction
//!     per use-case invocation
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StudentService`: student CRUD, department assignment, and the
//!     compound create-and-link operation
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `kaddem-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
