//! # kaddem-domain
//!
//! Pure domain model for the kaddem academic-management system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Students** (the primary managed entity)
//! - Define **Departments** (organisational units owning students)
//! - Define **Teams** (groups owning a set of student members)
//! - Define **Contracts** (agreements referencing at most one student)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Relationships
//! Relationships are plain foreign keys and identifier sets. A [`Student`]
//! knows its department id, a [`Team`] knows its member ids and a
//! [`Contract`] knows its student id; nothing holds a pointer back.
//!
//! [`Student`]: student::Student
//! [`Team`]: team::Team
//! [`Contract`]: contract::Contract
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod contract;
pub mod department;
pub mod student;
pub mod team;
