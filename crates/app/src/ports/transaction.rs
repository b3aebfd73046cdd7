//! Transaction port: the all-or-nothing boundary around one use-case call.
//!
//! A [`UnitOfWork`] opens a [`Transaction`]; the transaction hands out the
//! four repositories bound to it. Writes become visible only after
//! [`Transaction::commit`]. Dropping a transaction without committing rolls
//! every write back.

use std::future::Future;

use kaddem_domain::error::KaddemError;

use super::storage::{ContractRepository, DepartmentRepository, StudentRepository, TeamRepository};

/// Source of store transactions, injected into services at construction.
pub trait UnitOfWork: Send + Sync {
    type Transaction: Transaction;

    /// Open a new transaction.
    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, KaddemError>> + Send;
}

/// An open store transaction.
pub trait Transaction: Send {
    type Students<'t>: StudentRepository
    where
        Self: 't;
    type Contracts<'t>: ContractRepository
    where
        Self: 't;
    type Teams<'t>: TeamRepository
    where
        Self: 't;
    type Departments<'t>: DepartmentRepository
    where
        Self: 't;

    fn students(&mut self) -> Self::Students<'_>;

    fn contracts(&mut self) -> Self::Contracts<'_>;

    fn teams(&mut self) -> Self::Teams<'_>;

    fn departments(&mut self) -> Self::Departments<'_>;

    /// Make every write performed through this transaction durable.
    fn commit(self) -> impl Future<Output = Result<(), KaddemError>> + Send;
}
