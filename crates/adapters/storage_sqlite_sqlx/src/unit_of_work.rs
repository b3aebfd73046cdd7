//! `SQLite` implementation of [`UnitOfWork`] and [`Transaction`].

use std::future::Future;

use sqlx::{Sqlite, SqlitePool};

use kaddem_app::ports::{Transaction, UnitOfWork};
use kaddem_domain::error::KaddemError;

use crate::contract_repo::SqliteContractRepository;
use crate::department_repo::SqliteDepartmentRepository;
use crate::error::StorageError;
use crate::student_repo::SqliteStudentRepository;
use crate::team_repo::SqliteTeamRepository;

/// Opens `SQLite` transactions on a shared pool.
#[derive(Clone)]
pub struct SqliteUnitOfWork {
    pool: SqlitePool,
}

impl SqliteUnitOfWork {
    /// Create a new unit of work using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    type Transaction = SqliteTransaction;

    fn begin(&self) -> impl Future<Output = Result<SqliteTransaction, KaddemError>> + Send {
        let pool = self.pool.clone();
        async move {
            let inner = pool.begin().await.map_err(StorageError::from)?;
            Ok(SqliteTransaction { inner })
        }
    }
}

/// An open `SQLite` transaction. Dropping it without calling
/// [`Transaction::commit`] rolls it back.
pub struct SqliteTransaction {
    inner: sqlx::Transaction<'static, Sqlite>,
}

impl Transaction for SqliteTransaction {
    type Students<'t> = SqliteStudentRepository<'t>;
    type Contracts<'t> = SqliteContractRepository<'t>;
    type Teams<'t> = SqliteTeamRepository<'t>;
    type Departments<'t> = SqliteDepartmentRepository<'t>;

    fn students(&mut self) -> SqliteStudentRepository<'_> {
        SqliteStudentRepository::new(&mut self.inner)
    }

    fn contracts(&mut self) -> SqliteContractRepository<'_> {
        SqliteContractRepository::new(&mut self.inner)
    }

    fn teams(&mut self) -> SqliteTeamRepository<'_> {
        SqliteTeamRepository::new(&mut self.inner)
    }

    fn departments(&mut self) -> SqliteDepartmentRepository<'_> {
        SqliteDepartmentRepository::new(&mut self.inner)
    }

    fn commit(self) -> impl Future<Output = Result<(), KaddemError>> + Send {
        async move {
            self.inner.commit().await.map_err(StorageError::from)?;
            Ok(())
        }
    }
}
