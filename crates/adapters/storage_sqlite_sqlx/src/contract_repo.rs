//! `SQLite` implementation of [`ContractRepository`].

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqliteConnection};

use kaddem_app::ports::ContractRepository;
use kaddem_domain::contract::{Contract, Specialty};
use kaddem_domain::error::KaddemError;
use kaddem_domain::id::{ContractId, StudentId};

use crate::error::StorageError;

struct Wrapper(Contract);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let start_date: String = row.try_get("start_date")?;
        let end_date: String = row.try_get("end_date")?;
        let specialty: String = row.try_get("specialty")?;
        let archived: i64 = row.try_get("archived")?;
        let amount: i64 = row.try_get("amount")?;
        let student_id: Option<i64> = row.try_get("student_id")?;

        let start_date = NaiveDate::from_str(&start_date)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let end_date =
            NaiveDate::from_str(&end_date).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let specialty =
            Specialty::from_str(&specialty).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let amount = i32::try_from(amount).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Contract {
            id: Some(ContractId::new(id)),
            start_date,
            end_date,
            specialty,
            archived: archived != 0,
            amount,
            student_id: student_id.map(StudentId::new),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO contracts (start_date, end_date, specialty, archived, amount, student_id)
    VALUES (?, ?, ?, ?, ?, ?)
";

const UPSERT: &str = r"
    INSERT INTO contracts (id, start_date, end_date, specialty, archived, amount, student_id)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET start_date = excluded.start_date,
        end_date = excluded.end_date,
        specialty = excluded.specialty,
        archived = excluded.archived,
        amount = excluded.amount,
        student_id = excluded.student_id
";

const SELECT_BY_ID: &str = "SELECT * FROM contracts WHERE id = ?";

/// `SQLite`-backed contract repository bound to one open transaction.
pub struct SqliteContractRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteContractRepository<'c> {
    /// Create a new repository running on `conn`.
    #[must_use]
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl ContractRepository for SqliteContractRepository<'_> {
    async fn find_by_id(&mut self, id: ContractId) -> Result<Option<Contract>, KaddemError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn save(&mut self, contract: Contract) -> Result<Contract, KaddemError> {
        let query = match contract.id {
            None => sqlx::query::<Sqlite>(INSERT),
            Some(id) => sqlx::query::<Sqlite>(UPSERT).bind(id.get()),
        };

        let result = query
            .bind(contract.start_date.to_string())
            .bind(contract.end_date.to_string())
            .bind(contract.specialty.as_str())
            .bind(i64::from(contract.archived))
            .bind(contract.amount)
            .bind(contract.student_id.map(StudentId::get))
            .execute(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        let id = contract
            .id
            .unwrap_or_else(|| ContractId::new(result.last_insert_rowid()));
        Ok(Contract {
            id: Some(id),
            ..contract
        })
    }
}
