//! Unit of work: one transaction, one repository, explicit commit
//!
//! `UnitOfWork::begin` opens a transaction on the pool; `repository()` lends
//! a [`Repository`] bound to it. `commit` and `rollback` consume the unit of
//! work, so a second transaction on the same instance is unrepresentable.
//! Dropping an uncommitted unit of work rolls the transaction back — callers
//! must commit to persist anything.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// A scoped transaction owning the storage session for one logical operation
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Open a fresh transaction
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Borrow a repository bound to the open transaction
    pub fn repository(&mut self) -> Repository<'_> {
        Repository { tx: &mut self.tx }
    }

    /// Commit all pending work
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    /// Discard all pending work
    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}

/// Typed CRUD operations per entity, executed on the unit of work's
/// transaction. Method families live in the per-entity modules.
pub struct Repository<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
}

impl<'t> Repository<'t> {
    /// The transaction's connection, for executing queries
    pub(super) fn conn(&mut self) -> &mut PgConnection {
        &mut **self.tx
    }
}
