use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use crate::accounting::{ChartSeries, ExecutableOperation, LedgerError, Operation, Store, Summary};
use crate::data::{self, StorageError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("change was not saved: {0}")]
    Storage(#[from] StorageError),
}

/// Owns the store for one user session and keeps the file in step with it.
pub struct Session {
    path: PathBuf,
    store: Store,
}

impl Session {
    pub fn open(path: impl Into<PathBuf>) -> Result<Session, StorageError> {
        let path = path.into();
        let store = data::load_store(&path)?;

        Ok(Session { path, store })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Applies the operation, then writes the whole store back.
    ///
    /// A rejected operation leaves both the store and the file untouched.
    pub fn apply(&mut self, operation: Operation) -> Result<(), SessionError> {
        self.store.execute(&operation)?;
        debug!("saving after change to {}", operation.person());
        data::save_store(&self.store, &self.path)?;

        Ok(())
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.store)
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries::of(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;
    use crate::accounting::{AddExpense, Balance, EditCategory, Person, RemoveCategory};

    #[test]
    fn test_every_change_is_persisted() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("spese.json");

        let mut session = Session::open(&path)?;
        assert_eq!(path.exists(), false);

        session.apply(AddExpense::new(Person::Delia, "cena", dec!(40))?.into())?;
        assert_eq!(Session::open(&path)?.store(), session.store());

        session.apply(RemoveCategory::new(Person::Giulio, "traghetto")?.into())?;
        session.apply(EditCategory::new(Person::Giulio, "hotel", "albergo", dec!(800))?.into())?;

        let reopened = Session::open(&path)?;
        assert_eq!(reopened.store(), session.store());
        assert_eq!(reopened.summary().giulio(), dec!(800));
        assert_eq!(reopened.summary().delia(), dec!(110));
        assert_eq!(
            reopened.summary().balance(),
            Balance::Owes {
                debtor: Person::Delia,
                creditor: Person::Giulio,
                amount: dec!(345)
            }
        );

        Ok(())
    }

    #[test]
    fn test_remove_missing_still_saves() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("spese.json");

        let mut session = Session::open(&path)?;
        session.apply(RemoveCategory::new(Person::Delia, "nulla")?.into())?;

        assert_eq!(path.exists(), true);
        assert_eq!(Session::open(&path)?.store(), &Store::seeded());

        Ok(())
    }

    #[test]
    fn test_rejected_change_is_not_saved() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("spese.json");

        let mut session = Session::open(&path)?;
        let edit = EditCategory::new(Person::Giulio, "traghetto", "hotel", dec!(1))?;

        match session.apply(edit.into()) {
            Err(SessionError::Ledger(LedgerError::CategoryExists(name))) => assert_eq!(name, "hotel"),
            other => bail!("expected a collision error, got {:?}", other),
        }
        assert_eq!(path.exists(), false);
        assert_eq!(session.store(), &Store::seeded());

        Ok(())
    }

    #[test]
    fn test_chart_series_follows_store() -> Result<()> {
        let dir = TempDir::new()?;
        let session = Session::open(dir.path().join("spese.json"))?;
        let series = session.chart_series();

        assert_eq!(series.labels(), &vec!["hotel", "regalo Irene", "traghetto"]);
        assert_eq!(series.values(Person::Giulio), &[dec!(835.01), dec!(0), dec!(272)]);
        assert_eq!(series.values(Person::Delia), &[dec!(0), dec!(70), dec!(0)]);

        Ok(())
    }
}
