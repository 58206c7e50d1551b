use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod ledger;
pub mod operations;
pub mod person;
pub mod store;
pub mod summary;


pub use ledger::{CategoryValue, Ledger};
pub use operations::{AddExpense, EditCategory, Operation, RemoveCategory};
pub use person::Person;
pub use store::Store;
pub use summary::{Balance, ChartSeries, Summary};

#[derive(Debug, PartialEq, Error)]
pub enum LedgerError {
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("unknown person '{0}'")]
    UnknownPerson(String),
    #[error("category '{0}' not found")]
    CategoryNotFound(String),
    #[error("category '{0}' already exists")]
    CategoryExists(String),
}

#[enum_dispatch]
pub trait ExecutableOperation {
    fn execute(&self, store: &mut Store) -> Result<(), LedgerError>;

    fn person(&self) -> Person;
}
