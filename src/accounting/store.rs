use log::debug;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ledger::{CategoryValue, Ledger};
use super::operations::Operation;
use super::person::Person;
use super::{ExecutableOperation, LedgerError};

/// Both ledgers, loaded and saved as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    giulio: Ledger,
    delia: Ledger,
}

impl Store {
    pub fn new() -> Store {
        Store {
            giulio: Ledger::new(),
            delia: Ledger::new(),
        }
    }

    pub fn from_ledgers(giulio: Ledger, delia: Ledger) -> Store {
        Store { giulio, delia }
    }

    /// Data used when nothing has been persisted yet.
    pub fn seeded() -> Store {
        Store {
            giulio: Ledger::from_iter([
                (
                    "hotel",
                    CategoryValue::Series(vec![dec!(328.81), dec!(316.20), dec!(190)]),
                ),
                ("traghetto", CategoryValue::Scalar(dec!(272))),
            ]),
            delia: Ledger::from_iter([("regalo Irene", CategoryValue::Scalar(dec!(70)))]),
        }
    }

    pub fn ledger(&self, person: Person) -> &Ledger {
        match person {
            Person::Giulio => &self.giulio,
            Person::Delia => &self.delia,
        }
    }

    pub fn ledger_mut(&mut self, person: Person) -> &mut Ledger {
        match person {
            Person::Giulio => &mut self.giulio,
            Person::Delia => &mut self.delia,
        }
    }

    /// Applies an operation in memory. Persisting is up to the caller.
    pub fn execute(&mut self, operation: &Operation) -> Result<(), LedgerError> {
        debug!("executing {:?}", operation);
        operation.execute(self)
    }
}
