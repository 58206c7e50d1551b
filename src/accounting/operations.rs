use enum_dispatch::enum_dispatch;
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};

use super::ledger::{within_limits, CategoryValue, PRECISION};
use super::person::Person;
use super::store::Store;
use super::{ExecutableOperation, LedgerError};

#[enum_dispatch(ExecutableOperation)]
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    AddExpense,
    RemoveCategory,
    EditCategory,
}

fn category_name(category: &str) -> Result<String, LedgerError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(LedgerError::EmptyCategory);
    }

    Ok(category.to_string())
}

/// Rounds to cents; amounts beyond `MAX_AMOUNT` are rejected.
fn bounded_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if !within_limits(amount) {
        return Err(LedgerError::InvalidAmount);
    }

    Ok(amount.round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointAwayFromZero))
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddExpense {
    person: Person,
    category: String,
    amount: Decimal,
}

impl AddExpense {
    pub fn new(person: Person, category: &str, amount: Decimal) -> Result<AddExpense, LedgerError> {
        let amount = bounded_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(AddExpense {
            person,
            category: category_name(category)?,
            amount,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl ExecutableOperation for AddExpense {
    fn execute(&self, store: &mut Store) -> Result<(), LedgerError> {
        store
            .ledger_mut(self.person)
            .add_expense(&self.category, self.amount);

        Ok(())
    }

    fn person(&self) -> Person {
        self.person
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveCategory {
    person: Person,
    category: String,
}

impl RemoveCategory {
    pub fn new(person: Person, category: &str) -> Result<RemoveCategory, LedgerError> {
        Ok(RemoveCategory {
            person,
            category: category_name(category)?,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl ExecutableOperation for RemoveCategory {
    /// Removing a category that does not exist is not an error.
    fn execute(&self, store: &mut Store) -> Result<(), LedgerError> {
        store.ledger_mut(self.person).remove(&self.category);

        Ok(())
    }

    fn person(&self) -> Person {
        self.person
    }
}

/// Renames a category and/or replaces its total.
///
/// Any recorded history is collapsed into a single amount. Renaming onto an
/// existing category is refused unless `overwrite` is set, in which case the
/// existing category is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCategory {
    person: Person,
    category: String,
    new_name: String,
    new_total: Decimal,
    overwrite: bool,
}

impl EditCategory {
    pub fn new(
        person: Person,
        category: &str,
        new_name: &str,
        new_total: Decimal,
    ) -> Result<EditCategory, LedgerError> {
        let new_total = bounded_amount(new_total)?;
        if new_total < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(EditCategory {
            person,
            category: category_name(category)?,
            new_name: category_name(new_name)?,
            new_total,
            overwrite: false,
        })
    }

    pub fn overwrite(mut self, overwrite: bool) -> EditCategory {
        self.overwrite = overwrite;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn new_total(&self) -> Decimal {
        self.new_total
    }
}

impl ExecutableOperation for EditCategory {
    fn execute(&self, store: &mut Store) -> Result<(), LedgerError> {
        let ledger = store.ledger_mut(self.person);
        let renamed = self.new_name != self.category;

        let current_total = match ledger.get(&self.category) {
            Some(value) => value.effective_total(),
            None => {
                // Repeating an edit that already moved the category is a no-op.
                if renamed && ledger.get(&self.new_name) == Some(&CategoryValue::Scalar(self.new_total)) {
                    return Ok(());
                }

                return Err(LedgerError::CategoryNotFound(self.category.clone()));
            },
        };

        if !renamed && current_total == self.new_total {
            return Ok(());
        }

        if renamed && ledger.contains(&self.new_name) {
            if !self.overwrite {
                return Err(LedgerError::CategoryExists(self.new_name.clone()));
            }

            warn!(
                "renaming '{}' overwrites existing category '{}' of {}",
                self.category, self.new_name, self.person
            );
        }

        ledger.remove(&self.category);
        ledger.insert(self.new_name.clone(), CategoryValue::Scalar(self.new_total));

        Ok(())
    }

    fn person(&self) -> Person {
        self.person
    }
}
