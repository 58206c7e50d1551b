//! Command-line interface of the splitwise binary.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rust_decimal::Decimal;

use crate::accounting::{EditCategory, LedgerError, Person, Store};
use crate::chart::DEFAULT_WIDTH;
use crate::data::DEFAULT_STORE_FILE;

/// splitwise: track the expenses Giulio and Delia share and see who owes whom.
///
/// Every change is written to the store file immediately.
#[derive(Debug, Parser, Clone)]
#[command(name = "splitwise", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record an expense. Repeated expenses in a category are kept separately.
    Add(AddArgs),
    /// Delete a category and everything recorded under it.
    Remove(RemoveArgs),
    /// Rename a category and/or replace its total with a single amount.
    Edit(EditArgs),
    /// Show both totals and the transfer that evens them out.
    Summary,
    /// Compare the two people category by category.
    Chart(ChartArgs),
    /// List every category with its total.
    List,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// The JSON file holding both ledgers. Created on the first change.
    #[arg(long, env = "SPLITWISE_FILE", default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Args for the `splitwise add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// Who paid: giulio or delia.
    person: Person,

    /// The category to record the expense under.
    category: String,

    /// The amount paid, greater than zero.
    amount: Decimal,
}

impl AddArgs {
    pub fn person(&self) -> Person {
        self.person
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Args for the `splitwise remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    person: Person,

    category: String,
}

impl RemoveArgs {
    pub fn person(&self) -> Person {
        self.person
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Args for the `splitwise edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    person: Person,

    /// The category to edit.
    category: String,

    /// New name for the category. Defaults to the current name.
    #[arg(long)]
    name: Option<String>,

    /// New total for the category. Defaults to the current total.
    #[arg(long)]
    total: Option<Decimal>,

    /// Replace an existing category with the same name instead of failing.
    #[arg(long)]
    overwrite: bool,
}

impl EditArgs {
    pub fn person(&self) -> Person {
        self.person
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn total(&self) -> Option<Decimal> {
        self.total
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Builds the edit, filling a missing name or total from the current category.
    ///
    /// The store is only consulted when `--total` is omitted, so a repeated rename
    /// reaches the edit itself.
    pub fn operation(&self, store: &Store) -> Result<EditCategory, LedgerError> {
        let category = self.category.trim();
        let new_total = match self.total {
            Some(total) => total,
            None => store
                .ledger(self.person)
                .get(category)
                .map(|value| value.effective_total())
                .ok_or_else(|| LedgerError::CategoryNotFound(category.to_string()))?,
        };

        Ok(EditCategory::new(self.person, category, self.name().unwrap_or(category), new_total)?
            .overwrite(self.overwrite))
    }
}

/// Args for the `splitwise chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Print the aligned series as CSV instead of drawing bars.
    #[arg(long)]
    csv: bool,

    /// Width of the longest bar.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
}

impl ChartArgs {
    pub fn csv(&self) -> bool {
        self.csv
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::accounting::CategoryValue;
    use crate::session::Session;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from(["splitwise", "--file", "/tmp/x.json", "add", "Delia", "cena", "42.50"]).unwrap();

        assert_eq!(args.common().file(), Path::new("/tmp/x.json"));
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.person(), Person::Delia);
                assert_eq!(add.category(), "cena");
                assert_eq!(add.amount(), dec!(42.50));
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit() {
        let args = Args::try_parse_from(["splitwise", "edit", "giulio", "hotel", "--total", "884.01", "--overwrite"]).unwrap();

        match args.command() {
            Command::Edit(edit) => {
                assert_eq!(edit.name(), None);
                assert_eq!(edit.total(), Some(dec!(884.01)));
                assert_eq!(edit.overwrite(), true);
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn edit_args(cli: &[&str]) -> EditArgs {
        match Args::try_parse_from(cli.iter().copied()).unwrap().command() {
            Command::Edit(edit) => edit.clone(),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_edit_fills_missing_total() {
        let edit = edit_args(&["splitwise", "edit", "giulio", "hotel", "--name", "albergo"]);
        let operation = edit.operation(&Store::seeded()).unwrap();

        assert_eq!(operation.new_name(), "albergo");
        assert_eq!(operation.new_total(), dec!(835.01));

        let missing = edit_args(&["splitwise", "edit", "giulio", "museo", "--name", "arte"]);
        assert_eq!(
            missing.operation(&Store::seeded()),
            Err(LedgerError::CategoryNotFound("museo".to_string()))
        );
    }

    #[test]
    fn test_repeated_rename_with_total() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("spese.json");
        let edit = edit_args(&["splitwise", "edit", "giulio", "hotel", "--name", "albergo", "--total", "800"]);

        let mut session = Session::open(&path)?;
        let operation = edit.operation(session.store())?;
        session.apply(operation.into())?;
        let after_first = Session::open(&path)?.store().clone();

        let mut session = Session::open(&path)?;
        let operation = edit.operation(session.store())?;
        session.apply(operation.into())?;

        assert_eq!(Session::open(&path)?.store(), &after_first);
        assert_eq!(
            after_first.ledger(Person::Giulio).get("albergo"),
            Some(&CategoryValue::Scalar(dec!(800)))
        );

        Ok(())
    }

    #[test]
    fn test_unknown_person_is_rejected() {
        assert!(Args::try_parse_from(["splitwise", "add", "marco", "cena", "10"]).is_err());
    }
}
