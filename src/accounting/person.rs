use std::fmt;
use std::str::FromStr;

use super::LedgerError;

/// One of the two people sharing expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Person {
    Giulio,
    Delia,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::Giulio, Person::Delia];

    /// Lower-case name accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Person::Giulio => "giulio",
            Person::Delia => "delia",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Person::Giulio => "Giulio",
            Person::Delia => "Delia",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Person {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Person::ALL
            .into_iter()
            .find(|person| person.key().eq_ignore_ascii_case(name))
            .ok_or_else(|| LedgerError::UnknownPerson(name.to_string()))
    }
}
