use std::collections::BTreeSet;
use std::fmt;

use getset::{CopyGetters, Getters};
use rust_decimal::{Decimal, RoundingStrategy};

use super::person::Person;
use super::store::Store;

/// Formats an amount the way it is shown to users: two decimals and a euro sign.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2} €", rounded)
}

/// Transfer that evens out a 50/50 split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Balance {
    Settled,
    Owes {
        debtor: Person,
        creditor: Person,
        amount: Decimal,
    },
}

impl Balance {
    pub fn between(giulio: Decimal, delia: Decimal) -> Balance {
        if giulio > delia {
            Balance::Owes {
                debtor: Person::Delia,
                creditor: Person::Giulio,
                amount: (giulio - delia) / Decimal::TWO,
            }
        } else if delia > giulio {
            Balance::Owes {
                debtor: Person::Giulio,
                creditor: Person::Delia,
                amount: (delia - giulio) / Decimal::TWO,
            }
        } else {
            Balance::Settled
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Balance::Settled => Decimal::ZERO,
            Balance::Owes { amount, .. } => *amount,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Settled => write!(f, "Nobody owes anything"),
            Balance::Owes {
                debtor,
                creditor,
                amount,
            } => write!(f, "{} owes {} {}", debtor, creditor, format_amount(*amount)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Summary {
    giulio: Decimal,
    delia: Decimal,
    balance: Balance,
}

impl Summary {
    pub fn of(store: &Store) -> Summary {
        let giulio = store.ledger(Person::Giulio).total();
        let delia = store.ledger(Person::Delia).total();

        Summary {
            giulio,
            delia,
            balance: Balance::between(giulio, delia),
        }
    }

    pub fn total(&self, person: Person) -> Decimal {
        match person {
            Person::Giulio => self.giulio,
            Person::Delia => self.delia,
        }
    }

    pub fn grand_total(&self) -> Decimal {
        self.giulio + self.delia
    }
}

/// Per-category values of both people, aligned on a sorted label list.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ChartSeries {
    labels: Vec<String>,
    giulio: Vec<Decimal>,
    delia: Vec<Decimal>,
}

impl ChartSeries {
    pub fn of(store: &Store) -> ChartSeries {
        let giulio_ledger = store.ledger(Person::Giulio);
        let delia_ledger = store.ledger(Person::Delia);

        let labels: Vec<String> = giulio_ledger
            .categories()
            .chain(delia_ledger.categories())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let giulio = labels
            .iter()
            .map(|label| giulio_ledger.category_total(label))
            .collect();
        let delia = labels
            .iter()
            .map(|label| delia_ledger.category_total(label))
            .collect();

        ChartSeries {
            labels,
            giulio,
            delia,
        }
    }

    pub fn values(&self, person: Person) -> &[Decimal] {
        match person {
            Person::Giulio => &self.giulio,
            Person::Delia => &self.delia,
        }
    }

    pub fn max_value(&self) -> Decimal {
        self.giulio
            .iter()
            .chain(self.delia.iter())
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::accounting::ledger::{CategoryValue, Ledger};

    #[test]
    fn test_balance_direction() {
        assert_eq!(
            Balance::between(dec!(100), dec!(40)),
            Balance::Owes {
                debtor: Person::Delia,
                creditor: Person::Giulio,
                amount: dec!(30)
            }
        );
        assert_eq!(
            Balance::between(dec!(40), dec!(100)),
            Balance::Owes {
                debtor: Person::Giulio,
                creditor: Person::Delia,
                amount: dec!(30)
            }
        );
    }

    #[test]
    fn test_balance_settled_only_when_equal() {
        assert_eq!(Balance::between(dec!(12.5), dec!(12.50)), Balance::Settled);
        assert_eq!(Balance::between(dec!(0), dec!(0)).amount(), dec!(0));
        assert_ne!(Balance::between(dec!(12.5), dec!(12.51)), Balance::Settled);
    }

    #[test]
    fn test_summary_of_seeded_store() {
        let summary = Summary::of(&Store::seeded());

        assert_eq!(summary.giulio(), dec!(1107.01));
        assert_eq!(summary.delia(), dec!(70));
        assert_eq!(summary.grand_total(), dec!(1177.01));
        assert_eq!(summary.balance().amount(), dec!(518.505));
        assert_eq!(
            summary.balance().to_string(),
            "Delia owes Giulio 518.51 €"
        );
    }

    #[test]
    fn test_chart_series_alignment() {
        let store = Store::from_ledgers(
            Ledger::from_iter([
                ("y", CategoryValue::Scalar(dec!(2))),
                ("x", CategoryValue::Scalar(dec!(1))),
            ]),
            Ledger::from_iter([
                ("z", CategoryValue::Scalar(dec!(4))),
                ("y", CategoryValue::Series(vec![dec!(1), dec!(2)])),
            ]),
        );

        let series = ChartSeries::of(&store);

        assert_eq!(series.labels(), &vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        assert_eq!(series.values(Person::Giulio), &[dec!(1), dec!(2), dec!(0)]);
        assert_eq!(series.values(Person::Delia), &[dec!(0), dec!(3), dec!(4)]);
        assert_eq!(series.max_value(), dec!(4));
    }

    #[test]
    fn test_chart_series_empty_store() {
        let series = ChartSeries::of(&Store::new());

        assert!(series.is_empty());
        assert_eq!(series.max_value(), dec!(0));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(442.505)), "442.51 €");
        assert_eq!(format_amount(dec!(70)), "70.00 €");
    }
}
