use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::{self, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decimal places kept for every amount.
pub const PRECISION: u32 = 2;

/// Largest amount accepted for a single entry, in either direction.
///
/// Every amount within this bound survives the JSON number round trip exactly,
/// and no realistic sum of them reaches `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

pub fn within_limits(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Amount(s) recorded under a single category.
///
/// Persisted as either a bare number or an array of numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValue {
    Scalar(Decimal),
    Series(Vec<Decimal>),
}

impl CategoryValue {
    pub fn effective_total(&self) -> Decimal {
        match self {
            CategoryValue::Scalar(amount) => *amount,
            CategoryValue::Series(amounts) => amounts.iter().sum(),
        }
    }

    /// Records another amount without merging it into the previous ones.
    pub fn push(&mut self, amount: Decimal) {
        match self {
            CategoryValue::Scalar(previous) => *self = CategoryValue::Series(vec![*previous, amount]),
            CategoryValue::Series(amounts) => amounts.push(amount),
        }
    }

    pub fn entries(&self) -> usize {
        match self {
            CategoryValue::Scalar(_) => 1,
            CategoryValue::Series(amounts) => amounts.len(),
        }
    }
}

fn json_number<E: ser::Error>(amount: &Decimal) -> Result<f64, E> {
    amount.to_string().parse().map_err(E::custom)
}

fn decimal_from_f64<E: de::Error>(value: f64) -> Result<Decimal, E> {
    Decimal::from_str(&value.to_string())
        .ok()
        .filter(|amount| within_limits(*amount))
        .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &"an amount within limits"))
}

impl Serialize for CategoryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryValue::Scalar(amount) => serializer.serialize_f64(json_number(amount)?),
            CategoryValue::Series(amounts) => {
                let mut seq = serializer.serialize_seq(Some(amounts.len()))?;
                for amount in amounts {
                    seq.serialize_element(&json_number::<S::Error>(amount)?)?;
                }
                seq.end()
            },
        }
    }
}

struct Amount(Decimal);

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
        Some(Decimal::from(value))
            .filter(|amount| within_limits(*amount))
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &"an amount within limits"))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
        Some(Decimal::from(value))
            .filter(|amount| within_limits(*amount))
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &"an amount within limits"))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
        decimal_from_f64(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor).map(Amount)
    }
}

struct CategoryValueVisitor;

impl<'de> Visitor<'de> for CategoryValueVisitor {
    type Value = CategoryValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a list of numbers")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<CategoryValue, E> {
        AmountVisitor.visit_u64(value).map(CategoryValue::Scalar)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<CategoryValue, E> {
        AmountVisitor.visit_i64(value).map(CategoryValue::Scalar)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<CategoryValue, E> {
        AmountVisitor.visit_f64(value).map(CategoryValue::Scalar)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<CategoryValue, A::Error> {
        let mut amounts = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Amount(amount)) = seq.next_element()? {
            amounts.push(amount);
        }
        Ok(CategoryValue::Series(amounts))
    }
}

impl<'de> Deserialize<'de> for CategoryValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryValueVisitor)
    }
}

/// Expenses of one person, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    categories: BTreeMap<String, CategoryValue>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            categories: BTreeMap::new(),
        }
    }

    pub fn add_expense(&mut self, category: &str, amount: Decimal) {
        if let Some(value) = self.categories.get_mut(category) {
            value.push(amount);
        } else {
            self.categories
                .insert(category.to_string(), CategoryValue::Scalar(amount));
        }
    }

    pub fn insert(&mut self, category: impl Into<String>, value: CategoryValue) -> Option<CategoryValue> {
        self.categories.insert(category.into(), value)
    }

    pub fn remove(&mut self, category: &str) -> Option<CategoryValue> {
        self.categories.remove(category)
    }

    pub fn get(&self, category: &str) -> Option<&CategoryValue> {
        self.categories.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Effective total of a category, zero when absent.
    pub fn category_total(&self, category: &str) -> Decimal {
        self.get(category)
            .map(CategoryValue::effective_total)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.categories.values().map(CategoryValue::effective_total).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, CategoryValue> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CategoryValue)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (S, CategoryValue)>>(iter: I) -> Self {
        Ledger {
            categories: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}
