use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::accounting::summary::format_amount;
use crate::accounting::{ChartSeries, Person};

pub const DEFAULT_WIDTH: usize = 40;

const TITLE: &str = "Expenses compared";

fn bar_glyph(person: Person) -> char {
    match person {
        Person::Giulio => '█',
        Person::Delia => '▒',
    }
}

/// Length of the bar for `value`, scaled so that `max` fills `width` cells.
pub fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }

    (value / max * Decimal::from(width))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_usize()
        .unwrap_or(width)
        .min(width)
}

/// Renders a grouped horizontal bar chart, one group per category.
pub fn render(series: &ChartSeries, width: usize) -> String {
    let mut out = format!("{}\n", TITLE);
    if series.is_empty() {
        out.push_str("No expenses recorded.\n");
        return out;
    }

    let max = series.max_value();
    let name_width = Person::ALL
        .iter()
        .map(|person| person.display_name().len())
        .max()
        .unwrap_or(0);

    for (index, label) in series.labels().iter().enumerate() {
        out.push_str(label);
        out.push('\n');

        for person in Person::ALL {
            let value = series.values(person)[index];
            let bar: String = std::iter::repeat(bar_glyph(person))
                .take(bar_length(value, max, width))
                .collect();
            out.push_str(&format!(
                "  {:<name_width$} |{} {}\n",
                person.display_name(),
                bar,
                format_amount(value),
            ));
        }
    }

    out
}
