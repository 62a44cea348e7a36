//! Shared grouping and table helpers for the report builders.

use crate::parser::{CellValue, Column, Dataset, FundingEvent, Table};
use std::collections::HashMap;
use std::hash::Hash;

/// Sum values per key, keeping keys in first-encounter order
///
/// **Public** - used by the overall and investor builders
pub fn group_sums<K, I>(items: I) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, f64)> = Vec::new();

    for (key, value) in items {
        match index.get(&key) {
            Some(&slot) => groups[slot].1 += value,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value));
            }
        }
    }

    groups
}

/// Number of distinct, non-blank startup names
pub fn distinct_startups<'a>(events: impl IntoIterator<Item = &'a FundingEvent>) -> usize {
    let mut seen: Vec<&str> = events
        .into_iter()
        .map(|e| e.startup.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Sort events by date, newest first. Unknown dates go last; ties keep
/// their source order.
pub fn sort_newest_first(events: &mut [&FundingEvent]) {
    events.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Build a table from `events`, keeping only the `wanted` columns the
/// dataset actually has
pub fn build_table(
    name: &str,
    dataset: &Dataset,
    wanted: &[Column],
    events: &[&FundingEvent],
) -> Table {
    let columns: Vec<Column> = wanted
        .iter()
        .copied()
        .filter(|c| dataset.has_column(*c))
        .collect();

    let rows: Vec<Vec<CellValue>> = events
        .iter()
        .map(|event| columns.iter().map(|c| event_cell(event, *c)).collect())
        .collect();

    Table {
        name: name.to_string(),
        columns,
        rows,
    }
}

fn event_cell(event: &FundingEvent, column: Column) -> CellValue {
    match column {
        Column::Date => CellValue::date(event.date),
        Column::Startup if event.startup.is_empty() => CellValue::Null,
        Column::Startup => CellValue::Text(event.startup.clone()),
        Column::Vertical => CellValue::text(event.vertical.as_deref()),
        Column::Subvertical => CellValue::text(event.subvertical.as_deref()),
        Column::City => CellValue::text(event.city.as_deref()),
        Column::Investors => CellValue::text(event.investors.as_deref()),
        Column::Round => CellValue::text(event.round.as_deref()),
        Column::Amount => CellValue::number(event.amount),
    }
}
