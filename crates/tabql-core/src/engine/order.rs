//! ORDER BY.

use core::cmp::Ordering;

use crate::ast::{ColumnRef, OrderBy, OrderDirection};
use crate::error::ResolutionError;

use super::compare::parse_number;
use super::relation::Relation;
use super::result::Cell;

/// An ORDER BY entry bound to a column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    index: usize,
    direction: OrderDirection,
}

/// Binds each ORDER BY entry to a column of `relation`.
///
/// An unqualified entry matching a select-list alias sorts by the aliased
/// column; otherwise it names a column directly.
pub fn bind_keys(
    order_by: &[OrderBy],
    select_list: &[ColumnRef],
    relation: &Relation,
) -> Result<Vec<SortKey>, ResolutionError> {
    order_by
        .iter()
        .map(|entry| {
            let aliased = entry.column.table.is_none().then(|| {
                select_list
                    .iter()
                    .find(|c| c.alias.is_some() && c.alias.as_deref() == entry.column.column_name())
            });
            let target = aliased.flatten().unwrap_or(&entry.column);
            relation
                .resolve(target)
                .map(|index| SortKey {
                    index,
                    direction: entry.direction,
                })
                .ok_or_else(|| ResolutionError::ColumnNotFound {
                    column: entry.column.to_string(),
                    context: String::from("ORDER BY"),
                })
        })
        .collect()
}

fn compare_cells(left: &Cell, right: &Cell, numeric: bool) -> Ordering {
    match (left.as_deref(), right.as_deref()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => match (numeric, parse_number(l), parse_number(r)) {
            (true, Some(l), Some(r)) => l.total_cmp(&r),
            _ => l.cmp(r),
        },
    }
}

/// Stable sort by `keys`, first key most significant.
///
/// A key sorts numerically when every non-null value in its column is a
/// number, lexically otherwise. Nulls sort first; `DESC` reverses.
pub fn sort_rows(rows: &mut [Vec<Cell>], keys: &[SortKey]) {
    let numeric: Vec<bool> = keys
        .iter()
        .map(|key| {
            rows.iter()
                .filter_map(|row| row[key.index].as_deref())
                .all(|value| parse_number(value).is_some())
        })
        .collect();
    rows.sort_by(|a, b| {
        keys.iter()
            .zip(&numeric)
            .map(|(key, &numeric)| {
                let ordering = compare_cells(&a[key.index], &b[key.index], numeric);
                match key.direction {
                    OrderDirection::Asc => ordering,
                    OrderDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
