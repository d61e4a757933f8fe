//! Join algebra over relations.

use tracing::debug;

use crate::ast::{ColumnRef, Join, JoinKey, JoinKind};
use crate::error::ResolutionError;

use super::relation::Relation;
use super::result::Cell;

/// Joins `right` (the table `join` names) onto `left`.
///
/// # Errors
///
/// Returns `ResolutionError::MissingJoinKey` for a keyed join without a
/// key and `ResolutionError::ColumnNotFound` when a key column does not
/// resolve on either side.
pub fn apply(
    left: Relation,
    join: &Join,
    right: Relation,
) -> Result<Relation, ResolutionError> {
    let before = left.rows.len();
    let joined = match join.kind {
        JoinKind::Cross => cross(left, &right),
        JoinKind::Natural => natural(left, &right),
        kind => {
            let key = join.key.as_ref().ok_or(ResolutionError::MissingJoinKey(kind))?;
            let (l, r) = bind_key(&left, &right, key, join)?;
            nested_loop(kind, left, &right, |lrow, rrow| cells_equal(&lrow[l], &rrow[r]))
        }
    };
    debug!(
        kind = %join.kind,
        table = %join.table,
        rows_before = before,
        rows_after = joined.rows.len(),
        "applied join"
    );
    Ok(joined)
}

/// Two key cells match when both are present and equal as strings.
fn cells_equal(left: &Cell, right: &Cell) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

fn combine_rows(left: &[Cell], right: &[Cell]) -> Vec<Cell> {
    let mut row = Vec::with_capacity(left.len() + right.len());
    row.extend_from_slice(left);
    row.extend_from_slice(right);
    row
}

fn null_row(width: usize) -> Vec<Cell> {
    vec![None; width]
}

fn combined_columns(left: &mut Relation, right: &Relation) {
    left.columns.extend(right.columns.iter().cloned());
}

/// Every pairing of a left row with a right row.
pub fn cross(mut left: Relation, right: &Relation) -> Relation {
    combined_columns(&mut left, right);
    let rows = left
        .rows
        .iter()
        .flat_map(|lrow| right.rows.iter().map(move |rrow| combine_rows(lrow, rrow)))
        .collect();
    Relation {
        columns: left.columns,
        rows,
    }
}

/// Finds the key's columns, accepting `ON right = left` as well as
/// `ON left = right`.
fn bind_key(
    left: &Relation,
    right: &Relation,
    key: &JoinKey,
    join: &Join,
) -> Result<(usize, usize), ResolutionError> {
    if let (Some(l), Some(r)) = (left.resolve(&key.left), right.resolve(&key.right)) {
        return Ok((l, r));
    }
    if let (Some(l), Some(r)) = (left.resolve(&key.right), right.resolve(&key.left)) {
        return Ok((l, r));
    }
    let resolves =
        |column: &ColumnRef| left.resolve(column).is_some() || right.resolve(column).is_some();
    let missing = if resolves(&key.left) {
        &key.right
    } else {
        &key.left
    };
    Err(ResolutionError::ColumnNotFound {
        column: missing.to_string(),
        context: format!("{} {}", join.kind, join.table),
    })
}

/// Nested-loop join of a keyed kind with outer padding.
fn nested_loop<F>(kind: JoinKind, mut left: Relation, right: &Relation, matches: F) -> Relation
where
    F: Fn(&[Cell], &[Cell]) -> bool,
{
    let left_width = left.width();
    let right_width = right.width();
    let keep_left = matches!(kind, JoinKind::LeftOuter | JoinKind::FullOuter);
    let keep_right = matches!(kind, JoinKind::RightOuter | JoinKind::FullOuter);
    let mut right_matched = vec![false; right.rows.len()];
    let mut rows = Vec::new();

    for lrow in &left.rows {
        let mut matched = false;
        for (idx, rrow) in right.rows.iter().enumerate() {
            if matches(lrow, rrow) {
                matched = true;
                right_matched[idx] = true;
                rows.push(combine_rows(lrow, rrow));
            }
        }
        if !matched && keep_left {
            rows.push(combine_rows(lrow, &null_row(right_width)));
        }
    }
    if keep_right {
        for (rrow, _) in right
            .rows
            .iter()
            .zip(&right_matched)
            .filter(|(_, matched)| !**matched)
        {
            rows.push(combine_rows(&null_row(left_width), rrow));
        }
    }

    combined_columns(&mut left, right);
    Relation {
        columns: left.columns,
        rows,
    }
}

/// Joins on every column name both sides share, compared without regard
/// to ASCII case. With no shared name this is a cross join.
pub fn natural(left: Relation, right: &Relation) -> Relation {
    let pairs: Vec<(usize, usize)> = right
        .columns
        .iter()
        .enumerate()
        .filter_map(|(r, rcol)| {
            left.columns
                .iter()
                .position(|lcol| lcol.name.eq_ignore_ascii_case(&rcol.name))
                .map(|l| (l, r))
        })
        .collect();
    if pairs.is_empty() {
        debug!("natural join without shared columns, joining as cross");
        return cross(left, right);
    }
    nested_loop(JoinKind::Inner, left, right, |lrow, rrow| {
        pairs
            .iter()
            .all(|&(l, r)| cells_equal(&lrow[l], &rrow[r]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TableRef;
    use crate::table::MemoryTable;

    fn load(name: &str, columns: &[&str], rows: &[&[&str]]) -> Relation {
        Relation::load(name, &MemoryTable::from_rows(columns, rows).unwrap())
    }

    fn people() -> Relation {
        load(
            "people",
            &["id", "name"],
            &[&["1", "Ann"], &["2", "Bob"], &["3", "Cy"]],
        )
    }

    fn orders() -> Relation {
        load(
            "orders",
            &["person_id", "total"],
            &[&["1", "10"], &["1", "15"], &["4", "99"]],
        )
    }

    fn on(kind: JoinKind) -> Join {
        Join::keyed(
            kind,
            TableRef::new("orders"),
            ColumnRef::qualified("people", "id"),
            ColumnRef::qualified("orders", "person_id"),
        )
    }

    fn cell(s: &str) -> Cell {
        Some(String::from(s))
    }

    #[test]
    fn test_cross_join_pairs_every_row() {
        let joined = cross(people(), &orders());
        assert_eq!(joined.rows.len(), 9);
        assert_eq!(joined.width(), 4);
    }

    #[test]
    fn test_inner_join() {
        let joined = apply(people(), &on(JoinKind::Inner), orders()).unwrap();
        assert_eq!(joined.rows.len(), 2);
        assert!(joined.rows.iter().all(|row| row[0] == cell("1")));
    }

    #[test]
    fn test_left_outer_pads_right_side() {
        let joined = apply(people(), &on(JoinKind::LeftOuter), orders()).unwrap();
        assert_eq!(joined.rows.len(), 4);
        assert_eq!(
            joined.rows[2],
            vec![cell("2"), cell("Bob"), None, None]
        );
    }

    #[test]
    fn test_right_outer_pads_left_side() {
        let joined = apply(people(), &on(JoinKind::RightOuter), orders()).unwrap();
        assert_eq!(joined.rows.len(), 3);
        assert_eq!(joined.rows[2], vec![None, None, cell("4"), cell("99")]);
    }

    #[test]
    fn test_full_outer_keeps_both_sides() {
        let joined = apply(people(), &on(JoinKind::FullOuter), orders()).unwrap();
        assert_eq!(joined.rows.len(), 5);
    }

    #[test]
    fn test_key_in_either_order() {
        let reversed = Join::keyed(
            JoinKind::Inner,
            TableRef::new("orders"),
            ColumnRef::qualified("orders", "person_id"),
            ColumnRef::qualified("people", "id"),
        );
        let joined = apply(people(), &reversed, orders()).unwrap();
        assert_eq!(joined.rows.len(), 2);
    }

    #[test]
    fn test_unresolved_key_column() {
        let join = Join::keyed(
            JoinKind::Inner,
            TableRef::new("orders"),
            ColumnRef::qualified("people", "id"),
            ColumnRef::qualified("orders", "owner"),
        );
        let err = apply(people(), &join, orders()).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::ColumnNotFound {
                column: String::from("orders.owner"),
                context: String::from("INNER JOIN orders"),
            }
        );
    }

    #[test]
    fn test_missing_key() {
        let join = Join {
            kind: JoinKind::LeftOuter,
            table: TableRef::new("orders"),
            key: None,
        };
        assert_eq!(
            apply(people(), &join, orders()).unwrap_err(),
            ResolutionError::MissingJoinKey(JoinKind::LeftOuter)
        );
    }

    #[test]
    fn test_null_keys_never_match() {
        let left = load("l", &["k"], &[&["1"]]);
        let mut right = load("r", &["k"], &[&["1"]]);
        right.rows[0][0] = None;
        let joined = natural(left, &right);
        assert!(joined.rows.is_empty());
    }

    #[test]
    fn test_natural_join_on_shared_names() {
        let left = load("l", &["id", "a"], &[&["1", "x"], &["2", "y"]]);
        let right = load("r", &["ID", "b"], &[&["2", "z"]]);
        let joined = natural(left, &right);
        assert_eq!(joined.rows, vec![vec![cell("2"), cell("y"), cell("2"), cell("z")]]);
    }

    #[test]
    fn test_natural_join_without_shared_names_is_cross() {
        let left = load("l", &["a"], &[&["1"], &["2"]]);
        let right = load("r", &["b"], &[&["3"], &["4"]]);
        assert_eq!(natural(left, &right).rows.len(), 4);
    }
}
