//! WHERE conditions bound to a relation's columns.

use tracing::debug;

use crate::ast::{CompareOp, Condition, Operand, Separator};

use super::compare::compare_values;
use super::relation::Relation;
use super::result::Cell;

/// An operand with its column looked up.
#[derive(Debug, Clone, PartialEq)]
enum Bound {
    Literal(String),
    /// A quoted string. Comparisons against it are always lexical.
    Text(String),
    Column(usize),
    /// Names a column the relation does not have.
    Unresolved,
}

impl Bound {
    fn bind(operand: &Operand, relation: &Relation) -> Self {
        match operand {
            Operand::Number(n) => Self::Literal(n.to_string()),
            Operand::String(s) => Self::Text(s.clone()),
            Operand::Column(column) => relation.resolve(column).map_or_else(
                || {
                    debug!(column = %column, "condition references an unknown column");
                    Self::Unresolved
                },
                Self::Column,
            ),
        }
    }

    fn value<'r>(&'r self, row: &'r [Cell]) -> Option<&'r str> {
        match self {
            Self::Literal(s) | Self::Text(s) => Some(s.as_str()),
            Self::Column(i) => row.get(*i).and_then(Option::as_deref),
            Self::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BoundCondition {
    separator: Separator,
    negated: bool,
    left: Bound,
    op: CompareOp,
    right: Bound,
}

impl BoundCondition {
    /// A condition naming an unknown column is false, negated or not.
    fn is_resolved(&self) -> bool {
        self.left != Bound::Unresolved && self.right != Bound::Unresolved
    }

    /// The comparison itself, before negation. A null operand makes it
    /// false.
    fn compare(&self, row: &[Cell]) -> bool {
        let lexical = matches!(self.left, Bound::Text(_)) || matches!(self.right, Bound::Text(_));
        match (self.left.value(row), self.right.value(row)) {
            (Some(l), Some(r)) if lexical => self.op.holds(l.cmp(r)),
            (Some(l), Some(r)) => self.op.holds(compare_values(l, r)),
            _ => false,
        }
    }
}

/// A WHERE clause compiled against one relation's schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    conditions: Vec<BoundCondition>,
}

impl Predicate {
    pub fn compile(conditions: &[(Separator, Condition)], relation: &Relation) -> Self {
        let conditions = conditions
            .iter()
            .map(|(separator, condition)| BoundCondition {
                separator: *separator,
                negated: condition.negated,
                left: Bound::bind(&condition.left, relation),
                op: condition.op,
                right: Bound::bind(&condition.right, relation),
            })
            .collect();
        Self { conditions }
    }

    /// Evaluates the conditions strictly left to right, starting from
    /// `true`. There is no precedence between AND and OR.
    pub fn matches(&self, row: &[Cell]) -> bool {
        self.conditions.iter().fold(true, |accumulated, condition| {
            let value =
                condition.is_resolved() && (condition.compare(row) != condition.negated);
            condition.separator.combine(accumulated, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_select;
    use crate::table::MemoryTable;

    fn people() -> Relation {
        Relation::load(
            "people",
            &MemoryTable::from_rows(
                &["name", "age"],
                &[&["Ann", "30"], &["Bob", "17"], &["Abe", "19"]],
            )
            .unwrap(),
        )
    }

    fn names_where(clause: &str) -> Vec<String> {
        let sql = format!("SELECT * FROM people WHERE {clause}");
        let statement = parse_select(&sql).unwrap();
        let relation = people();
        let predicate = Predicate::compile(&statement.conditions, &relation);
        relation
            .rows
            .iter()
            .filter(|row| predicate.matches(row))
            .filter_map(|row| row[0].clone())
            .collect()
    }

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(names_where("age > 18"), vec!["Ann", "Abe"]);
        assert_eq!(names_where("age >= 19.0"), vec!["Ann", "Abe"]);
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(names_where(r#"name = "Bob""#), vec!["Bob"]);
        assert_eq!(names_where(r#"name < "B""#), vec!["Ann", "Abe"]);
    }

    #[test]
    fn test_quoted_literal_compares_as_text() {
        assert!(names_where(r#"age = "30.0""#).is_empty());
        assert!(names_where(r#"age = " 30 ""#).is_empty());
        assert_eq!(names_where(r#"age = "30""#), vec!["Ann"]);
        // "19" < "30" < "9" as text
        assert_eq!(names_where(r#"age < "9""#), vec!["Ann", "Bob", "Abe"]);
        assert_eq!(names_where("age < 9"), Vec::<String>::new());
    }

    #[test]
    fn test_flat_left_to_right_evaluation() {
        // (name = "Ann" OR name = "Bob") AND age > 18
        assert_eq!(
            names_where(r#"name = "Ann" OR name = "Bob" AND age > 18"#),
            vec!["Ann"]
        );
        // (age > 18 AND name = "Abe") OR name = "Bob"
        assert_eq!(
            names_where(r#"age > 18 AND name = "Abe" OR name = "Bob""#),
            vec!["Bob", "Abe"]
        );
    }

    #[test]
    fn test_negation() {
        assert_eq!(names_where(r#"NOT name = "Bob""#), vec!["Ann", "Abe"]);
        assert_eq!(names_where(r#"age > 18 NOT name = "Abe""#), vec!["Ann"]);
        assert_eq!(names_where(r#"age > 18 OR NOT age > 0"#), vec!["Ann", "Abe"]);
    }

    #[test]
    fn test_unknown_column_never_matches() {
        assert!(names_where("ghost = 1").is_empty());
        assert!(names_where("NOT ghost = 1").is_empty());
        assert_eq!(names_where("ghost = 1 OR age < 18"), vec!["Bob"]);
    }

    #[test]
    fn test_null_cells_never_compare() {
        let mut relation = people();
        relation.rows[0][1] = None;
        let statement = parse_select("SELECT * FROM people WHERE age != 0").unwrap();
        let predicate = Predicate::compile(&statement.conditions, &relation);
        assert!(!predicate.matches(&relation.rows[0]));
        assert!(predicate.matches(&relation.rows[1]));
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        let predicate = Predicate::default();
        assert!(predicate.matches(&[]));
    }
}
