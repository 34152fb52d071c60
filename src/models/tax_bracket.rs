//! Income tax bracket models.
//!
//! A [`BracketTable`] is the ordered list of marginal brackets for one
//! jurisdiction. Tables are validated once when they are built, so the
//! bracket evaluator can walk them without re-checking on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single marginal tax bracket.
///
/// Income in `[lower_bound, upper_bound)` is taxed at `rate`. An
/// `upper_bound` of `None` means the bracket is unbounded.
///
/// # Example
///
/// ```
/// use quebec_tax_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let bracket = TaxBracket::new(Decimal::ZERO, Some(Decimal::from(55867)), Decimal::new(15, 2));
/// assert!(!bracket.is_unbounded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Income at which this bracket starts.
    pub lower_bound: Decimal,
    /// Income at which this bracket ends, or `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The marginal rate applied to income inside the bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bracket.
    pub fn new(lower_bound: Decimal, upper_bound: Option<Decimal>, rate: Decimal) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Returns true if the bracket has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// Returns the portion of `income` that falls inside this bracket.
    pub fn taxable_portion(&self, income: Decimal) -> Decimal {
        if income <= self.lower_bound {
            return Decimal::ZERO;
        }
        let top = match self.upper_bound {
            Some(upper) => income.min(upper),
            None => income,
        };
        top - self.lower_bound
    }
}

/// A validated, ordered set of brackets for one jurisdiction.
///
/// Invariants, checked by [`BracketTable::new`]:
/// - at least one bracket, the first starting at zero
/// - each bracket starts where the previous one ends
/// - every bounded bracket ends above where it starts
/// - only the last bracket is unbounded, and it must be
/// - every rate lies in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and builds a bracket table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBracketTable`] naming the table and the
    /// first violated invariant.
    pub fn new(name: impl Into<String>, brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let name = name.into();
        let invalid = |message: String| EngineError::InvalidBracketTable {
            table: name.clone(),
            message,
        };

        let first = brackets
            .first()
            .ok_or_else(|| invalid("table has no brackets".to_string()))?;
        if !first.lower_bound.is_zero() {
            return Err(invalid(format!(
                "first bracket starts at {} instead of 0",
                first.lower_bound
            )));
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            let number = index + 1;

            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} has rate {} outside [0, 1]",
                    number, bracket.rate
                )));
            }

            match bracket.upper_bound {
                Some(upper) if index == last_index => {
                    return Err(invalid(format!(
                        "last bracket ends at {} but must be unbounded",
                        upper
                    )));
                }
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(invalid(format!(
                        "bracket {} ends at {} which is not above its start {}",
                        number, upper, bracket.lower_bound
                    )));
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        number
                    )));
                }
                _ => {}
            }

            if let Some(next) = brackets.get(index + 1) {
                // Checked above: only the last bracket may be unbounded.
                let upper = bracket.upper_bound.unwrap_or(bracket.lower_bound);
                if next.lower_bound != upper {
                    return Err(invalid(format!(
                        "bracket {} starts at {} but bracket {} ends at {}",
                        number + 1,
                        next.lower_bound,
                        number,
                        upper
                    )));
                }
            }
        }

        Ok(Self { name, brackets })
    }

    /// Returns the table's name (e.g. "federal").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the rate of the unbounded top bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|bracket| bracket.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket::new(dec(lower), upper.map(dec), dec(rate))
    }

    fn message_of(result: EngineResult<BracketTable>) -> String {
        match result {
            Err(EngineError::InvalidBracketTable { table, message }) => {
                assert_eq!(table, "test");
                message
            }
            other => panic!("Expected InvalidBracketTable, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_table_is_accepted() {
        let table = BracketTable::new(
            "test",
            vec![
                bracket("0", Some("51780"), "0.14"),
                bracket("51780", Some("103545"), "0.19"),
                bracket("103545", None, "0.24"),
            ],
        )
        .unwrap();

        assert_eq!(table.name(), "test");
        assert_eq!(table.brackets().len(), 3);
        assert_eq!(table.top_rate(), dec("0.24"));
    }

    #[test]
    fn test_single_unbounded_bracket_is_a_flat_tax() {
        let table = BracketTable::new("test", vec![bracket("0", None, "0.10")]).unwrap();
        assert_eq!(table.top_rate(), dec("0.10"));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let message = message_of(BracketTable::new("test", vec![]));
        assert!(message.contains("no brackets"));
    }

    #[test]
    fn test_first_bracket_must_start_at_zero() {
        let message = message_of(BracketTable::new("test", vec![bracket("100", None, "0.1")]));
        assert!(message.contains("instead of 0"));
    }

    #[test]
    fn test_gap_between_brackets_is_rejected() {
        let message = message_of(BracketTable::new(
            "test",
            vec![
                bracket("0", Some("1000"), "0.1"),
                bracket("1500", None, "0.2"),
            ],
        ));
        assert!(message.contains("bracket 2 starts at 1500"));
    }

    #[test]
    fn test_overlap_between_brackets_is_rejected() {
        let message = message_of(BracketTable::new(
            "test",
            vec![
                bracket("0", Some("1000"), "0.1"),
                bracket("900", None, "0.2"),
            ],
        ));
        assert!(message.contains("bracket 1 ends at 1000"));
    }

    #[test]
    fn test_bounded_last_bracket_is_rejected() {
        let message = message_of(BracketTable::new(
            "test",
            vec![bracket("0", Some("1000"), "0.1")],
        ));
        assert!(message.contains("must be unbounded"));
    }

    #[test]
    fn test_unbounded_middle_bracket_is_rejected() {
        let message = message_of(BracketTable::new(
            "test",
            vec![bracket("0", None, "0.1"), bracket("1000", None, "0.2")],
        ));
        assert!(message.contains("is not the last bracket"));
    }

    #[test]
    fn test_empty_bracket_is_rejected() {
        let message = message_of(BracketTable::new(
            "test",
            vec![bracket("0", Some("0"), "0.1"), bracket("0", None, "0.2")],
        ));
        assert!(message.contains("not above its start"));
    }

    #[test]
    fn test_rate_out_of_range_is_rejected() {
        let message = message_of(BracketTable::new("test", vec![bracket("0", None, "1.5")]));
        assert!(message.contains("outside [0, 1]"));

        let message = message_of(BracketTable::new("test", vec![bracket("0", None, "-0.1")]));
        assert!(message.contains("outside [0, 1]"));
    }

    #[test]
    fn test_taxable_portion_inside_bracket() {
        let b = bracket("1000", Some("2000"), "0.2");
        assert_eq!(b.taxable_portion(dec("500")), Decimal::ZERO);
        assert_eq!(b.taxable_portion(dec("1000")), Decimal::ZERO);
        assert_eq!(b.taxable_portion(dec("1500")), dec("500"));
        assert_eq!(b.taxable_portion(dec("2000")), dec("1000"));
        assert_eq!(b.taxable_portion(dec("9000")), dec("1000"));
    }

    #[test]
    fn test_taxable_portion_of_unbounded_bracket() {
        let b = bracket("1000", None, "0.3");
        assert_eq!(b.taxable_portion(dec("1000000")), dec("999000"));
    }
}
