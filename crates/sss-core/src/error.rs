use thiserror::Error;

/// A single violated constraint on a stock or trade field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("\"{value}\" is invalid symbol, expected exactly 3 uppercase letters")]
    InvalidSymbol { value: String },
    #[error("kind should be one of (common, preferred), got \"{value}\"")]
    InvalidKind { value: String },
    #[error("last_dividend should be a non-negative number, got {value}")]
    InvalidLastDividend { value: String },
    #[error("fixed_dividend_percent should be a number in the interval [0, 100], got {value}")]
    InvalidFixedDividend { value: String },
    #[error("par_value should be a non-negative number, got {value}")]
    InvalidParValue { value: String },
    #[error("trade_decay_seconds should be a positive number, got {value}")]
    InvalidDecayWindow { value: String },

    #[error("timestamp should be a non-negative number of seconds since epoch, got {value}")]
    InvalidTimestamp { value: String },
    #[error("timestamp {value} cannot be less than timestamp of last recorded trade {last}")]
    TimestampBeforeLastTrade { value: String, last: String },
    #[error("quantity should be a positive integer number, got \"{value}\"")]
    InvalidQuantity { value: String },
    #[error("side should be one of (buy, sell), got \"{value}\"")]
    InvalidSide { value: String },
    #[error("price should be a positive number, got \"{value}\"")]
    InvalidPrice { value: String },
}

/// Every violation found while validating one construction or trade.
///
/// Validation never stops at the first problem, so callers can show the
/// whole list at once. Rendered with one violation per line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", render_lines(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

fn render_lines(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accumulates violations across all fields before failing.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Keeps the value on success, records the violation otherwise.
    pub(crate) fn check<T>(&mut self, result: Result<T, Violation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.push(violation);
                None
            }
        }
    }

    /// Only meaningful once at least one check has failed.
    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError { violations: self.0 }
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StockError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("stock \"{symbol}\" is not found")]
    NotFound { symbol: String },

    #[error("invalid configuration for stock \"{symbol}\":\n{source}")]
    InvalidConfig {
        symbol: String,
        #[source]
        source: ValidationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_violation_in_order() {
        let mut violations = Violations::default();
        violations.push(Violation::InvalidSymbol {
            value: String::from("abc"),
        });
        assert_eq!(
            violations.check::<f64>(Err(Violation::InvalidParValue {
                value: String::from("-1"),
            })),
            None
        );
        assert_eq!(violations.check::<f64>(Ok(2.0)), Some(2.0));

        let err = violations.into_error();
        assert_eq!(err.violations().len(), 2);
        assert!(matches!(
            err.violations()[1],
            Violation::InvalidParValue { .. }
        ));
    }

    #[test]
    fn renders_one_violation_per_line() {
        let mut violations = Violations::default();
        violations.push(Violation::InvalidQuantity {
            value: String::from("0"),
        });
        violations.push(Violation::InvalidSide {
            value: String::from("BUY"),
        });

        let rendered = violations.into_error().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "quantity should be a positive integer number, got \"0\"",
                "side should be one of (buy, sell), got \"BUY\"",
            ]
        );
    }
}
