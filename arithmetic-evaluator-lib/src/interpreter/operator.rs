use crate::interpreter::evaluator::EvaluationError;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponentiate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponentiate => "^",
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 2,
            BinaryOperator::Exponentiate => 3,
        }
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    /// Applies the operator to `a` (the left operand) and `b` (the right operand).
    ///
    /// Modulo truncates both operands toward zero and takes the integer remainder.
    /// Operands that do not fit an `i64` once truncated are rejected.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, EvaluationError> {
        match self {
            BinaryOperator::Add => Ok(a + b),
            BinaryOperator::Subtract => Ok(a - b),
            BinaryOperator::Multiply => Ok(a * b),
            BinaryOperator::Divide => {
                if b == 0.0 {
                    return Err(EvaluationError::DivisionByZero { dividend: a });
                }
                Ok(a / b)
            }
            BinaryOperator::Modulo => match (truncate_to_integer(a), truncate_to_integer(b)) {
                (_, Some(0)) => Err(EvaluationError::ModuloByZero { dividend: a }),
                (Some(dividend), Some(divisor)) => Ok(dividend.wrapping_rem(divisor) as f64),
                _ => Err(EvaluationError::ModuloOutOfRange {
                    dividend: a,
                    divisor: b,
                }),
            },
            BinaryOperator::Exponentiate => Ok(a.powf(b)),
        }
    }
}

fn truncate_to_integer(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

impl FromStr for BinaryOperator {
    type Err = EvaluationError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" => Ok(BinaryOperator::Multiply),
            "/" => Ok(BinaryOperator::Divide),
            "%" => Ok(BinaryOperator::Modulo),
            "^" => Ok(BinaryOperator::Exponentiate),
            other => Err(EvaluationError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let greater = BinaryOperator::Multiply;
        let lesser = BinaryOperator::Add;
        assert!(greater.precedence_gt(&lesser))
    }

    #[test]
    fn modulo_shares_precedence_with_division() {
        assert!(BinaryOperator::Modulo.precedence_eq(&BinaryOperator::Divide))
    }

    #[test]
    fn exponentiation_binds_tightest() {
        assert!(BinaryOperator::Exponentiate.precedence_gt(&BinaryOperator::Multiply))
    }

    #[parameterized(
        operator = {
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Modulo,
            BinaryOperator::Exponentiate,
            BinaryOperator::Modulo,
            BinaryOperator::Exponentiate,
        },
        a = { 7.0, 7.0, 7.0, 7.0, 7.9, 2.0, -7.0, 4.0 },
        b = { 2.0, 2.0, 2.0, 2.0, 2.5, 10.0, 2.0, 0.5 },
        expected = { 9.0, 5.0, 14.0, 3.5, 1.0, 1024.0, -1.0, 2.0 }
    )]
    fn operator_applies_to_operands(operator: BinaryOperator, a: f64, b: f64, expected: f64) {
        assert_eq!(operator.apply(a, b).unwrap(), expected);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            BinaryOperator::Divide.apply(4.0, 0.0),
            Err(EvaluationError::DivisionByZero { dividend: 4.0 })
        )
    }

    #[test]
    fn modulo_by_fraction_truncating_to_zero_is_an_error() {
        assert_eq!(
            BinaryOperator::Modulo.apply(4.0, 0.5),
            Err(EvaluationError::ModuloByZero { dividend: 4.0 })
        )
    }

    #[parameterized(a = { 1e300, 7.0, f64::NAN, -1e19 }, b = { 7.0, f64::INFINITY, 2.0, 3.0 })]
    fn modulo_of_operand_beyond_integer_range_is_an_error(a: f64, b: f64) {
        assert!(matches!(
            BinaryOperator::Modulo.apply(a, b),
            Err(EvaluationError::ModuloOutOfRange { .. })
        ))
    }

    #[test]
    fn modulo_by_zero_wins_over_out_of_range_dividend() {
        assert_eq!(
            BinaryOperator::Modulo.apply(1e300, 0.0),
            Err(EvaluationError::ModuloByZero { dividend: 1e300 })
        )
    }

    #[test]
    fn symbols_parse_back_into_operators() {
        for operator in [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Modulo,
            BinaryOperator::Exponentiate,
        ] {
            assert_eq!(operator.symbol().parse::<BinaryOperator>(), Ok(operator));
        }
    }

    #[test]
    fn unknown_symbol_is_an_unknown_operator() {
        assert_eq!(
            "<<".parse::<BinaryOperator>(),
            Err(EvaluationError::UnknownOperator("<<".to_string()))
        )
    }
}
