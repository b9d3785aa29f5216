use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::parser::declarations::VariableTable;
use crate::interpreter::parser::postfix::{Postfix, PostfixToken};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// The nominal result of an evaluation that failed.
pub const SENTINEL_VALUE: f64 = 0.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Division by zero: `{dividend} / 0`")]
    DivisionByZero { dividend: f64 },

    #[error("Modulo by zero: `{dividend} % 0`")]
    ModuloByZero { dividend: f64 },

    #[error("Modulo operand out of integer range: `{dividend} % {divisor}`")]
    ModuloOutOfRange { dividend: f64, divisor: f64 },

    #[error("Unknown operator: `{0}`")]
    UnknownOperator(String),

    #[error("Unknown token: `{0}`")]
    UnknownToken(String),

    #[error("Not enough operands for operator `{operator}`: found {available}")]
    InsufficientOperands {
        operator: BinaryOperator,
        available: usize,
    },

    #[error("Invalid expression: {remaining} operands left over")]
    ExcessOperands { remaining: usize },

    #[error("Invalid expression: nothing to evaluate")]
    EmptyExpression,
}

/// Returns the evaluated value, or [`SENTINEL_VALUE`] when the evaluation failed.
pub fn value_or_sentinel(result: &Result<f64, EvaluationError>) -> f64 {
    match result {
        Ok(value) => *value,
        Err(_) => SENTINEL_VALUE,
    }
}

/// One consumed postfix element and the operand stack right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationStep {
    pub token: PostfixToken,
    pub stack: Vec<f64>,
}

/// Evaluates postfix expressions against a set of numeric variable bindings.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    variables: HashMap<String, f64>,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator::default()
    }

    /// Binds every numeric variable of the table. Text and references stay unbound.
    pub fn with_bindings(table: &VariableTable) -> Evaluator {
        Evaluator {
            variables: table.numeric_bindings(),
        }
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Reduces a postfix expression to a single number.
    ///
    /// # Arguments
    ///
    /// * `postfix`: The expression, in postfix order.
    ///
    /// returns: The value of the expression, or the reason it could not be evaluated.
    ///
    /// # Examples
    ///
    /// ```
    /// use arithmetic_evaluator::interpreter::evaluator::{EvaluationError, Evaluator};
    /// use arithmetic_evaluator::interpreter::parser::postfix::Postfix;
    ///
    /// let mut evaluator = Evaluator::new();
    /// evaluator.set_variable("a", 5.0);
    ///
    /// let postfix: Postfix = "a 1 +".parse().unwrap();
    /// assert_eq!(evaluator.evaluate(&postfix), Ok(6.0));
    ///
    /// let postfix: Postfix = "4 0 /".parse().unwrap();
    /// assert_eq!(
    ///     evaluator.evaluate(&postfix),
    ///     Err(EvaluationError::DivisionByZero { dividend: 4.0 })
    /// );
    /// ```
    pub fn evaluate(&self, postfix: &Postfix) -> Result<f64, EvaluationError> {
        self.run(postfix, |_, _| {})
    }

    /// Same as [`Evaluator::evaluate`], also recording every step up to the first error.
    pub fn evaluate_traced(
        &self,
        postfix: &Postfix,
    ) -> (Result<f64, EvaluationError>, Vec<EvaluationStep>) {
        let mut steps = vec![];
        let result = self.run(postfix, |token, stack| {
            steps.push(EvaluationStep {
                token: token.clone(),
                stack: stack.to_vec(),
            })
        });
        (result, steps)
    }

    fn run(
        &self,
        postfix: &Postfix,
        mut on_step: impl FnMut(&PostfixToken, &[f64]),
    ) -> Result<f64, EvaluationError> {
        let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

        for token in postfix {
            match token {
                PostfixToken::Operand(text) => stack.push(self.resolve_operand(text)?),
                PostfixToken::Operator(operator) => apply_operator(&mut stack, operator)?,
            }
            on_step(token, &stack);
        }

        let result = match stack.len() {
            0 => Err(EvaluationError::EmptyExpression),
            1 => Ok(stack[0]),
            remaining => Err(EvaluationError::ExcessOperands { remaining }),
        };
        match &result {
            Ok(value) => debug!("Evaluated `{}` to {}", postfix, value),
            Err(error) => debug!("Could not evaluate `{}`: {}", postfix, error),
        }
        result
    }

    fn resolve_operand(&self, text: &str) -> Result<f64, EvaluationError> {
        if let Some(number) = parse_number(text) {
            return Ok(number);
        }
        self.variables
            .get(text)
            .copied()
            .ok_or_else(|| EvaluationError::UnknownToken(text.to_string()))
    }
}

fn apply_operator(stack: &mut Vec<f64>, operator: &BinaryOperator) -> Result<(), EvaluationError> {
    let (b, a) = match (stack.pop(), stack.pop()) {
        (Some(b), Some(a)) => (b, a),
        (popped, _) => {
            return Err(EvaluationError::InsufficientOperands {
                operator: *operator,
                available: usize::from(popped.is_some()),
            })
        }
    };
    stack.push(operator.apply(a, b)?);
    Ok(())
}

/// Parses text that is a number literal in its entirety.
///
/// Words such as `inf` or `NaN` are names, not numbers, with or without a sign.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    let first = unsigned.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    text.parse::<f64>().ok()
}
