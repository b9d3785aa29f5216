pub mod interpreter;

pub use crate::interpreter::evaluator::{EvaluationError, Evaluator};
pub use crate::interpreter::statements::Statement;
pub use crate::interpreter::validation::Diagnostic;
pub use crate::interpreter::{analyze, Analysis};
