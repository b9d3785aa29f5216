use anyhow::Result;
use arithmetic_evaluator::interpreter::evaluator::value_or_sentinel;
use arithmetic_evaluator::interpreter::token::TYPE_KEYWORDS;
use arithmetic_evaluator::interpreter::{tokens_to_string, Analysis};
use std::io::Write;

const RULE_WIDTH: usize = 50;

/// Writes the human-readable report of every stage of the analysis.
pub fn write_report(
    out: &mut impl Write,
    source: &str,
    analysis: &Analysis,
    show_steps: bool,
) -> Result<()> {
    writeln!(out, "=== Mini Arithmetic Expression Evaluator ===")?;
    writeln!(out)?;
    write_diagnostics(out, analysis)?;
    write_tokens(out, analysis)?;
    write_expression(out, analysis)?;
    write_variables(out, analysis)?;
    write_evaluation(out, source, analysis, show_steps)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    Ok(())
}

fn write_heading(out: &mut impl Write, title: &str) -> Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.len()))?;
    Ok(())
}

fn write_diagnostics(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    if analysis.diagnostics.is_empty() {
        return Ok(());
    }
    write_heading(out, "Input Validation")?;
    for diagnostic in &analysis.diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_tokens(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    write_heading(out, "Step 1: Lexical Analysis")?;
    writeln!(out, "{:<20}{:<15}{:<10}", "Input Expression", "Token Name", "Line")?;
    writeln!(out, "{}", "-".repeat(45))?;
    for token in analysis.tokens.iter().filter(|token| !token.is_end_of_input()) {
        writeln!(
            out,
            "{:<20}{:<15}{:<10}",
            token.text,
            token.kind.to_string(),
            token.line
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_expression(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    write_heading(out, "Step 2: Parsing and Postfix Conversion")?;
    writeln!(out, "Infix Expression: {}", tokens_to_string(&analysis.expression)?)?;
    writeln!(out, "Postfix Expression: {}", analysis.postfix)?;
    writeln!(out)?;
    Ok(())
}

fn write_variables(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    write_heading(out, "Step 3: Variable Analysis")?;
    if analysis.variables.is_empty() {
        writeln!(out, "No variables found in the expression.")?;
    } else {
        writeln!(out, "{:<15}{:<15}", "Variable", "Value")?;
        writeln!(out, "{}", "-".repeat(30))?;
        for (name, variable) in analysis.variables.iter() {
            writeln!(out, "{:<15}{:<15}", name, variable.literal)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_evaluation(
    out: &mut impl Write,
    source: &str,
    analysis: &Analysis,
    show_steps: bool,
) -> Result<()> {
    write_heading(out, "Step 4: Expression Evaluation")?;

    let declarations = declaration_lines(source);
    if declarations.is_empty() {
        writeln!(out, "No expressions found to evaluate.")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "All Expressions Found:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for line in declarations {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;

    writeln!(out, "Expression Results:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for (name, variable) in analysis.variables.non_numeric() {
        writeln!(out, "{} = {} ({})", name, variable.literal, variable.value)?;
    }
    write_statements(out, analysis)?;

    if show_steps {
        write_steps(out, analysis)?;
    }

    match &analysis.result {
        Ok(value) => writeln!(out, "Arithmetic Result: {}", value)?,
        Err(error) => {
            writeln!(out, "Expression: {} (cannot evaluate)", analysis.postfix)?;
            writeln!(out, "Error: {}", error)?;
            writeln!(
                out,
                "Arithmetic Result: {}",
                value_or_sentinel(&analysis.result)
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_statements(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    for statement in &analysis.statements {
        match &statement.result {
            Ok(value) => writeln!(out, "{} = {}", statement.name, value)?,
            Err(error) => writeln!(
                out,
                "{} = {} (cannot evaluate: {})",
                statement.name, statement.postfix, error
            )?,
        }
    }
    if analysis.statements.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Evaluation Steps:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for (index, statement) in analysis.statements.iter().enumerate() {
        writeln!(
            out,
            "Step {}: Evaluate {} = {}",
            index + 1,
            tokens_to_string(&statement.expression)?,
            value_or_sentinel(&statement.result)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_steps(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    writeln!(out, "{:<10}{}", "Token", "Stack")?;
    for step in &analysis.steps {
        let stack: Vec<String> = step.stack.iter().map(ToString::to_string).collect();
        writeln!(out, "{:<10}[{}]", step.token.to_string(), stack.join(", "))?;
    }
    Ok(())
}

/// Source lines that declare a variable with an initializer.
fn declaration_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter(|line| line.contains('='))
        .filter(|line| {
            let line = line.trim_start();
            TYPE_KEYWORDS
                .iter()
                .any(|keyword| line.starts_with(&format!("{} ", keyword)))
        })
        .collect()
}
