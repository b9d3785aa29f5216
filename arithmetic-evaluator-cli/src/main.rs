mod report;

use anyhow::{bail, Context, Result};
use arithmetic_evaluator::interpreter::analyze_with;
use arithmetic_evaluator::interpreter::operator::Associativity;
use arithmetic_evaluator::interpreter::parser::ConverterConfig;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::{info, warn, LevelFilter};
use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

const EXAMPLE_PROGRAM: &str = "int a = 5;
int b = 10;
float f = 2.5;
double d = 35.735;
string s = \"Hello\";
char c = 'A';
int sum = a + b;
float product = f * a;
double total = d + f + b;
string greet = s + \" World\";
cout << sum << endl;
cout << product << endl;
cout << total << endl;
cout << greet << endl;";

/// Evaluates the first assignment of a small C-like program
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// File to read the program from. Standard input is read when omitted
    file: Option<PathBuf>,

    /// Group chains of `^` from the right, so that 2 ^ 3 ^ 2 is 512
    #[clap(long)]
    right_associative_power: bool,

    /// Print the operand stack after every evaluation step
    #[clap(long)]
    steps: bool,

    /// Refuse to evaluate a program with malformed declarations or unknown characters
    #[clap(long)]
    strict: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    init_logging(&args.verbose);

    let source = read_source(args.file.as_deref())?;
    let source = if source.trim().is_empty() {
        info!("No program given, falling back to the example program");
        println!("Using default example:\n{}\n", EXAMPLE_PROGRAM);
        EXAMPLE_PROGRAM.to_string()
    } else {
        source
    };

    let config = ConverterConfig {
        exponent_associativity: if args.right_associative_power {
            Associativity::Right
        } else {
            Associativity::Left
        },
    };
    let analysis = analyze_with(&source, &config);
    for diagnostic in &analysis.diagnostics {
        warn!("{}", diagnostic);
    }
    if args.strict && !analysis.diagnostics.is_empty() {
        bail!(
            "the program has {} problems, first: {}",
            analysis.diagnostics.len(),
            analysis.diagnostics[0]
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &source, &analysis, args.steps)
        .context("could not write report")?;
    Ok(())
}

fn init_logging(verbosity: &Verbosity) {
    let level = verbosity
        .log_level()
        .map_or(LevelFilter::Off, |level| level.to_level_filter());
    env_logger::Builder::new().filter_level(level).init();
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read `{}`", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("could not read standard input")?;
            Ok(source)
        }
    }
}
