//! Command line front end: checks a source file and prints its diagnostics.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use yulfront::{
    analyzer::analyzer::analyze,
    dialect::dialect::{AsmFlavour, BuiltinFunction, BuiltinSpecError, Dialect},
    display_error,
    errors::reporter::ErrorReporter,
    lexer::lexer::tokenize,
    parser::parser::{parse_with_config, ParserConfig, DEFAULT_MAX_RECURSION_DEPTH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Flavour {
    /// Every declared name and literal carries `:type`
    #[default]
    Typed,
    /// No type annotations
    Strict,
}

impl From<Flavour> for AsmFlavour {
    fn from(flavour: Flavour) -> Self {
        match flavour {
            Flavour::Typed => AsmFlavour::Typed,
            Flavour::Strict => AsmFlavour::Strict,
        }
    }
}

/// Parse and analyze a typed inline-assembly source file
#[derive(Parser, Debug)]
#[command(name = "yulfront")]
#[command(version)]
#[command(about = "Parse and analyze a typed inline-assembly source file", long_about = None)]
struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Grammar flavour
    #[arg(long, value_enum, default_value_t = Flavour::Typed)]
    flavour: Flavour,

    /// Maximum nesting of blocks and calls
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_RECURSION_DEPTH)]
    max_depth: usize,

    /// Keep parsing after a statement-level error
    #[arg(long)]
    recover: bool,

    /// Add a builtin, as `name:params:returns[:literal][:movable]`
    #[arg(long = "builtin", value_name = "SPEC")]
    builtins: Vec<String>,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid --builtin: {0}")]
    Builtin(#[from] BuiltinSpecError),
    #[error("{count} error(s) found")]
    Invalid { count: usize },
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error @ CliError::Invalid { .. }) => {
            eprintln!("{}", error);
            ExitCode::from(1)
        }
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::from(2)
        }
    }
}

fn build_dialect(cli: &Cli) -> Result<Dialect, CliError> {
    let mut dialect = Dialect::new(cli.flavour.into());
    for spec in cli.builtins.iter() {
        dialect.add_builtin(spec.parse::<BuiltinFunction>()?);
    }
    Ok(dialect)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let dialect = build_dialect(cli)?;

    let source = read_to_string(&cli.file).map_err(|source| CliError::Io {
        path: cli.file.clone(),
        source,
    })?;
    let file_name = cli.file.to_string_lossy().to_string();

    let mut reporter = ErrorReporter::new();
    let valid = check(&source, file_name, &dialect, cli, &mut reporter);

    for diagnostic in reporter.iter() {
        eprint!("{}", display_error(diagnostic, &source));
    }

    if valid {
        tracing::info!(warnings = reporter.len(), "source is valid");
        Ok(())
    } else {
        Err(CliError::Invalid {
            count: reporter.error_count(),
        })
    }
}

fn check(source: &str, file_name: String, dialect: &Dialect, cli: &Cli, reporter: &mut ErrorReporter) -> bool {
    let tokens = match tokenize(source.to_string(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            reporter.report(error);
            return false;
        }
    };

    if cli.tokens {
        for token in tokens.iter() {
            token.debug();
        }
        return true;
    }

    let config = ParserConfig {
        max_recursion_depth: cli.max_depth,
        error_recovery: cli.recover,
    };

    match parse_with_config(tokens, dialect, config, reporter) {
        Some(ast) => analyze(&ast, dialect, reporter),
        None => false,
    }
}
