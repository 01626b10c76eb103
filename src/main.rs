use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use std::{fs, io::{self, BufRead, Write}};
use std::path::PathBuf;
use strict_calc::*;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every evaluation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum nesting of parentheses and unary minus
    #[arg(long, global = true, env = "CALC_MAX_DEPTH", default_value_t = Limits::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum input length in characters
    #[arg(long, global = true, env = "CALC_MAX_INPUT_LEN", default_value_t = Limits::DEFAULT_MAX_INPUT_LEN)]
    max_input_len: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Evaluate every non-blank line of a file
    Run { filename: PathBuf },
    /// Interactive prompt
    Calc,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .with_filter(level);

    Registry::default().with(layer).init();
}

fn report(err: EvalError, input: &str) -> miette::Report {
    err.with_source(&normalize(input))
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let calc = Calculator::new(Limits::new(cli.max_depth, cli.max_input_len));

    match cli.command {
        Commands::Eval { expression } => {
            let result = calc
                .calculate(&expression)
                .map_err(|err| report(err, &expression))?;
            println!("{result}");
        }
        Commands::Run { filename } => {
            let file_contents = fs::read_to_string(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading '{}' failed", filename.display()))?;

            for line in file_contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
                match calc.calculate(line) {
                    Ok(res) => println!("{line} = {res}"),
                    Err(err) => eprintln!("{:?}", report(err, line)),
                }
            }
        }
        Commands::Calc => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            loop {
                print!("calc> ");
                io::stdout().flush().into_diagnostic()?;

                let Some(input) = lines.next() else {
                    break;
                };
                let input = input.into_diagnostic().wrap_err("reading input failed")?;
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input.eq_ignore_ascii_case("exit") {
                    break;
                }

                match calc.calculate(input) {
                    Ok(res) => println!("{res}"),
                    Err(err) => eprintln!("{:?}", report(err, input)),
                }
            }
        }
    }

    Ok(())
}
