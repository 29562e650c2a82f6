//! qm - query matcher CLI tool
//!
//! Evaluates jq expressions against JSON documents (or YAML documents with
//! `--yaml`) the same way the library matchers do.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use query_matchers::matcher::Matcher;
use query_matchers::query::format_expression;
use query_matchers::{jq, yq};

#[derive(Debug, Parser)]
#[command(name = "qm", version, about = "Query matcher CLI tool")]
struct Cli {
    /// Read the input as a stream of YAML documents instead of JSON.
    #[arg(long, global = true)]
    yaml: bool,

    /// Value substituted, in order, for each %s, %v or %d in the expression.
    #[arg(long = "arg", value_name = "VALUE", global = true)]
    args: Vec<String>,

    /// Output location. Use '-' for stdout.
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print whether the expression holds; exits with 1 when it does not.
    Match {
        expression: String,
        /// Input file. Use '-' for stdin.
        #[arg(default_value = "-")]
        file: PathBuf,
    },
    /// Print the first result of the expression.
    Extract {
        expression: String,
        /// Input file. Use '-' for stdin.
        #[arg(default_value = "-")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };

    let args: Vec<&dyn Display> = cli.args.iter().map(|a| a as &dyn Display).collect();

    match cli.command {
        Command::Match { expression, file } => {
            let input = read_input(&file)?;
            let expression = format_expression(&expression, &args);
            match_expression(&expression, input, cli.yaml, &mut output)
        }
        Command::Extract { expression, file } => {
            let input = read_input(&file)?;
            let expression = format_expression(&expression, &args);
            extract(&expression, input, cli.yaml, &mut output)?;
            Ok(true)
        }
    }
}

fn read_input(file: &PathBuf) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut content = Vec::new();
    if file.as_os_str() == "-" {
        io::stdin()
            .read_to_end(&mut content)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
    } else {
        content = fs::read(file).map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
    }
    Ok(content)
}

fn match_expression(
    expression: &str,
    input: Vec<u8>,
    yaml: bool,
    output: &mut dyn Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let matcher: Box<dyn Matcher> = if yaml {
        Box::new(yq::matches(expression))
    } else {
        Box::new(jq::matches(expression))
    };

    let matched = matcher.matches(&input)?;
    writeln!(output, "{}", matched)?;

    if !matched {
        eprintln!("{}", matcher.failure_message(&input));
    }
    Ok(matched)
}

fn extract(
    expression: &str,
    input: Vec<u8>,
    yaml: bool,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if yaml {
        let text = yq::extract(expression)(&input)?;
        write!(output, "{}", text)?;
    } else {
        let value = jq::extract(expression)(&input)?;
        writeln!(output, "{}", serde_json::to_string_pretty(&value)?)?;
    }
    Ok(())
}
