use clap::{Parser as ClapParser, Subcommand};
use sift_lang::FilterOptions;
use sift_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sift")]
#[command(about = "Sift - A filter language for selecting experiment-run records")]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter and run it against JSON records
    Check {
        /// The filter expression
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax and print the canonical form
        #[arg(long)]
        syntax_only: bool,

        /// Print the syntax tree as JSON
        #[arg(long)]
        ast: bool,

        /// Only allow field paths starting with this prefix (repeatable)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,

        /// JSON file with filter options
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sift docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
            ast,
            prefixes,
            config,
        } => load_filter_options(config, prefixes).and_then(|filter| {
            run_check(CheckOptions {
                query,
                input: None,
                pretty,
                syntax_only,
                ast,
                filter,
            }, input)
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn load_filter_options(
    config: Option<PathBuf>,
    prefixes: Vec<String>,
) -> Result<FilterOptions, CliError> {
    let mut options = match config {
        Some(path) => FilterOptions::from_json_file(path)?,
        None => FilterOptions::default(),
    };
    options.searchable_prefixes.extend(prefixes);
    Ok(options)
}

fn run_check(mut options: CheckOptions, input: Option<String>) -> Result<(), CliError> {
    let needs_input = !options.syntax_only && !options.ast;
    options.input = match input {
        Some(s) => Some(s),
        None if needs_input && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("{}", canonical),
        CheckResult::Ast(tree) => println!("{}", to_json(&tree, true)?),
        CheckResult::Matches(records) => {
            let records = serde_json::Value::Array(records);
            println!("{}", to_json(&records, options.pretty)?);
        }
        CheckResult::Verdict(matched) => println!("{}", matched),
        CheckResult::Lines(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    Ok(json)
}
