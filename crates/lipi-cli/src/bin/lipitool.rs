use std::process;

use clap::{Parser, Subcommand};

use lipi_cli::commands::accuracy::{format_report, load_corpus, run_accuracy};
use lipi_cli::commands::{convert_ops, load_table, rules_ops};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "lipitool", about = "Romanized Nepali to Devanagari transliteration")]
struct Cli {
    /// Path to a custom rule table TOML (default: built-in table)
    #[arg(long, global = true)]
    rules: Option<String>,

    /// Write JSON trace events to this directory (requires the trace feature)
    #[arg(long, global = true)]
    trace_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text
    Convert {
        /// Romanized Nepali text
        text: String,
        /// Output spans and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain every pipeline stage for the given text
    Explain {
        /// Romanized Nepali text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Transliterate a file line by line
    Batch {
        /// Path to the input file (one entry per line)
        input_file: String,
        /// Path to the output file
        output_file: String,
    },

    /// Run accuracy tests from a TOML corpus or a JSON dataset
    Accuracy {
        /// Path to the corpus (.toml with [[cases]], or .json records)
        corpus_file: String,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rule table maintenance
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Print the built-in rule table TOML
    Export,
    /// Validate a rule table TOML file
    Validate {
        /// Path to the rule table TOML
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = cli.trace_dir.as_deref() {
        lipi_engine::trace_init::init_tracing(std::path::Path::new(dir));
    }

    match cli.command {
        Command::Convert { text, json } => {
            let source = die!(load_table(cli.rules.as_deref()), "Error: {}");
            let out = die!(convert_ops::convert(source.table(), &text, json), "Error: {}");
            println!("{out}");
        }

        Command::Explain { text, json } => {
            let source = die!(load_table(cli.rules.as_deref()), "Error: {}");
            let out = die!(
                convert_ops::explain_cmd(source.table(), &text, json),
                "Error: {}"
            );
            if json {
                println!("{out}");
            } else {
                print!("{out}");
            }
        }

        Command::Batch {
            input_file,
            output_file,
        } => {
            let source = die!(load_table(cli.rules.as_deref()), "Error: {}");
            let n = die!(
                convert_ops::batch_file(source.table(), &input_file, &output_file),
                "Error: {}"
            );
            eprintln!("{n} lines written to {output_file}");
        }

        Command::Accuracy {
            corpus_file,
            category,
            tag,
            verbose,
            json,
        } => {
            let source = die!(load_table(cli.rules.as_deref()), "Error: {}");
            let corpus = die!(load_corpus(&corpus_file), "Failed to load corpus: {}");
            let report = run_accuracy(
                source.table(),
                &corpus,
                category.as_deref(),
                tag.as_deref(),
            );

            if report.results.is_empty() {
                eprintln!("No cases match the given filters");
                process::exit(1);
            }

            if json {
                println!(
                    "{}",
                    die!(serde_json::to_string_pretty(&report), "JSON serialization failed: {}")
                );
            } else {
                print!("{}", format_report(&report, verbose));
            }

            if report.summary.fail > 0 {
                process::exit(1);
            }
        }

        Command::Rules { command } => match command {
            RulesCommand::Export => rules_ops::rules_export(),
            RulesCommand::Validate { file } => {
                let summary = die!(rules_ops::rules_validate(&file), "Error: {}");
                println!("{summary}");
            }
        },
    }
}
