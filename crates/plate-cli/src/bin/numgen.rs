use std::path::PathBuf;
use std::process;

use clap::Parser;

use plate_cli::commands::config_ops;
use plate_cli::commands::generate_ops::{self, GenerateRequest};
use plate_cli::trace_init::init_tracing;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(
    name = "numgen",
    version,
    about = "Generate plate-like codes from a position pattern",
    override_usage = "numgen --pattern \"<pattern>\" --definitions \"<def 1>\" [\"<def i>\"...] [--output \"<filename>\"]"
)]
struct Cli {
    /// Position pattern, e.g. "[L, D, D, D, L, L, S, R]"
    #[arg(short, long, required_unless_present = "print_settings")]
    pattern: Option<String>,
    /// Definitions used in the pattern, e.g. "L=[А,В,Е]" "D=[0-9]"
    #[arg(
        short,
        long,
        num_args = 1..,
        required_unless_present = "print_settings"
    )]
    definitions: Vec<String>,
    /// File to export the codes to [default from settings: ./output/numbers.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of codes to generate [default: one representative sweep]
    #[arg(short, long)]
    count: Option<usize>,
    /// Shuffle the generated codes
    #[arg(long)]
    shuffle: bool,
    /// Seed for --shuffle
    #[arg(long)]
    seed: Option<u64>,
    /// Keep every digit combination (no digit rules)
    #[arg(long)]
    no_filter: bool,
    /// Custom settings TOML
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
    /// Print the default settings TOML and exit
    #[arg(long)]
    print_settings: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.print_settings {
        config_ops::settings_export();
        return;
    }

    let settings = die!(
        config_ops::load_settings(cli.settings.as_deref()),
        "Error loading settings: {}"
    );
    let request = GenerateRequest {
        pattern: cli.pattern.unwrap_or_default(),
        definitions: cli.definitions,
        output: cli
            .output
            .unwrap_or_else(|| PathBuf::from(&settings.output.numbers)),
        count: cli.count,
        shuffle: cli.shuffle,
        seed: cli.seed,
        no_filter: cli.no_filter,
    };

    let summary = die!(generate_ops::generate(&request, settings), "Error: {}");
    eprintln!(
        "Wrote {} codes to {} (space: {} combinations, {} per sweep)",
        summary.code_count,
        request.output.display(),
        summary.limits.combinations,
        summary.limits.representative
    );
}
