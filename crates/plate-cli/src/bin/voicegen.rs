use std::path::PathBuf;
use std::process;

use clap::Parser;

use plate_cli::commands::config_ops;
use plate_cli::commands::voiceover_ops::{self, VoiceoverRequest};
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
    name = "voicegen",
    version,
    about = "Render spoken-form voiceovers for generated codes",
    override_usage = "voicegen --input \"<filename>\" --dictionary \"<filename>\" [--output \"<filename>\"]"
)]
struct Cli {
    /// File with one code per line
    #[arg(short, long)]
    input: PathBuf,
    /// Voiceover dictionary, one `key;option, option` entry per line
    #[arg(short, long)]
    dictionary: PathBuf,
    /// Field layout, e.g. "[L1, D, D, D, L2, L2, S, R, R]" [default: whole code]
    #[arg(short, long)]
    pattern: Option<String>,
    /// File to export the voiceovers to [default from settings: ./output/voiceovers.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Voiceovers per code [default: until options repeat]
    #[arg(long, alias = "cpn")]
    count_per_number: Option<usize>,
    /// Let a key repeated within one code read different options
    #[arg(long)]
    quirk: bool,
    /// Print key usage statistics
    #[arg(long)]
    statistics: bool,
    /// Print statistics as JSON
    #[arg(long, requires = "statistics")]
    json: bool,
    /// Custom settings TOML
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = die!(
        config_ops::load_settings(cli.settings.as_deref()),
        "Error loading settings: {}"
    );
    let request = VoiceoverRequest {
        input: cli.input,
        dictionary: cli.dictionary,
        layout: cli.pattern,
        output: cli
            .output
            .unwrap_or_else(|| PathBuf::from(&settings.output.voiceovers)),
        count_per_number: cli.count_per_number,
        quirk: cli.quirk,
    };

    let summary = die!(
        voiceover_ops::render_voiceovers(&request, settings),
        "Error: {}"
    );
    eprintln!(
        "Wrote {} voiceovers for {} codes to {}",
        summary.voiceover_count,
        summary.code_count,
        request.output.display()
    );

    if cli.statistics {
        if cli.json {
            let json = die!(
                serde_json::to_string_pretty(&summary.statistics),
                "Error serializing statistics: {}"
            );
            println!("{json}");
        } else {
            println!();
            println!("-----------");
            println!("Statistics:");
            print!("{}", summary.statistics);
            println!("-----------");
        }
    }
}
