use clap::Parser;
use std::path::PathBuf;
use unused_exports::{
    config::{SearchBackend, SearchErrorPolicy},
    reporter::OutputFormat,
    Analyzer, Config, Reporter,
};

#[derive(Parser)]
#[command(name = "unused-exports")]
#[command(about = "Flag exported symbols that nothing else in the source tree references")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Source directory to scan
    #[arg(default_value = "src")]
    path: PathBuf,

    /// Source file extension to collect exports from (repeatable)
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Whole-word search implementation used for usage lookups
    #[arg(long, value_enum, default_value_t = SearchArg::Grep)]
    search: SearchArg,

    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Count an export as used when the search itself fails (not merely finds nothing)
    #[arg(long)]
    assume_used_on_search_error: bool,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum SearchArg {
    Grep,
    Native,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum FormatArg {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::with_target(cli.path);
    if !cli.extensions.is_empty() {
        config.file_extensions = cli
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
    }
    config.search_backend = match cli.search {
        SearchArg::Grep => SearchBackend::Grep,
        SearchArg::Native => SearchBackend::Native,
    };
    if cli.assume_used_on_search_error {
        config.on_search_error = SearchErrorPolicy::AssumeUsed;
    }
    let format = match cli.format {
        FormatArg::Text => OutputFormat::Text,
        FormatArg::Json => OutputFormat::Json,
    };

    let analyzer = Analyzer::new(config)?;
    let mut reporter = Reporter::new(format);
    let report = analyzer.find_unused(&mut reporter);
    reporter.finish(&report)?;

    Ok(())
}
