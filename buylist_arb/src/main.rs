//! Buylist Arb - finds Card Kingdom buylist offers above CardShark prices
//!
//! Results go to stdout as CSV, diagnostics to stderr.

use buylist_arb::config::{DEFAULT_CONFIG_FILE, MAX_CONCURRENCY};
use buylist_arb::{CardsharkClient, Config, EntryReader, PriceSource, ResultSink, RunStats};
use clap::Parser;
use mtg_common::Canonicalizer;
use std::path::PathBuf;
use std::sync::Arc;

/// Compare a Card Kingdom buylist export against CardShark prices
#[derive(Parser, Debug)]
#[command(name = "buylist_arb")]
#[command(version, about, long_about = None)]
struct Args {
    /// Card Kingdom buylist CSV export
    input: PathBuf,

    /// JSON file with the CardShark api_key and user_name
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// CardShark host to query
    #[arg(long, default_value = buylist_arb::cardshark::DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(stats) => stats.log_summary(),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: &Args) -> buylist_arb::Result<RunStats> {
    let config = Config::load(&args.config)?;
    let canonicalizer = Arc::new(Canonicalizer::embedded()?);
    let entries = EntryReader::open(&args.input)?;

    let prices: Arc<dyn PriceSource> =
        Arc::new(CardsharkClient::with_base_url(&config, &args.base_url));
    let mut sink = ResultSink::new(std::io::stdout().lock());

    buylist_arb::run(entries, canonicalizer, prices, &mut sink, MAX_CONCURRENCY).await
}
