mod candidate;
mod config;
mod extract;
mod fetch;
mod playlist;
mod validate;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use candidate::StreamCandidate;
use config::{
    Config, EmptyPolicy, DEFAULT_CONCURRENCY, DEFAULT_GROUP, DEFAULT_MAX_PROBE, DEFAULT_OUTPUT,
    DEFAULT_SITE_URL,
};
use validate::{HttpProbe, Probe};

#[derive(Parser)]
#[command(
    name = "stream_scraper",
    about = "Scrape a site for live stream links and build an M3U playlist"
)]
struct Cli {
    /// Page to scrape
    #[arg(long, global = true, default_value = DEFAULT_SITE_URL)]
    site: String,
    /// Playlist output path
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// group-title for every entry, also the prefix of placeholder names
    #[arg(long, global = true, default_value = DEFAULT_GROUP)]
    group: String,
    /// Max candidates to probe (0 = all)
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_MAX_PROBE)]
    max_probe: usize,
    /// Probes in flight at once (1 = sequential)
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
    /// What to publish when nothing is found or nothing answers
    #[arg(long, global = true, value_enum, default_value_t = EmptyPolicy::PropagateEmpty)]
    on_empty: EmptyPolicy,
    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    insecure: bool,
    /// Write every extracted candidate without probing
    #[arg(long, global = true)]
    no_validate: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, probe and write the playlist (default)
    Run,
    /// Print extracted candidates without probing or writing anything
    Extract {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new(&self.site)?;
        config.group = self.group.clone();
        config.max_probe = (self.max_probe > 0).then_some(self.max_probe);
        config.concurrency = self.concurrency.max(1);
        config.on_empty = self.on_empty;
        config.insecure = self.insecure;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = cli.config()?;
    if config.insecure {
        tracing::warn!("TLS certificate validation disabled");
    }

    let page_client = fetch::build_client(&config, fetch::PAGE_TIMEOUT)?;

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            println!("Starting {} stream extraction...", config.host);
            let candidates = extract::extract_streams(&page_client, &config).await;
            let prober = HttpProbe::new(fetch::build_client(&config, fetch::PROBE_TIMEOUT)?);
            publish(&prober, candidates, &config, &cli.output, !cli.no_validate)
                .await
                .map(|_| ())
        }
        Commands::Extract { json } => {
            let candidates = extract::extract_streams(&page_client, &config).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                print_candidates(&candidates);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Validate (optionally) and write the playlist. Always writes `output`;
/// returns the number of channels written.
async fn publish<P: Probe>(
    prober: &P,
    candidates: Vec<StreamCandidate>,
    config: &Config,
    output: &Path,
    validate: bool,
) -> anyhow::Result<usize> {
    if candidates.is_empty() {
        println!("No links found. Creating empty playlist.");
        let comment = format!("No streams found from {}", config.host);
        playlist::write_playlist(output, &[], &config.group, &comment)?;
        return Ok(0);
    }

    let working = if validate {
        validate::validate_streams(prober, candidates, config).await?
    } else {
        candidates
    };

    if working.is_empty() {
        println!("No working links found");
        let comment = format!("No working streams found from {}", config.host);
        playlist::write_playlist(output, &[], &config.group, &comment)?;
        return Ok(0);
    }

    let comment = playlist::generated_comment(&config.host);
    playlist::write_playlist(output, &working, &config.group, &comment)?;
    println!(
        "Successfully created playlist with {} channels",
        working.len()
    );
    Ok(working.len())
}

fn print_candidates(candidates: &[StreamCandidate]) {
    if candidates.is_empty() {
        println!("No stream candidates found.");
        return;
    }

    println!("{:>3} | {:<8} | {:<24} | {}", "#", "Kind", "Name", "URL");
    println!("{}", "-".repeat(80));
    for (i, c) in candidates.iter().enumerate() {
        let kind = format!("{:?}", c.kind).to_lowercase();
        println!(
            "{:>3} | {:<8} | {:<24} | {}",
            i + 1,
            kind,
            truncate(&c.name, 24),
            c.url
        );
    }
    println!("\n{} candidates", candidates.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
