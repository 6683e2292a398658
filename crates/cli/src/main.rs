use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use lustre_core::fetch::DEFAULT_USER_AGENT;
use lustre_core::{
    Article, EnhanceConfig, Enhancer, FetchConfig, HttpFetcher, ensure_row_content, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use serde_json::Value;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Enrich images in feed articles: srcset resolution, enclosure repair and Open Graph data
#[derive(Parser, Debug)]
#[command(name = "lustre")]
#[command(author = "Lustre Contributors")]
#[command(version)]
#[command(about = "Enrich images in feed articles", long_about = None)]
struct Args {
    /// Article JSON file (one article or an array), or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/lustre/config.json when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leave inline <img> tags untouched
    #[arg(long)]
    no_inline: bool,

    /// Leave empty enclosure types untouched
    #[arg(long)]
    no_fix_types: bool,

    /// Fetch the article page for Open Graph metadata when the article has no images
    #[arg(long)]
    extract_og: bool,

    /// Prepend og:description to thin content (with --extract-og)
    #[arg(long)]
    enhance_content: bool,

    /// Replace image enclosures with larger versions found on the article page
    #[arg(long)]
    upgrade_enclosures: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags win over the config file.
    fn enhance_config(&self) -> anyhow::Result<EnhanceConfig> {
        let mut config = EnhanceConfig::load(self.config.as_deref()).context("Failed to load config")?;

        if self.no_inline {
            config.inline_enhancement = false;
        }
        if self.no_fix_types {
            config.fix_enclosure_type = false;
        }
        config.extract_og |= self.extract_og;
        config.enhance_content |= self.enhance_content;
        config.upgrade_enclosures |= self.upgrade_enclosures;

        Ok(config)
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: self.timeout,
            user_agent: self.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let config = args.enhance_config()?;

    if args.verbose {
        echo::print_step(1, 3, "Reading articles");
    }

    let raw = if args.input == "-" {
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    let input: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let (items, is_batch) = match input {
        Value::Array(items) => (items, true),
        value if value.is_object() => (vec![value], false),
        _ => anyhow::bail!("Input must be an article object or an array of them"),
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(raw.len()).bright_white());
        eprintln!("  {} {}", "Articles:".dimmed(), items.len().to_string().bright_white());
        eprintln!();
        echo::print_config(&config);
        if config.enhance_content && !config.extract_og {
            echo::print_warning("--enhance-content has no effect without --extract-og");
            eprintln!();
        }
        echo::print_step(2, 3, "Enriching articles");
    }

    let fetcher = HttpFetcher::new(args.fetch_config()).context("Failed to build HTTP client")?;
    let enhancer = Enhancer::new(config, fetcher);

    let mut enriched = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let article = match serde_json::from_value::<Article>(item.clone()) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(index, error = %e, "Passing through unreadable article");
                enriched.push(ensure_row_content(item));
                continue;
            }
        };

        let started = Instant::now();
        let mut article = enhancer.process_article(article).await;
        article.ensure_content();

        if args.verbose {
            echo::print_article(index, &article, started.elapsed());
        }
        enriched.push(serde_json::to_value(&article)?);
    }

    let value = if is_batch { Value::Array(enriched) } else { enriched.into_iter().next().unwrap_or_default() };

    let mut output = if args.pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    output.push('\n');

    if args.verbose {
        eprintln!();
        echo::print_step(3, 3, "Writing output");
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
