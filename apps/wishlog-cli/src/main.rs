use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{info, warn};
use wishlog_core::gacha::{default_pool_ids, KNOWN_POOLS};
use wishlog_core::{logging, write_export, CoreConfig, GachaService, PoolStatistic, SettingsStore};

#[derive(Parser, Debug)]
#[command(name = "wishlog")]
#[command(about = "Gacha log fetcher, pity statistics and UIGF export", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "wishlog.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every pool and print pity statistics
    Analyze {
        /// Gacha log link; falls back to the last used link
        #[arg(short, long)]
        link: Option<String>,
        /// Pool codes to query, in order
        #[arg(short, long = "pool")]
        pools: Vec<String>,
        /// Write a UIGF export file
        #[arg(long)]
        export: bool,
        /// Export directory, overrides config
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known pool codes
    Pools,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();
    let cfg = CoreConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    match args.command {
        Command::Pools => {
            for (code, name) in KNOWN_POOLS {
                println!("{code}\t{name}");
            }
            Ok(())
        }
        Command::Analyze {
            link,
            pools,
            export,
            out,
            json,
        } => run_analyze(&cfg, link, pools, export, out, json).await,
    }
}

async fn run_analyze(
    cfg: &CoreConfig,
    link: Option<String>,
    pools: Vec<String>,
    export: bool,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = SettingsStore::new(cfg.settings.path.clone());
    let link = match link {
        Some(link) => link,
        None => settings
            .last_gacha_link()?
            .ok_or_else(|| anyhow!("no link given and no cached link in {}", settings.path().display()))?,
    };
    let pools = if pools.is_empty() { default_pool_ids() } else { pools };

    let service = GachaService::from_config(&cfg.fetch)?;
    let report = service.analyze_all(&link, &pools).await?;
    settings.remember_gacha_link(&link)?;

    for (pool, err) in &report.truncated {
        warn!(pool = %pool, error = %err, "pool history may be incomplete");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.statistics)?);
    } else {
        for stat in &report.statistics {
            print!("{}", render_statistic(stat));
        }
    }

    if export {
        let dir = out.unwrap_or_else(|| cfg.export.output_dir.clone());
        let path = write_export(&report.export(), &dir).await?;
        info!(path = %path.display(), "export saved");
        println!("exported to {}", path.display());
    }
    Ok(())
}

fn render_statistic(stat: &PoolStatistic) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", stat.pool_name, stat.pool_type_id);
    let _ = writeln!(
        out,
        "  total {}  5-star {}  pity {}",
        stat.total_count, stat.five_star_count, stat.current_pity
    );
    for record in &stat.five_star_records {
        let _ = writeln!(out, "  {}  {} [{}]", record.time, record.name, record.pity_used);
    }
    out
}
