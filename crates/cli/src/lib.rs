use anyhow::{Context, Result};
use attest_lens_engine::{
    parse_date, AssetSession, EngineConfig, LayoutConfig, RecipeSelection, Viewer,
};
use attest_lens_records::{load_catalog, LoadedCatalog};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::flags::OnchainFlag;

mod flags;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "attest-lens")]
#[command(about = "Inspect the attestation badge ring of real-world assets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding the asset, attestation, type and recipe corpora
    #[arg(long, global = true, env = "ATTEST_LENS_DATA_DIR", default_value = ".")]
    data: PathBuf,

    /// Layout configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate decay at this time (RFC 3339 or YYYY-MM-DD) instead of now
    #[arg(long, global = true)]
    now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and lay out the badge ring of an asset
    Ring(RingArgs),

    /// Show the detail view of one badge
    Detail(DetailArgs),

    /// List attestors that can still be added to the lens
    Attestors(AttestorsArgs),

    /// List recipes, marking the selected one
    Recipes(RecipesArgs),

    /// Find the asset mentioned in a table row and show its card
    Find(FindArgs),

    /// Load the corpora and report rejected entries
    Check(CheckArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// Asset name
    asset: String,

    /// Only show attestations by this attestor (repeatable)
    #[arg(long = "attestor", value_name = "NAME")]
    attestors: Vec<String>,

    /// On-chain filter
    #[arg(long, value_enum)]
    onchain: Option<OnchainFlag>,

    /// Recipe to resolve against ("all" for freeform)
    #[arg(long)]
    recipe: Option<String>,

    /// Use the half-size thumbnail card layout; takes precedence over --config
    #[arg(long)]
    thumbnail: bool,
}

#[derive(Args)]
struct RingArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DetailArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Slot index, as printed by `ring`
    #[arg(long)]
    slot: usize,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AttestorsArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RecipesArgs {
    /// Currently selected recipe
    #[arg(long)]
    recipe: Option<String>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FindArgs {
    /// Table row text containing an asset name or ticker
    row: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CorpusCheck {
    corpus: String,
    accepted: usize,
    rejected: Vec<String>,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Ring(args) => args.json,
        Commands::Detail(args) => args.json,
        Commands::Attestors(args) => args.json,
        Commands::Recipes(args) => args.json,
        Commands::Find(args) => args.json,
        Commands::Check(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref()).await?;
    let now = match cli.now.as_deref() {
        Some(raw) => parse_date("now", raw).context("Invalid --now value")?,
        None => Utc::now(),
    };
    let run = RunContext {
        data: cli.data,
        config,
        now,
    };

    match cli.command {
        Commands::Ring(args) => run.ring(args).await?,
        Commands::Detail(args) => run.detail(args).await?,
        Commands::Attestors(args) => run.attestors(args).await?,
        Commands::Recipes(args) => run.recipes(args).await?,
        Commands::Find(args) => run.find(args).await?,
        Commands::Check(args) => run.check(args).await?,
    }

    Ok(())
}

async fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = EngineConfig::from_toml_str(&raw)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded layout config from {}", path.display());
    Ok(config)
}

struct RunContext {
    data: PathBuf,
    config: EngineConfig,
    now: DateTime<Utc>,
}

impl RunContext {
    async fn load(&self) -> Result<LoadedCatalog> {
        load_catalog(&self.data)
            .await
            .with_context(|| format!("Failed to load corpora from {}", self.data.display()))
    }

    async fn viewer(&self, layout: LayoutConfig) -> Viewer {
        let mut viewer = Viewer::new(EngineConfig { layout });
        let outcome = load_catalog(&self.data).await.map(|loaded| {
            if loaded.rejected_count() > 0 {
                log::warn!(
                    "{} corpus entries rejected; run `attest-lens check` for details",
                    loaded.rejected_count()
                );
            }
            loaded.catalog
        });
        viewer.finish_loading(outcome);
        viewer
    }

    async fn open(&self, view: &ViewArgs) -> Result<AssetSession> {
        let layout = if view.thumbnail {
            if self.config.layout != LayoutConfig::default() {
                log::debug!("--thumbnail replaces the layout from --config");
            }
            LayoutConfig::for_thumbnail()
        } else {
            self.config.layout
        };

        let mut viewer = self.viewer(layout).await;
        viewer.select_recipe(RecipeSelection::from(view.recipe.clone()));
        let mut session = viewer.open(&view.asset)?;

        for attestor in &view.attestors {
            session.add_attestor(attestor.as_str());
        }
        if let Some(onchain) = view.onchain {
            session.set_onchain_filter(onchain.as_domain());
        }
        Ok(session)
    }

    async fn ring(&self, args: RingArgs) -> Result<()> {
        let session = self.open(&args.view).await?;
        let view = session.render(self.now);
        if args.json {
            print_json(&view)
        } else {
            print_stdout(&report::render_ring(&view))
        }
    }

    async fn detail(&self, args: DetailArgs) -> Result<()> {
        let session = self.open(&args.view).await?;
        let detail = session.detail(args.slot)?;
        if args.json {
            print_json(&detail)
        } else {
            print_stdout(&report::render_detail(args.slot, &detail))
        }
    }

    async fn attestors(&self, args: AttestorsArgs) -> Result<()> {
        let session = self.open(&args.view).await?;
        let options = session.attestor_options();
        if args.json {
            print_json(&options)
        } else {
            print_stdout(&report::render_attestors(&options))
        }
    }

    async fn recipes(&self, args: RecipesArgs) -> Result<()> {
        let mut viewer = self.viewer(self.config.layout).await;
        viewer.select_recipe(RecipeSelection::from(args.recipe));
        let options = viewer.recipe_options()?;
        if args.json {
            print_json(&options)
        } else {
            print_stdout(&report::render_recipes(&options))
        }
    }

    async fn find(&self, args: FindArgs) -> Result<()> {
        let viewer = self.viewer(self.config.layout).await;
        let card = viewer.open_row(&args.row)?.card();
        if args.json {
            print_json(&card)
        } else {
            print_stdout(&report::render_card(&card))
        }
    }

    async fn check(&self, args: CheckArgs) -> Result<()> {
        let loaded = self.load().await?;
        if args.json {
            let checks: Vec<_> = loaded
                .reports
                .iter()
                .map(|report| CorpusCheck {
                    corpus: report.corpus.clone(),
                    accepted: report.accepted,
                    rejected: report.rejected.iter().map(ToString::to_string).collect(),
                })
                .collect();
            print_json(&checks)
        } else {
            print_stdout(&report::render_ingest(&loaded.reports))
        }
    }
}
