//! adforge - campaign structure and bulk-import CSV export CLI
//!
//! ## Commands
//!
//! - `export`: build, validate and write the import CSV for a draft
//! - `validate`: print the validation report for a draft
//! - `preview`: show the campaign structure a draft produces
//! - `generate-ads`: fill a draft's ads from the generation service
//! - `digest`: print the content digest used for autosave

use std::path::{Path, PathBuf};
use std::time::Duration;

use adforge_core::{
    build_from_draft, draft_digest, export, format_report, validate_campaigns, AdKind,
    BuiltinCatalog, CampaignDraft, ExportError, ExportOptions, Strategy,
};
use adforge_gen::{
    generate_for_draft, FallbackProducer, GenerationConfig, GenerationContext, HttpAdCopyClient,
};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "adforge")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Campaign structure engine and bulk-import CSV exporter", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines and machine-readable reports
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, validate and write the import CSV
    Export {
        /// Path to the draft (JSON)
        #[arg(short, long)]
        draft: PathBuf,

        /// Output file or directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date stamped into the file name (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Override the draft's structure type
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<Strategy>,

        /// Leave final URLs without UTM parameters
        #[arg(long)]
        no_utm: bool,
    },

    /// Print the validation report; exits non-zero when export would be blocked
    Validate {
        #[arg(short, long)]
        draft: PathBuf,
    },

    /// Show the campaign structure a draft produces
    Preview {
        #[arg(short, long)]
        draft: PathBuf,

        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<Strategy>,
    },

    /// Generate ads for every ad group and write the updated draft
    GenerateAds {
        #[arg(short, long)]
        draft: PathBuf,

        /// Where to write the updated draft (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Ad kinds to request per ad group
        #[arg(long, value_enum, value_delimiter = ',', default_value = "rsa")]
        kinds: Vec<KindArg>,

        /// Skip the service and use local templates only
        #[arg(long)]
        offline: bool,
    },

    /// Print the draft's content digest
    Digest {
        #[arg(short, long)]
        draft: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Rsa,
    Dki,
    CallOnly,
}

impl From<KindArg> for AdKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Rsa => AdKind::Rsa,
            KindArg::Dki => AdKind::Dki,
            KindArg::CallOnly => AdKind::CallOnly,
        }
    }
}

fn parse_strategy(s: &str) -> std::result::Result<Strategy, String> {
    s.parse::<Strategy>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    adforge_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Export {
            draft,
            output,
            date,
            strategy,
            no_utm,
        } => cmd_export(&draft, output.as_deref(), date, strategy, no_utm, cli.json),
        Commands::Validate { draft } => cmd_validate(&draft, cli.json),
        Commands::Preview { draft, strategy } => cmd_preview(&draft, strategy, cli.json),
        Commands::GenerateAds {
            draft,
            output,
            kinds,
            offline,
        } => cmd_generate_ads(&draft, &output, &kinds, offline).await,
        Commands::Digest { draft } => cmd_digest(&draft),
    }
}

fn load_draft(path: &Path) -> Result<CampaignDraft> {
    let json = std::fs::read_to_string(path).context(format!("Failed to read {:?}", path))?;
    CampaignDraft::from_json(&json).context(format!("Invalid draft in {:?}", path))
}

fn with_strategy(draft: CampaignDraft, strategy: Option<Strategy>) -> CampaignDraft {
    match strategy {
        Some(strategy) => draft.with_strategy(strategy),
        None => draft,
    }
}

/// Build, validate and write the CSV. Nothing is written when blocked.
fn cmd_export(
    draft_path: &Path,
    output: Option<&Path>,
    date: Option<NaiveDate>,
    strategy: Option<Strategy>,
    no_utm: bool,
    json: bool,
) -> Result<()> {
    let draft = with_strategy(load_draft(draft_path)?, strategy);
    let mut options = ExportOptions::from_env();
    if let Some(date) = date {
        options = options.with_date(date);
    }
    if no_utm {
        options = options.without_utm();
    }

    let artifact = match export(&draft, &BuiltinCatalog, &options) {
        Ok(artifact) => artifact,
        Err(ExportError::Blocked(report)) => {
            if json {
                eprintln!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprintln!("{}", format_report(&report));
            }
            bail!("Export blocked: {} validation error(s)", report.errors.len());
        }
        Err(err) => return Err(err).context("Failed to build campaign structure"),
    };

    let path = match output {
        Some(p) if p.is_dir() => p.join(&artifact.file_name),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&artifact.file_name),
    };
    std::fs::write(&path, &artifact.csv).context(format!("Failed to write to {:?}", path))?;

    if !artifact.report.warnings.is_empty() {
        eprintln!("{}", format_report(&artifact.report));
    }
    info!(path = %path.display(), rows = artifact.row_count, "export written");
    println!(
        "Exported {} campaign(s), {} rows to {:?}",
        artifact.campaign_count, artifact.row_count, path
    );
    Ok(())
}

fn cmd_validate(draft_path: &Path, json: bool) -> Result<()> {
    let draft = load_draft(draft_path)?;
    let campaigns =
        build_from_draft(&draft, &BuiltinCatalog).context("Failed to build campaign structure")?;
    let report = validate_campaigns(&campaigns);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.errors.is_empty() && report.warnings.is_empty() {
        println!("No issues found");
    } else {
        println!("{}", format_report(&report));
    }

    if !report.is_valid() {
        bail!("{} validation error(s)", report.errors.len());
    }
    Ok(())
}

fn cmd_preview(draft_path: &Path, strategy: Option<Strategy>, json: bool) -> Result<()> {
    let draft = with_strategy(load_draft(draft_path)?, strategy);
    let campaigns =
        build_from_draft(&draft, &BuiltinCatalog).context("Failed to build campaign structure")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&campaigns)?);
        return Ok(());
    }

    if campaigns.iter().all(|c| c.ad_groups.is_empty()) {
        println!("No ad groups: select keywords and a structure type");
        return Ok(());
    }
    for campaign in &campaigns {
        let targets: Vec<&str> = campaign.geo_targets.iter().map(|t| t.name.as_str()).collect();
        println!("campaign {}", campaign.name);
        println!("Targets: {}", targets.join(", "));
        println!();
        for group in &campaign.ad_groups {
            let ads = campaign.ads_for(&group.name).count();
            println!(
                "    {} ({} keywords, {} ads)",
                group.name,
                group.keywords.len(),
                ads
            );
            for keyword in &group.keywords {
                println!("        {}", keyword.decorated());
            }
        }
        println!();
    }
    Ok(())
}

async fn cmd_generate_ads(
    draft_path: &Path,
    output: &Path,
    kinds: &[KindArg],
    offline: bool,
) -> Result<()> {
    let draft = load_draft(draft_path)?;
    let kinds: Vec<AdKind> = kinds.iter().copied().map(AdKind::from).collect();
    let config = GenerationConfig::from_env();
    let context = GenerationContext {
        num_ads: config.num_ads,
        ..GenerationContext::default()
    };

    let updated = if offline {
        generate_for_draft(
            &adforge_gen::LocalTemplateProducer,
            &draft,
            &BuiltinCatalog,
            &kinds,
            &context,
        )
        .await?
    } else {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = HttpAdCopyClient::new(config).context("Failed to create HTTP client")?;
        let producer = FallbackProducer::new(client, timeout);
        generate_for_draft(&producer, &draft, &BuiltinCatalog, &kinds, &context).await?
    };

    let json = serde_json::to_string_pretty(&updated)?;
    std::fs::write(output, &json).context(format!("Failed to write to {:?}", output))?;
    println!("Generated {} ad(s) into {:?}", updated.ads.len(), output);
    Ok(())
}

fn cmd_digest(draft_path: &Path) -> Result<()> {
    let draft = load_draft(draft_path)?;
    let digest = draft_digest(&draft)?;
    println!("{}", digest);
    Ok(())
}
