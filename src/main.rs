use clap::{Args, Parser, Subcommand, ValueEnum};
use donor_signals::config::AppConfig;
use donor_signals::discovery::{
    default_intents, default_presets, filter_candidates, rank_candidates, resolve_active,
    resolve_candidates, toggle_counts, DonorIntent, Preset, PresetId, PresetToggleCount,
    RelevanceBreakdown, RelevanceQuery, SortMode,
};
use donor_signals::error::AppError;
use donor_signals::signals::{
    CharityId, CharitySummary, ConfidenceTier, DerivationContext, EvaluationRecord, SignalBundle,
    SignalSource,
};
use donor_signals::telemetry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "charity-lens",
    about = "Derive donor signals and rank charity evaluations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived signal bundle for every record in a JSON file
    Signals(SignalsArgs),
    /// Filter and rank records against presets and an optional donor intent
    Rank(RankArgs),
    /// Print the active threshold table with its version and hash
    Thresholds,
}

#[derive(Args, Debug)]
struct SignalsArgs {
    /// JSON array of evaluation records (or summaries with --summaries)
    #[arg(long)]
    records: PathBuf,
    /// Treat the input as lightweight charity summaries
    #[arg(long)]
    summaries: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// JSON array of evaluation records
    #[arg(long)]
    records: PathBuf,
    /// Active preset id; repeat for several (combined with AND)
    #[arg(long = "preset")]
    presets: Vec<String>,
    /// Guided path / donor intent id
    #[arg(long)]
    intent: Option<String>,
    /// Sort order for the result list
    #[arg(long, value_enum, default_value_t = SortArg::PurposeMatch)]
    sort: SortArg,
    /// Optional JSON array of presets replacing the built-in catalog
    #[arg(long)]
    preset_catalog: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON on stdout
    Json,
    /// Human-readable report
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    PurposeMatch,
    Score,
    Name,
}

impl From<SortArg> for SortMode {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::PurposeMatch => SortMode::PurposeMatch,
            SortArg::Score => SortMode::Score,
            SortArg::Name => SortMode::Name,
        }
    }
}

#[derive(Debug, Serialize)]
struct SignalsEntry<'a> {
    id: &'a CharityId,
    name: &'a str,
    confidence: ConfidenceTier,
    signals: &'a SignalBundle,
}

#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    id: &'a CharityId,
    name: &'a str,
    overall_score: Option<f64>,
    confidence: ConfidenceTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    relevance: Option<RelevanceBreakdown>,
    signals: &'a SignalBundle,
}

#[derive(Debug, Serialize)]
struct RankResponse<'a> {
    config_version: &'a str,
    config_hash: &'a str,
    active_presets: Vec<&'a PresetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<&'a str>,
    total: usize,
    results: Vec<RankedEntry<'a>>,
    toggle_counts: Vec<PresetToggleCount>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let thresholds = config.signals.load_thresholds()?;
    let as_of_year = config.signals.reference_year();
    info!(
        ?config.environment,
        config_version = thresholds.version(),
        as_of_year,
        "donor signal engine configured"
    );
    let ctx = DerivationContext::new(&thresholds, as_of_year);

    match cli.command {
        Command::Signals(args) if args.summaries => {
            let summaries: Vec<CharitySummary> = read_json(&args.records)?;
            print_signals(&summaries, &ctx, args.format)
        }
        Command::Signals(args) => {
            let records: Vec<EvaluationRecord> = read_json(&args.records)?;
            print_signals(&records, &ctx, args.format)
        }
        Command::Rank(args) => run_rank(args, &ctx),
        Command::Thresholds => write_json(&thresholds),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), value)?;
    println!();
    Ok(())
}

fn print_signals<S: SignalSource>(
    sources: &[S],
    ctx: &DerivationContext<'_>,
    format: OutputFormat,
) -> Result<(), AppError> {
    info!(count = sources.len(), "deriving donor signals");
    let candidates = resolve_candidates(sources, ctx);
    let entries: Vec<SignalsEntry<'_>> = candidates
        .iter()
        .map(|candidate| SignalsEntry {
            id: candidate.source.charity_id(),
            name: candidate.source.charity_name(),
            confidence: candidate.source.confidence_or_low(),
            signals: &candidate.signals,
        })
        .collect();
    match format {
        OutputFormat::Json => write_json(&entries),
        OutputFormat::Text => {
            render::render_signals(&entries);
            Ok(())
        }
    }
}

fn run_rank(args: RankArgs, ctx: &DerivationContext<'_>) -> Result<(), AppError> {
    let records: Vec<EvaluationRecord> = read_json(&args.records)?;
    let catalog: Vec<Preset> = match &args.preset_catalog {
        Some(path) => read_json(path)?,
        None => default_presets(),
    };
    let intents = default_intents();
    let intent: Option<&DonorIntent> = match args.intent.as_deref() {
        Some(id) => {
            let found = intents.iter().find(|intent| intent.id == id);
            if found.is_none() {
                warn!(intent = id, "unknown donor intent; ranking without it");
            }
            found
        }
        None => None,
    };

    let active_ids: BTreeSet<PresetId> = args.presets.into_iter().map(PresetId).collect();
    let active = resolve_active(&catalog, &active_ids);

    let candidates = resolve_candidates(&records, ctx);
    let visible = filter_candidates(&candidates, &active);
    info!(
        loaded = records.len(),
        visible = visible.len(),
        active = active.len(),
        "filtered charities"
    );

    let query = RelevanceQuery {
        catalog: &catalog,
        active: active.clone(),
        intent,
    };
    let ranked = rank_candidates(
        visible,
        &query,
        &ctx.config.thresholds().relevance,
        args.sort.into(),
    );

    let results: Vec<RankedEntry<'_>> = ranked
        .iter()
        .map(|ranked| RankedEntry {
            id: ranked.candidate.source.charity_id(),
            name: ranked.candidate.source.charity_name(),
            overall_score: ranked.candidate.source.overall_score(),
            confidence: ranked.candidate.source.confidence_or_low(),
            relevance: ranked.relevance,
            signals: &ranked.candidate.signals,
        })
        .collect();

    let response = RankResponse {
        config_version: ctx.config.version(),
        config_hash: ctx.config.hash(),
        active_presets: active.iter().map(|preset| &preset.id).collect(),
        intent: intent.map(|intent| intent.id.as_str()),
        total: results.len(),
        results,
        toggle_counts: toggle_counts(&candidates, &catalog, &active_ids),
    };

    match args.format {
        OutputFormat::Json => write_json(&response),
        OutputFormat::Text => {
            render::render_rank(&response, &catalog);
            Ok(())
        }
    }
}

