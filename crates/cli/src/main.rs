use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hdf_store::{
    load_file, ComparisonContext, DataStore, FileId, Filter, FilterEngine, Selection,
    StatusCounts,
};
use std::path::PathBuf;

use crate::flags::{SeverityFlag, StatusFlag};

mod flags;

#[derive(Parser)]
#[command(name = "hdf")]
#[command(about = "Query security-compliance scan results", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-file status tallies
    Summary {
        /// Scan result or profile files to load
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List controls matching the given criteria
    Search {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Case-insensitive term looked for in id, title, code,
        /// severity, status, and finding details
        #[arg(long)]
        term: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusFlag>,

        #[arg(long, value_enum)]
        severity: Option<SeverityFlag>,

        /// Classification tree path, e.g. --category AC --category 3
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Keep controls superseded by an overlay layer
        #[arg(long)]
        include_overlaid: bool,
    },
    /// Show controls whose outcome differs between runs
    Compare {
        /// Two or more scan result files
        #[arg(required = true, num_args = 2..)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = DataStore::new();
    let mut selection = Selection::new();
    let mut engine = FilterEngine::new();

    match cli.command {
        Commands::Summary { files } => {
            let ids = load_all(&mut store, &mut selection, &files).await?;
            for id in ids {
                let file = store.get(id).context("file vanished from registry")?;
                let mut filter = Filter::for_files(vec![id]);
                filter.omit_overlayed_controls = Some(true);
                let counts = StatusCounts::tally(&mut engine, &store, &filter);
                println!(
                    "{}: {} controls (passed {}, failed {}, not applicable {}, \
                     not reviewed {}, profile error {}, from profile {})",
                    file.meta.filename,
                    counts.total(),
                    counts.passed,
                    counts.failed,
                    counts.not_applicable,
                    counts.not_reviewed,
                    counts.profile_error,
                    counts.from_profile,
                );
            }
        }
        Commands::Search {
            files,
            term,
            status,
            severity,
            categories,
            include_overlaid,
        } => {
            let ids = load_all(&mut store, &mut selection, &files).await?;
            let filter = Filter {
                from_file: ids,
                status: status.map(StatusFlag::as_domain),
                severity: severity.map(SeverityFlag::as_domain),
                control_id: None,
                search_term: term,
                omit_overlayed_controls: Some(!include_overlaid),
                tree_path: categories,
            };

            let controls = engine.controls(&store, &filter);
            for control in controls.iter() {
                println!(
                    "{}\t{}\t{}\t{}",
                    control.data.id,
                    control.status.as_str(),
                    control.severity.as_str(),
                    control.data.title.as_deref().unwrap_or("(untitled)"),
                );
            }
            log::info!("{} control(s) matched", controls.len());
        }
        Commands::Compare { files } => {
            let ids = load_all(&mut store, &mut selection, &files).await?;
            let evaluations = engine.evaluations(&store, &ids);
            anyhow::ensure!(
                evaluations.len() >= 2,
                "compare needs at least two evaluation files"
            );

            let context = ComparisonContext::new(&evaluations);
            let changed = context.changed();
            println!(
                "{} unique control(s) across {} run(s), {} changed",
                context.unique_controls(),
                context.num_evaluations(),
                changed.len(),
            );
            for id in changed {
                let statuses: Vec<&str> = context.pairings[id]
                    .iter()
                    .map(|slot| slot.as_ref().map_or("-", |c| c.status.as_str()))
                    .collect();
                println!("{id}: {}", statuses.join(" -> "));
            }
        }
    }

    Ok(())
}

async fn load_all(
    store: &mut DataStore,
    selection: &mut Selection,
    files: &[PathBuf],
) -> Result<Vec<FileId>> {
    let mut ids = Vec::with_capacity(files.len());
    for path in files {
        let id = load_file(store, selection, path)
            .await
            .with_context(|| format!("Cannot load {}", path.display()))?;
        ids.push(id);
    }
    Ok(ids)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .target(env_logger::Target::Stderr)
        .init();
}
