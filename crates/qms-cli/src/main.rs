use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qms_core::{
    Catalog, Domain, Facet, Filter, Overview, Query, RecordStore, Settings, DEFAULT_RECENT_LIMIT,
};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser)]
#[command(name = "qms")]
#[command(about = "Quality management records CLI", long_about = None)]
struct Cli {
    /// Catalog snapshot (JSON); the built-in records are used when omitted
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,
    /// Evaluation date for overdue checks
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    today: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// List controlled documents
    #[command(alias = "docs")]
    Documents(DocumentArgs),
    /// List audits
    Audits(StatusArgs),
    /// List training sessions
    Training(StatusArgs),
    /// List non-conformance reports
    #[command(alias = "ncr", alias = "non-conformance")]
    Nc(StatusArgs),
    /// Per-status counts and totals
    Summary(SummaryArgs),
    /// Dashboard tiles, upcoming training and recent reports
    Overview(OverviewArgs),
}

#[derive(Args, Debug)]
struct DocumentArgs {
    #[arg(long, alias = "query")]
    search: Option<String>,
    /// Category value, or `all`
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args, Debug)]
struct StatusArgs {
    #[arg(long, alias = "query")]
    search: Option<String>,
    /// Status value, or `all`
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    domain: Option<Domain>,
}

#[derive(Args, Debug)]
struct OverviewArgs {
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    recent: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()
        .and_then(|settings| {
            settings.with_overrides(cli.data.clone(), cli.today.as_deref(), cli.debug)
        })
        .context("Invalid configuration")?;
    init_logging(&settings);

    let catalog = Catalog::load(&settings).context("Failed to load catalog")?;
    let today = settings.evaluation_date();
    tracing::debug!(%today, command = ?cli.command, "qms start");

    match cli.command {
        Commands::Documents(args) => {
            let store = &catalog.documents;
            let query = build_query(store, args.search.as_deref(), args.category.as_deref());
            let records = store.query(&query);
            if cli.json {
                return print_json(&records);
            }
            print_list(store, records.len(), report::document_lines(&records));
        }
        Commands::Audits(args) => {
            let store = &catalog.audits;
            let query = build_query(store, args.search.as_deref(), args.status.as_deref());
            let records = store.query(&query);
            if cli.json {
                return print_json(&records);
            }
            print_list(store, records.len(), report::audit_lines(&records));
        }
        Commands::Training(args) => {
            let store = &catalog.training;
            let query = build_query(store, args.search.as_deref(), args.status.as_deref());
            let records = store.query(&query);
            if cli.json {
                return print_json(&records);
            }
            print_list(store, records.len(), report::training_lines(&records));
        }
        Commands::Nc(args) => {
            let store = &catalog.non_conformances;
            let query = build_query(store, args.search.as_deref(), args.status.as_deref());
            let records = store.query(&query);
            let rows = report::nc_rows(&records, today);
            if cli.json {
                return print_json(&rows);
            }
            print_list(store, rows.len(), report::nc_lines(&rows));
        }
        Commands::Summary(args) => {
            let summary = report::SummaryReport::build(&catalog, args.domain, today);
            if cli.json {
                return print_json(&summary);
            }
            print_lines(report::summary_lines(&catalog, &summary));
        }
        Commands::Overview(args) => {
            let overview = Overview::build(&catalog, today, args.recent);
            if cli.json {
                return print_json(&overview);
            }
            print_lines(report::overview_lines(&overview));
        }
    }

    Ok(())
}

fn build_query<R: 'static>(
    store: &RecordStore<R>,
    search: Option<&str>,
    filter: Option<&str>,
) -> Query {
    let query = Query::new(search, filter);
    warn_unknown_filter(&store.schema().filter, query.filter());
    query
}

fn warn_unknown_filter<R>(facet: &Facet<R>, filter: &Filter) {
    if let Filter::Only(value) = filter {
        if !facet.values().contains(&value.as_str()) {
            tracing::warn!(
                field = facet.field,
                value = %value,
                expected = ?facet.values(),
                "filter value matches no records"
            );
        }
    }
}

fn print_list<R: 'static>(store: &RecordStore<R>, shown: usize, lines: Vec<String>) {
    println!("{}", report::heading(store.domain(), shown, store.len()));
    if lines.is_empty() {
        println!("No matching records.");
        return;
    }
    print_lines(lines);
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn print_json<T: Serialize + ?Sized>(payload: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(payload)?;
    println!("{}", payload);
    Ok(())
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level("warn")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
