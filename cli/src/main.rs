mod http;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use entities::{
    ApiError, ClientConfig, EndpointRegistry, EntityRoutes, Notice, NoticeKind, Record, RecordId, RegistryError,
    TableError, TableState, ViewRoute, default_columns, fetch_collection, fetch_detail,
};
use serde_json::Value;

use crate::http::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("{}", describe_api_error(.0))]
    Api(#[from] ApiError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("{0}; pass --allow-fallback to use the generic endpoint")]
    Unregistered(RegistryError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("`{0}` has no view endpoint")]
    NoViewRoute(String),
    #[error("aborted")]
    Aborted,
    #[error("{title}: {message}")]
    ActionFailed { title: String, message: String },
    #[error("read confirmation: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tripdesk-cli", about = "TripDesk marketplace admin console")]
struct Cli {
    #[arg(long, env = "TRIPDESK_BASE_URL", default_value = entities::transport::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "TRIPDESK_TOKEN")]
    token: Option<String>,

    #[arg(long, env = "TRIPDESK_TIMEOUT_SECS", default_value_t = entities::DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Allow route keys that are not registered explicitly.
    #[arg(long, default_value_t = false)]
    allow_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the endpoint table.
    Routes,
    /// List records, optionally filtered by a search query.
    List(ListArgs),
    /// Fetch one record's detail.
    View { route_key: String, id: String },
    /// Delete one record.
    Delete {
        route_key: String,
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Delete several records concurrently.
    BulkDelete(BulkDeleteArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    route_key: String,
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct BulkDeleteArgs {
    route_key: String,
    /// Ids to delete.
    ids: Vec<String>,
    /// Select every record matching this query instead of listing ids.
    #[arg(long, conflicts_with = "ids")]
    matching: Option<String>,
    #[arg(long, default_value_t = false)]
    yes: bool,
}

struct CliContext {
    registry: EndpointRegistry,
    transport: ReqwestTransport,
    allow_fallback: bool,
}

impl CliContext {
    fn routes(&self, route_key: &str) -> Result<EntityRoutes, CliError> {
        if !self.allow_fallback {
            self.registry.validate([route_key]).map_err(CliError::Unregistered)?;
        }
        Ok(self.registry.resolve(route_key).into_owned())
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url).with_timeout(Duration::from_secs(cli.timeout_secs));
    let ctx = CliContext {
        registry: EndpointRegistry::marketplace(),
        transport: ReqwestTransport::new(config, cli.token.as_deref())?,
        allow_fallback: cli.allow_fallback,
    };

    match cli.command {
        Command::Routes => {
            for line in routes_report(&ctx.registry) {
                println!("{line}");
            }
            Ok(())
        }
        Command::List(args) => run_list(&ctx, args).await,
        Command::View { route_key, id } => run_view(&ctx, &route_key, &id).await,
        Command::Delete { route_key, id, yes } => run_delete(&ctx, &route_key, &id, yes).await,
        Command::BulkDelete(args) => run_bulk_delete(&ctx, args).await,
    }
}

async fn run_list(ctx: &CliContext, args: ListArgs) -> Result<(), CliError> {
    let _ = ctx.routes(&args.route_key)?;
    let rows = fetch_collection(&ctx.transport, &ctx.registry, &args.route_key).await?;
    let mut table = TableState::new();
    table.set_query(args.query);
    let view = table.filtered(&rows);

    if args.json {
        let values = view.into_iter().map(Record::into_value).collect::<Vec<_>>();
        return print_json(&Value::Array(values));
    }
    for line in render_rows(&args.route_key, &view) {
        println!("{line}");
    }
    eprintln!("{} of {} records", view.len(), rows.len());
    Ok(())
}

async fn run_view(ctx: &CliContext, route_key: &str, id: &str) -> Result<(), CliError> {
    let routes = ctx.routes(route_key)?;
    let id = parse_record_id(id);
    let path = routes.view_fetch_path(&id)?.ok_or_else(|| CliError::NoViewRoute(route_key.to_owned()))?;
    let record = fetch_detail(&ctx.transport, &path).await?;
    print_json(&record.into_value())
}

async fn run_delete(ctx: &CliContext, route_key: &str, id: &str, yes: bool) -> Result<(), CliError> {
    let routes = ctx.routes(route_key)?;
    let mut rows = fetch_collection(&ctx.transport, &ctx.registry, route_key).await?;
    let mut table = TableState::new();
    table.request_delete(&rows, &find_id(&rows, id)?)?;
    confirm_pending(&mut table, yes)?;
    table.run_confirmed(&mut rows, &routes, &ctx.transport, None).await?;
    report_notice(&table)
}

async fn run_bulk_delete(ctx: &CliContext, args: BulkDeleteArgs) -> Result<(), CliError> {
    let routes = ctx.routes(&args.route_key)?;
    let mut rows = fetch_collection(&ctx.transport, &ctx.registry, &args.route_key).await?;
    let mut table = TableState::new();

    if let Some(query) = args.matching {
        table.set_query(query);
        table.select_all(&rows);
    } else {
        for raw in &args.ids {
            let id = find_id(&rows, raw)?;
            if !table.selection().contains(&id) {
                table.toggle(&id);
            }
        }
    }

    table.request_bulk_delete()?;
    confirm_pending(&mut table, args.yes)?;
    let outcome = table.run_confirmed(&mut rows, &routes, &ctx.transport, None).await?;
    eprintln!(
        "bulk delete settled: requested={} succeeded={} failed={}",
        outcome.succeeded.len() + outcome.failed.len(),
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    report_notice(&table)
}

fn confirm_pending(table: &mut TableState, yes: bool) -> Result<(), CliError> {
    let Some(action) = table.pending() else {
        return Ok(());
    };
    if yes {
        return Ok(());
    }
    eprint!("{} [y/N] ", action.prompt());
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if parse_confirmation(&answer) {
        Ok(())
    } else {
        table.cancel();
        Err(CliError::Aborted)
    }
}

fn report_notice(table: &TableState) -> Result<(), CliError> {
    let Some(notice) = table.notice() else {
        return Ok(());
    };
    if let Some(details) = &notice.details {
        eprintln!("{details}");
    }
    match notice.kind {
        NoticeKind::Success => {
            println!("{}", notice.message);
            Ok(())
        }
        NoticeKind::Partial | NoticeKind::Error => Err(action_failed(notice)),
    }
}

fn action_failed(notice: &Notice) -> CliError {
    CliError::ActionFailed { title: notice.title.clone(), message: notice.message.clone() }
}

/// Connectivity failures keep the underlying cause so operators can tell a
/// refused connection from a timeout.
fn describe_api_error(err: &ApiError) -> String {
    if err.is_connectivity() { format!("{} ({err})", err.user_message()) } else { err.user_message() }
}

fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ids on the command line are text; match them against row ids of either kind.
fn find_id(rows: &[Record], raw: &str) -> Result<RecordId, CliError> {
    let wanted = parse_record_id(raw);
    rows.iter()
        .map(Record::id)
        .find(|id| **id == wanted || id.to_string() == raw)
        .cloned()
        .ok_or(CliError::Table(TableError::UnknownRecord(wanted)))
}

fn parse_record_id(raw: &str) -> RecordId {
    raw.parse::<i64>().map_or_else(|_| RecordId::from(raw), RecordId::Number)
}

fn routes_report(registry: &EndpointRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|routes| {
            let view = match &routes.view {
                ViewRoute::Profile { fetch, .. } | ViewRoute::Detail { fetch, .. } => format!("GET {fetch}"),
                ViewRoute::EditForm => format!("edit form {}", routes.edit_page),
                ViewRoute::None => "-".to_owned(),
            };
            format!("{:<12} list=GET {}  delete=DELETE {}  view={view}", routes.key, routes.list, routes.delete)
        })
        .collect()
}

fn render_rows(route_key: &str, rows: &[Record]) -> Vec<String> {
    let columns = default_columns(route_key);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut header = vec!["ID".to_owned()];
    header.extend(columns.iter().map(|c| c.header.clone()));
    lines.push(header.join("\t"));
    for row in rows {
        let mut cells = vec![row.id().to_string()];
        cells.extend(columns.iter().map(|c| c.cell(row)));
        lines.push(cells.join("\t"));
    }
    lines
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
