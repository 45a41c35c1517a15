//! Terminal host for the invoice back office.
//!
//! ARCHITECTURE
//! ============
//! Startup wires the library pieces in a fixed order: config, file-backed
//! storage, session store (restored from storage), then the API client sharing
//! that same storage. Each command runs inside [`SessionStore::scope`]. After
//! the command, any session-expired events raised by a 401 are drained: the
//! in-memory session is reset and the login redirect is reported.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use invoice_desk::config::{ClientConfig, ConfigError, default_state_dir};
use invoice_desk::net::types::{InvoiceQuery, InvoiceUpdate, RegisterRequest, SupplierCreate, SupplierQuery, SupplierUpdate};
use invoice_desk::net::{ApiClient, ApiError};
use invoice_desk::state::{directory, session};
use invoice_desk::state::{LoginFailure, LoginOutcome, SessionStore};
use invoice_desk::storage::{FileStore, KeyValueStore, StorageError};
use invoice_desk::views::dashboard::DashboardView;
use invoice_desk::views::documents::{DocumentFilter, DocumentsView, StatusFilter};
use invoice_desk::views::inbox::{InboxView, InvoiceDetail};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("login rejected: {0}")]
    Login(LoginFailure),
}

#[derive(Parser, Debug)]
#[command(name = "invoice-desk", about = "Invoice processing back office CLI")]
struct Cli {
    #[arg(long, env = "INVOICE_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "INVOICE_STATE_DIR", help = "Directory holding session.json")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in as one of the built-in users.
    Login {
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    Logout,
    /// Print the local session.
    Whoami,
    Auth(AuthCommand),
    Invoices(InvoicesCommand),
    Suppliers(SuppliersCommand),
    Dashboard,
    Documents {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    Inbox {
        #[arg(long, help = "Show the detail panel for one invoice")]
        id: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long, help = "RegisterRequest as JSON")]
        data: String,
    },
    Me,
}

#[derive(Args, Debug)]
struct InvoicesCommand {
    #[command(subcommand)]
    command: InvoicesSubcommand,
}

#[derive(Subcommand, Debug)]
enum InvoicesSubcommand {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        status: Option<String>,
    },
    Get {
        id: i64,
    },
    Upload {
        path: PathBuf,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Approve {
        id: i64,
    },
    Reject {
        id: i64,
        #[arg(long)]
        reason: String,
    },
    Stats,
    Metrics,
}

#[derive(Args, Debug)]
struct SuppliersCommand {
    #[command(subcommand)]
    command: SuppliersSubcommand,
}

#[derive(Subcommand, Debug)]
enum SuppliersSubcommand {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    let state_dir = cli.state_dir.clone().unwrap_or_else(default_state_dir);

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&state_dir)?);
    let store = Arc::new(SessionStore::new(Arc::clone(&storage)));
    store.initialize();
    let client = ApiClient::new(&config, storage)?;
    tracing::debug!(base_url = client.base_url(), state_dir = %state_dir.display(), "client ready");
    let mut expired = client.subscribe_expired();

    let result = SessionStore::scope(Arc::clone(&store), run(&client, cli.command)).await;

    while let Ok(event) = expired.try_recv() {
        store.expire();
        eprintln!("session expired ({}); redirecting to {}", event.path, event.redirect_to);
    }
    result
}

async fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => run_login(&username, &password),
        Command::Logout => {
            session::current().logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => print_json(&session::current().snapshot()),
        Command::Auth(auth) => run_auth(client, auth).await,
        Command::Invoices(invoices) => run_invoices(client, invoices).await,
        Command::Suppliers(suppliers) => run_suppliers(client, suppliers).await,
        Command::Dashboard => {
            // A failed fetch renders zeroed cards, as the screen does.
            let metrics = match client.invoices().dashboard_metrics().await {
                Ok(metrics) => Some(metrics),
                Err(error) => {
                    tracing::warn!(%error, "dashboard metrics unavailable");
                    None
                }
            };
            print!("{}", DashboardView::new(metrics.as_ref()));
            Ok(())
        }
        Command::Documents { search, status } => {
            let invoices = client.invoices().list(&InvoiceQuery::default()).await?;
            let filter = DocumentFilter { search, status };
            print!("{}", DocumentsView::build(&invoices, &filter));
            Ok(())
        }
        Command::Inbox { id: Some(id) } => {
            let invoice = client.invoices().get(id).await?;
            print!("{}", InvoiceDetail::from_invoice(&invoice));
            Ok(())
        }
        Command::Inbox { id: None } => {
            let invoices = client.invoices().list(&InvoiceQuery::default()).await?;
            print!("{}", InboxView::from_invoices(&invoices));
            Ok(())
        }
    }
}

fn run_login(username: &str, password: &str) -> Result<(), CliError> {
    let outcome = session::current().login(username, password);
    print_json(&outcome)?;
    match outcome {
        LoginOutcome::Success(_) => Ok(()),
        LoginOutcome::Failure(failure) => {
            if failure == LoginFailure::InvalidUsername {
                eprintln!("known users: {}", directory::usernames().join(", "));
            }
            Err(CliError::Login(failure))
        }
    }
}

async fn run_auth(client: &ApiClient, auth: AuthCommand) -> Result<(), CliError> {
    match auth.command {
        AuthSubcommand::Login { username, password } => {
            print_json(&client.auth().login(&username, &password).await?)
        }
        AuthSubcommand::Register { data } => {
            let request = serde_json::from_str::<RegisterRequest>(&data)?;
            print_json(&client.auth().register(&request).await?)
        }
        AuthSubcommand::Me => print_json(&client.auth().current_user().await?),
    }
}

async fn run_invoices(client: &ApiClient, invoices: InvoicesCommand) -> Result<(), CliError> {
    let api = client.invoices();
    match invoices.command {
        InvoicesSubcommand::List { skip, limit, status } => {
            print_json(&api.list(&InvoiceQuery { skip, limit, status }).await?)
        }
        InvoicesSubcommand::Get { id } => print_json(&api.get(id).await?),
        InvoicesSubcommand::Upload { path } => print_json(&api.upload(&path).await?),
        InvoicesSubcommand::Update { id, data } => {
            let update = serde_json::from_str::<InvoiceUpdate>(&data)?;
            print_json(&api.update(id, &update).await?)
        }
        InvoicesSubcommand::Approve { id } => print_json(&api.approve(id).await?),
        InvoicesSubcommand::Reject { id, reason } => print_json(&api.reject(id, &reason).await?),
        InvoicesSubcommand::Stats => print_json(&api.stats().await?),
        InvoicesSubcommand::Metrics => print_json(&api.dashboard_metrics().await?),
    }
}

async fn run_suppliers(client: &ApiClient, suppliers: SuppliersCommand) -> Result<(), CliError> {
    let api = client.suppliers();
    match suppliers.command {
        SuppliersSubcommand::List { skip, limit } => print_json(&api.list(&SupplierQuery { skip, limit }).await?),
        SuppliersSubcommand::Get { id } => print_json(&api.get(id).await?),
        SuppliersSubcommand::Create { data } => {
            let supplier = serde_json::from_str::<SupplierCreate>(&data)?;
            print_json(&api.create(&supplier).await?)
        }
        SuppliersSubcommand::Update { id, data } => {
            let update = serde_json::from_str::<SupplierUpdate>(&data)?;
            print_json(&api.update(id, &update).await?)
        }
        SuppliersSubcommand::Delete { id } => {
            api.delete(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
