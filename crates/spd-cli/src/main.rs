//! spd entry point.
//!
//! Every command is a one-shot operation against the sheet store or the
//! local session file. Environment carries the wiring: the sheet endpoint
//! URL (which embeds the API identity and is therefore never printed or
//! logged), the session file path, and the credentials file consulted by
//! `spd login`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};

use spd_auth::{Authenticator, Credentials, SessionStore, StaticCredentialTable};
use spd_money::{format_inr, format_inr_lossy};
use spd_order::{customers_starting_with, OrderSession};
use spd_sheets::{SheetDbClient, SheetStore};

/// Env var naming the SheetDB endpoint URL.
const ENV_SHEET_URL: &str = "SALESPAD_SHEETDB_URL";
/// Env var overriding where the login session flags are stored.
const ENV_SESSION_FILE: &str = "SALESPAD_SESSION_FILE";
/// Env var naming the credentials JSON consulted by `spd login`.
const ENV_CREDENTIALS_FILE: &str = "SALESPAD_CREDENTIALS_FILE";

const DEFAULT_SESSION_FILE: &str = ".spd-session.json";

#[derive(Parser)]
#[command(name = "spd")]
#[command(about = "SalesPad order desk CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate against the credentials file and persist the session
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the persisted session, if any
    Whoami,

    /// List the product catalog with display-formatted rates
    Catalog,

    /// List customers whose name starts with a letter
    Customers {
        /// First letter of the customer name
        #[arg(long)]
        letter: String,
    },

    /// Order entry commands
    Order {
        #[command(subcommand)]
        cmd: OrderCmd,
    },
}

#[derive(Subcommand)]
enum OrderCmd {
    /// Record a new order: allocate an id, validate the lines, append once
    New {
        /// Customer display name, exactly as it should appear on the rows
        #[arg(long)]
        customer: String,

        /// Line item as CODE=QTY; repeat for multiple lines
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Order timestamp as `YYYY-MM-DD HH:MM` (defaults to now)
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist; production shells export the vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Login { username, password } => {
            let table = credential_table_from_env()?;
            let role = table.authenticate(&Credentials { username, password })?;

            let sessions = session_store_from_env();
            let record = sessions.login(role, Utc::now())?;
            println!("login_ok=true role={}", record.role);
        }

        Commands::Logout => {
            let sessions = session_store_from_env();
            println!("logged_out={}", sessions.logout()?);
        }

        Commands::Whoami => {
            let sessions = session_store_from_env();
            match sessions.current()? {
                Some(record) => {
                    println!("logged_in=true");
                    println!("role={}", record.role);
                    println!("last_login={}", record.last_login.to_rfc3339());
                }
                None => println!("logged_in=false"),
            }
        }

        Commands::Catalog => {
            let store = sheet_store_from_env()?;
            let products = store.read_products().await?;
            for p in &products {
                println!(
                    "code={} rate={} name={}",
                    p.product_code,
                    format_inr_lossy(&p.rate),
                    p.product_name
                );
            }
            println!("products={}", products.len());
        }

        Commands::Customers { letter } => {
            let letter = first_letter(&letter)?;
            let store = sheet_store_from_env()?;
            let hits = customers_starting_with(store.as_ref(), letter).await;
            for c in &hits {
                println!("code={} name={}", c.code, c.name);
            }
            println!("customers={}", hits.len());
        }

        Commands::Order { cmd } => match cmd {
            OrderCmd::New {
                customer,
                items,
                date,
            } => {
                let sessions = session_store_from_env();
                let record = sessions
                    .current()?
                    .ok_or_else(|| anyhow::anyhow!("not logged in. run `spd login` first"))?;

                let placed_at = match date {
                    Some(raw) => parse_placed_at(&raw)?,
                    None => Local::now().naive_local(),
                };

                let store = sheet_store_from_env()?;
                let mut session = OrderSession::open(store, placed_at.date()).await;

                println!("order_id={}", session.order_id().id);
                if session.order_id().is_advisory() {
                    tracing::warn!(
                        "order scan was unavailable; the id above is advisory and may collide"
                    );
                    println!("advisory=true");
                }

                for raw in &items {
                    let (code, qty) = parse_item(raw)?;
                    if session.select_product(code).is_none() {
                        anyhow::bail!("unknown product code '{}'", code);
                    }
                    session.set_quantity(qty);
                    let line = session.add_line_item()?;
                    println!(
                        "product={} quantity={} rate={} amount={}",
                        line.product_name, line.quantity, line.rate, line.amount
                    );
                }
                println!("total={}", format_inr(session.compute_total()));

                let report = session
                    .submit(&customer, record.role.as_str(), placed_at)
                    .await?;
                println!("submitted=true rows_created={}", report.rows_created);
            }
        },
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the sheet store from the endpoint URL in the environment.
///
/// The URL is handed straight to the client; nothing here echoes it back.
fn sheet_store_from_env() -> Result<Arc<dyn SheetStore>> {
    let base_url = std::env::var(ENV_SHEET_URL)
        .with_context(|| format!("{ENV_SHEET_URL} is not set; export the sheet endpoint URL"))?;
    let client = SheetDbClient::new(base_url)?;
    Ok(Arc::new(client))
}

fn session_store_from_env() -> SessionStore {
    let path = std::env::var(ENV_SESSION_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));
    SessionStore::new(path)
}

fn credential_table_from_env() -> Result<StaticCredentialTable> {
    let path = std::env::var(ENV_CREDENTIALS_FILE).with_context(|| {
        format!("{ENV_CREDENTIALS_FILE} is not set; point it at the credentials JSON")
    })?;
    Ok(StaticCredentialTable::load(Path::new(&path))?)
}

/// Split a `CODE=QTY` item argument.
fn parse_item(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(code, qty)| (code.trim(), qty.trim()))
        .filter(|(code, _)| !code.is_empty())
        .ok_or_else(|| anyhow::anyhow!("invalid --item '{}', expected CODE=QTY", raw))
}

fn parse_placed_at(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M")
        .with_context(|| format!("invalid --date '{}', expected YYYY-MM-DD HH:MM", raw))
}

fn first_letter(raw: &str) -> Result<char> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("--letter expects exactly one character, got '{}'", raw),
    }
}
