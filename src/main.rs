use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use client_registry::error::ServiceError;
use client_registry::models::{ClientFields, ClientId};
use client_registry::service::ClientService;
use client_registry::{config, db, http, logging};

#[derive(Parser)]
#[command(name = "client-registry", version, about = "Manage client records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API
    Serve {
        /// Listen address, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print every client as JSON
    List,
    /// Register a new client
    Add(ClientArgs),
    /// Replace the fields of an existing client
    Update {
        id: ClientId,
        #[command(flatten)]
        fields: ClientArgs,
    },
    /// Remove a client
    Remove { id: ClientId },
}

#[derive(Args)]
struct ClientArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    plan: Option<String>,
    #[arg(long)]
    goal: Option<String>,
}

impl ClientArgs {
    fn into_fields(self) -> ClientFields {
        [self.name, self.email, self.phone, self.address, self.plan, self.goal]
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?;
    logging::init(config.log_json);

    // Initialize database connection
    let db = db::init(&config).await?;
    info!("database connection established");

    let service = ClientService::new(db);

    match cli.command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let listener = TcpListener::bind(addr.as_str()).await?;
            http::serve(listener, http::router(Arc::new(service))).await?;
        }
        Command::List => {
            let clients = service.list().await?;
            println!("{}", serde_json::to_string_pretty(&clients)?);
        }
        Command::Add(fields) => {
            report(service.create(fields.into_fields()).await)?;
            println!("{}", http::CREATED);
        }
        Command::Update { id, fields } => {
            let affected = report(service.update(fields.into_fields(), id).await)?;
            if affected == 0 {
                info!(id, "no client with this id");
            }
            println!("{}", http::UPDATED);
        }
        Command::Remove { id } => {
            let affected = report(service.delete(id).await)?;
            if affected == 0 {
                info!(id, "no client with this id");
            }
            println!("{}", http::REMOVED);
        }
    }

    Ok(())
}

/// Print each validation violation before failing
fn report<T>(result: Result<T, ServiceError>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ServiceError::Validation(e)) => {
            for error in &e.errors {
                eprintln!("  - {error}");
            }
            bail!(e)
        }
        Err(e) => Err(e.into()),
    }
}
