//! PawMatch CLI
//!
//! Terminal front end for the dog adoption flow. Each command logs in,
//! drives the catalog from `pawmatch_core`, renders the result and logs out.

mod render;

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use pawmatch_core::catalog::CatalogView;
use pawmatch_core::{App, Catalog, HttpDogService, LoginForm, SearchQuery, ServiceConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(author, version, about = "PawMatch - find a shelter dog to adopt")]
struct Args {
    /// Adoption service base URL (overrides PAWMATCH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Number of dog ids to search for (overrides PAWMATCH_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Args, Clone)]
struct LoginArgs {
    /// Your name
    #[arg(long, env = "PAWMATCH_NAME")]
    name: String,
    /// Your email address
    #[arg(long, env = "PAWMATCH_EMAIL")]
    email: String,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Log in and list available dogs
    Browse {
        #[command(flatten)]
        login: LoginArgs,
        /// Only show these breeds (repeatable)
        #[arg(long)]
        breed: Vec<String>,
        /// Also print the request timeline
        #[arg(long)]
        timeline: bool,
    },
    /// Favorite some dogs and ask for a match among them
    Match {
        #[command(flatten)]
        login: LoginArgs,
        /// Dog id to favorite (repeatable, order is kept)
        #[arg(long = "favorite", required = true)]
        favorites: Vec<String>,
        /// Only search these breeds (repeatable)
        #[arg(long)]
        breed: Vec<String>,
    },
    /// List every breed the service knows
    Breeds {
        #[command(flatten)]
        login: LoginArgs,
    },
}

/// JSON output for the `match` command
#[derive(Serialize)]
struct MatchReport<'a> {
    #[serde(flatten)]
    view: CatalogView<'a>,
    match_id: Option<&'a str>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then `.env` / environment, then command line flags
fn load_config(args: &Args) -> anyhow::Result<ServiceConfig> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let config = ServiceConfig::from_env().context("Failed to read PawMatch environment")?;
    Ok(apply_flags(config, args))
}

/// Layer command line flags over an already loaded config
fn apply_flags(mut config: ServiceConfig, args: &Args) -> ServiceConfig {
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(size) = args.page_size {
        config = config.with_page_size(size);
    }
    config
}

fn build_app(config: ServiceConfig, breeds: &[String]) -> anyhow::Result<App> {
    let mut query = SearchQuery::from(&config);
    query.breeds = breeds.to_vec();
    let service = HttpDogService::new(config).context("Failed to build HTTP client")?;
    Ok(App::new(Arc::new(service), query))
}

async fn login(app: &mut App, args: &LoginArgs) -> anyhow::Result<()> {
    *app.login_form_mut() = LoginForm::with_input(&args.name, &args.email);
    if !app.submit_login().await {
        let message = app.login_form().error().unwrap_or("Login failed");
        bail!("{}", message);
    }
    println!("✅ Login successful! Welcome, {}.", args.name);
    Ok(())
}

fn catalog(app: &mut App) -> anyhow::Result<&mut Catalog> {
    app.catalog_mut()
        .ok_or_else(|| anyhow!("No catalog available without a session"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn browse(app: &mut App, json: bool, timeline: bool) -> anyhow::Result<()> {
    let catalog = catalog(app)?;
    let loaded = catalog.load().await;

    let view = catalog.view();
    if json {
        print_json(&view)?;
    } else {
        render::print_catalog(&view);
        if timeline {
            render::print_timeline(catalog.events());
        }
    }

    loaded.map(|_| ()).map_err(Into::into)
}

async fn find_match(app: &mut App, favorites: &[String], json: bool) -> anyhow::Result<()> {
    let catalog = catalog(app)?;
    catalog.load().await?;

    for id in favorites {
        match catalog.favorite(id) {
            Ok(true) => tracing::debug!(id = %id, "Added favorite"),
            Ok(false) => tracing::info!(id = %id, "Already a favorite"),
            Err(e) => tracing::warn!("Skipping favorite: {}", e),
        }
    }

    let outcome = catalog.generate_match().await.map(|_| ());

    let view = catalog.view();
    if json {
        print_json(&MatchReport {
            view,
            match_id: catalog.match_id(),
        })?;
    } else {
        render::print_favorites(&view);
        render::print_match(&view);
    }

    outcome.map_err(Into::into)
}

async fn list_breeds(app: &App, json: bool) -> anyhow::Result<()> {
    let breeds = app
        .service()
        .breeds()
        .await
        .context("Failed to fetch dog breeds")?;

    if json {
        print_json(&breeds)?;
    } else {
        println!("🐶 Available Dog Breeds ({})", breeds.len());
        for breed in &breeds {
            println!("   {}", breed);
        }
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "Configuration loaded");

    let (login_args, breeds) = match &args.command {
        CliCommand::Browse { login, breed, .. } | CliCommand::Match { login, breed, .. } => {
            (login, breed.as_slice())
        }
        CliCommand::Breeds { login } => (login, &[][..]),
    };

    let mut app = build_app(config, breeds)?;
    login(&mut app, login_args).await?;

    let result = match &args.command {
        CliCommand::Browse { timeline, .. } => browse(&mut app, args.json, *timeline).await,
        CliCommand::Match { favorites, .. } => find_match(&mut app, favorites, args.json).await,
        CliCommand::Breeds { .. } => list_breeds(&app, args.json).await,
    };

    app.logout().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    run(Args::parse()).await
}
