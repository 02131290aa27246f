mod catalog;
mod config;
mod controls;
mod pipeline;
mod render;
mod routes;
mod services;
mod state;

use std::io::Write;

use clap::{Args, Parser, Subcommand};

use crate::catalog::LoadError;
use crate::catalog::loader::CatalogLoader;
use crate::config::{
    ConfigError, ENV_CONNECT_TIMEOUT, ENV_DATA_SOURCE_LINK, ENV_FETCH_TIMEOUT, ENV_PORT, ENV_SOURCE, ENV_TITLE,
    ServerConfig,
};
use crate::controls::Controls;
use crate::state::{LoadedCatalog, SiteSettings};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog loader setup failed: {0}")]
    Load(#[from] LoadError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "toolshelf", about = "Filterable catalog of AI tools")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

/// Flags that override the matching environment variables.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// File path or http(s) URL of the catalog document.
    #[arg(long, global = true, env = "TOOLSHELF_SOURCE")]
    source: Option<String>,

    #[arg(long, global = true, env = "PORT")]
    port: Option<String>,

    #[arg(long, global = true, env = "TOOLSHELF_FETCH_TIMEOUT_SECS")]
    fetch_timeout_secs: Option<String>,

    #[arg(long, global = true, env = "TOOLSHELF_CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: Option<String>,

    #[arg(long, global = true, env = "DATA_SOURCE_LINK")]
    data_source_link: Option<String>,

    #[arg(long, global = true, env = "TOOLSHELF_TITLE")]
    title: Option<String>,
}

impl Overrides {
    fn lookup(&self, key: &str) -> Option<String> {
        let value = match key {
            ENV_SOURCE => &self.source,
            ENV_PORT => &self.port,
            ENV_FETCH_TIMEOUT => &self.fetch_timeout_secs,
            ENV_CONNECT_TIMEOUT => &self.connect_timeout_secs,
            ENV_DATA_SOURCE_LINK => &self.data_source_link,
            ENV_TITLE => &self.title,
            _ => return None,
        };
        value.clone()
    }

    fn config(&self) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_lookup(|key| self.lookup(key))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Load the catalog once and write a self-contained page to stdout for
    /// static hosting.
    Render(RenderArgs),
}

#[derive(Args, Debug, Default)]
struct RenderArgs {
    /// Search text matched against tool names.
    #[arg(long)]
    q: Option<String>,
    /// Category name or slug.
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    pricing: Option<String>,
    #[arg(long)]
    rating: Option<String>,
    /// `grid` or `list`.
    #[arg(long)]
    view: Option<String>,
    #[arg(long)]
    fragment: Option<String>,
}

impl From<RenderArgs> for Controls {
    fn from(args: RenderArgs) -> Self {
        Self {
            q: args.q,
            category: args.category,
            sort: args.sort,
            pricing: args.pricing,
            rating: args.rating,
            view: args.view,
            fragment: args.fragment,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = cli.overrides.config()?;

    match cli.command {
        Command::Serve => run_serve(config).await,
        Command::Render(args) => run_render(config, args.into()).await,
    }
}

fn site_settings(config: &ServerConfig) -> SiteSettings {
    SiteSettings { title: config.title.clone(), data_source_link: config.data_source_link.clone() }
}

async fn run_serve(config: ServerConfig) -> Result<(), CliError> {
    let loader = CatalogLoader::new(config.source.clone(), config.timeouts)?;
    let state = state::AppState::new(site_settings(&config));

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    // Bind first so the loading page is served while the catalog arrives.
    let _load = services::catalog::spawn_catalog_load(state.clone(), loader);

    tracing::info!(%port, "toolshelf listening");
    axum::serve(listener, routes::app(state)).await.expect("server failed");
    Ok(())
}

async fn run_render(config: ServerConfig, controls: Controls) -> Result<(), CliError> {
    let loader = CatalogLoader::new(config.source.clone(), config.timeouts)?;
    let catalog = loader.load_or_empty().await;
    let site = site_settings(&config);

    let html = if catalog.is_empty() {
        render::render_unavailable_page(site.chrome())
    } else {
        let loaded = LoadedCatalog::new(catalog);
        let view = controls.to_view_state(&loaded.categories);
        render::render_static_page(site.chrome(), &loaded.categories, &view, &loaded.catalog)
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
