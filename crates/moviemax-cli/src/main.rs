//! moviemax - movie catalog browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use moviemax_api::browse::CatalogBrowser;
use moviemax_api::catalog::{CatalogClient, CatalogEntry, LocalCatalogApi};
use moviemax_api::manager::{DetailManager, ListManager};

/// Placeholder for an entry without a parseable release year.
const UNKNOWN_YEAR: &str = "Unknown Year";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List catalog entries page by page.
    Discover(DiscoverArgs),
    /// Show one movie's details.
    Details(DetailsArgs),
    /// Download an image by path.
    Image(ImageArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
    /// Case-insensitive title filter (e.g. "alpha").
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// Movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `image` subcommand.
#[derive(clap::Args)]
struct ImageArgs {
    /// Image path as returned by the catalog (e.g. "/abc.jpg").
    #[arg(long, required = true)]
    path: String,
    /// File to write the image bytes to.
    #[arg(long, required = true)]
    output: PathBuf,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the current settings.
    Show,
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// API key to store.
    key: String,
}

/// Builds a `CatalogClient` from the config file and environment.
///
/// `MOVIEMAX_API_KEY` takes precedence over `api.api_key`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, no API key is available,
/// a configured URL is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(dir: Option<&PathBuf>) -> Result<CatalogClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let api_key = config
        .api
        .resolve_api_key(std::env::var(API_KEY_ENV).ok())
        .with_context(|| {
            format!("{API_KEY_ENV} environment variable or api.api_key in config is required")
        })?;

    let mut builder = CatalogClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref base_url) = config.api.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid api.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref image_base_url) = config.api.image_base_url {
        let url = Url::parse(image_base_url)
            .with_context(|| format!("invalid api.image_base_url: {image_base_url}"))?;
        builder = builder.image_base_url(url);
    }
    if let Some(ref language) = config.api.language {
        builder = builder.language(language);
    }

    builder.build().context("failed to build catalog client")
}

/// Formats one list row: id, title, year, poster URL.
///
/// The poster URL points at the client's image host, the same one `image`
/// downloads from.
fn format_entry_row(client: &CatalogClient, entry: &CatalogEntry) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        entry.id,
        entry.title,
        entry
            .year()
            .map_or_else(|| String::from(UNKNOWN_YEAR), |y| y.to_string()),
        entry
            .poster_path
            .as_deref()
            .and_then(|path| client.artwork_url(path))
            .map_or_else(|| String::from("-"), |u| u.to_string()),
    )
}

/// Runs the `discover` subcommand.
///
/// Stops at the first failed page and shows what was already loaded.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let mut session = ListManager::new(&client);
    let mut browser = CatalogBrowser::new();

    for _ in 0..args.pages {
        match session.fetch_next_page().await {
            Ok(entries) => {
                let added = browser.append_page(entries);
                tracing::debug!(added, total = browser.entries().len(), "page appended");
            }
            Err(err) => {
                tracing::error!(
                    page = session.cursor().current(),
                    "Failed to load page: {err:#}"
                );
                break;
            }
        }
    }

    if let Some(ref query) = args.query {
        browser.set_query(query.clone());
    }

    let visible = browser.visible();
    tracing::info!("ID\tTitle\t\t\tYear\tPoster");
    for entry in &visible {
        tracing::info!("{}", format_entry_row(&client, entry));
    }
    if browser.is_searching() {
        tracing::info!(
            "Matched: {} of {} entries",
            visible.len(),
            browser.entries().len()
        );
    } else {
        tracing::info!("Total: {} entries", visible.len());
    }

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let manager = DetailManager::new(&client);

    let detail = manager
        .fetch_details(args.id)
        .await
        .with_context(|| format!("failed to fetch details for movie {}", args.id))?;

    tracing::info!("Title: {}", detail.title);
    tracing::info!("Rating: {:.1}", detail.vote_average);
    tracing::info!("Votes: {}", detail.vote_count);
    tracing::info!("Revenue: {}", detail.formatted_revenue());
    tracing::info!("Runtime: {}", detail.formatted_duration());
    tracing::info!("Overview: {}", detail.overview);
    tracing::info!(
        "Backdrop: {}",
        detail
            .backdrop_path
            .as_deref()
            .and_then(|path| client.artwork_url(path))
            .map_or_else(|| String::from("-"), |u| u.to_string())
    );

    Ok(())
}

/// Runs the `image` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build, the download fails, or the
/// output file cannot be written.
#[instrument(skip_all)]
async fn run_image(args: &ImageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let bytes = client
        .image(&args.path)
        .await
        .inspect_err(|err| tracing::warn!(path = %args.path, "image download failed: {err}"))
        .with_context(|| format!("failed to download image {}", args.path))?;

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!("Wrote {} bytes to {}", bytes.len(), args.output.display());

    Ok(())
}

/// Runs the `config show` subcommand. The API key itself is never printed.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let key_source = if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        API_KEY_ENV
    } else if config.api.api_key.is_some() {
        "config"
    } else {
        "not set"
    };

    tracing::info!("Config: {}", config_path.display());
    tracing::info!("API key: {key_source}");
    tracing::info!(
        "Base URL: {}",
        config.api.base_url.as_deref().unwrap_or("(default)")
    );
    tracing::info!(
        "Image base URL: {}",
        config.api.image_base_url.as_deref().unwrap_or("(default)")
    );
    tracing::info!(
        "Language: {}",
        config.api.language.as_deref().unwrap_or("(default)")
    );

    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the key is blank or the config cannot be saved.
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let key = args.key.trim();
    anyhow::ensure!(!key.is_empty(), "API key must not be empty");

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.api.api_key = Some(String::from(key));
    config.save(&config_path).context("failed to save config")?;

    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Discover(args) => run_discover(&args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Image(args) => run_image(&args, dir).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::SetKey(args) => run_config_set_key(&args, dir),
        },
    }
}
