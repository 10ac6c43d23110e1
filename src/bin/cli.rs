//! cinegrid CLI
//!
//! Terminal front end: loads the start catalog or a search, applies
//! filters and prints the grid, the filter lists or a detail view.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use cinegrid::{
    BrowserState, MovieLoader,
    error::{AppError, Result},
    models::{Config, FilterSelection, FilterVocabulary, LoadOrigin, Movie},
    render::{self, RenderContext},
};

/// cinegrid - OMDb Movie Browser
#[derive(Parser, Debug)]
#[command(name = "cinegrid", version, about = "Browse, search and filter OMDb movies")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cinegrid.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the popular movies catalog
    Top {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Search movies by title
    Search {
        /// Title query
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the detail view of one movie
    Show {
        /// IMDb id, e.g. tt0111161
        id: String,
    },

    /// List the filter values of the catalog or of a search
    Filters {
        /// Derive filters from this search instead of the catalog
        #[arg(long)]
        query: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Only movies with this genre
    #[arg(long)]
    genre: Option<String>,

    /// Only movies by this director
    #[arg(long)]
    director: Option<String>,

    /// Only movies from this year
    #[arg(long)]
    year: Option<String>,
}

impl FilterArgs {
    fn selection(self) -> FilterSelection {
        FilterSelection::from_parts(self.genre, self.director, self.year)
    }
}

#[derive(Serialize)]
struct GridOutput<'a> {
    status: String,
    movies: Vec<&'a Movie>,
    vocabulary: &'a FilterVocabulary,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Run one load into `state`; the error is returned after being recorded.
async fn load(
    loader: &MovieLoader,
    config: &Config,
    state: &mut BrowserState,
    origin: LoadOrigin,
) -> Result<()> {
    state.begin_load(origin.clone());
    log::info!("{}", state.status_line(&config.messages));

    let result = match &origin {
        LoadOrigin::Catalog => loader.load_catalog(&config.catalog.ids).await,
        LoadOrigin::Search { query } => loader.search(query).await,
    };

    match result {
        Ok(loaded) => {
            state.publish(origin, loaded);
            Ok(())
        }
        Err(e) => {
            state.fail(origin, &e);
            Err(e)
        }
    }
}

fn origin_for(query: Option<String>) -> LoadOrigin {
    match query {
        Some(query) => LoadOrigin::Search { query },
        None => LoadOrigin::Catalog,
    }
}

fn print_grid(state: &BrowserState, config: &Config, json: bool) -> Result<()> {
    let visible = state.visible();
    let status = state.status_line(&config.messages);

    if json {
        let output = GridOutput {
            status,
            movies: visible,
            vocabulary: state.vocabulary(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let ctx = RenderContext::new(&config.messages, &config.catalog);
        println!("{status}");
        println!();
        println!("{}", render::render_grid(&visible, &ctx));
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config).with_env_overrides();
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loaded configuration from {}", cli.config.display());

    let mut state = BrowserState::new();

    match cli.command {
        Command::Top { filters } => {
            let loader = MovieLoader::omdb(&config.omdb)?;
            let loaded = load(&loader, &config, &mut state, LoadOrigin::Catalog).await;
            if let Err(e) = loaded {
                eprintln!("{}", state.status_line(&config.messages));
                return Err(e);
            }
            state.set_selection(filters.selection());
            print_grid(&state, &config, cli.json)?;
        }

        Command::Search { query, filters } => {
            let loader = MovieLoader::omdb(&config.omdb)?;
            let loaded = load(&loader, &config, &mut state, origin_for(Some(query))).await;
            if let Err(e) = loaded {
                eprintln!("{}", state.status_line(&config.messages));
                return Err(e);
            }
            state.set_selection(filters.selection());
            print_grid(&state, &config, cli.json)?;
        }

        Command::Show { id } => {
            let loader = MovieLoader::omdb(&config.omdb)?;
            let loaded = loader.load_catalog(std::slice::from_ref(&id)).await;
            let loaded = match loaded {
                Ok(loaded) => loaded,
                Err(e) => {
                    state.fail(LoadOrigin::Catalog, &e);
                    eprintln!("{}", state.status_line(&config.messages));
                    return Err(e);
                }
            };
            state.publish(LoadOrigin::Catalog, loaded);

            let Some(movie) = state.find(id.trim()) else {
                eprintln!("{}", config.messages.no_results);
                return Err(AppError::validation(format!("No movie found for id {id}")));
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(movie)?);
            } else {
                let ctx = RenderContext::new(&config.messages, &config.catalog);
                println!("{}", render::render_detail(movie, &ctx));
            }
        }

        Command::Filters { query } => {
            let loader = MovieLoader::omdb(&config.omdb)?;
            let loaded = load(&loader, &config, &mut state, origin_for(query)).await;
            if let Err(e) = loaded {
                eprintln!("{}", state.status_line(&config.messages));
                return Err(e);
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(state.vocabulary())?);
            } else {
                println!("{}", state.status_line(&config.messages));
                println!();
                print!("{}", render::render_vocabulary(state.vocabulary()));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} catalog ids)", config.catalog.ids.len());
            log::info!(
                "API key: {}",
                if config.omdb.api_key().is_some() {
                    "configured"
                } else {
                    "missing"
                }
            );
        }
    }

    Ok(())
}
