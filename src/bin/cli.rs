//! Casino Catalog CLI
//!
//! Local execution entry point. For AWS Lambda, use `catalog-lambda`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use casino_catalog::{
    admin::{AdminSession, CasinoDraft, GameDraft},
    engine::{
        CatalogQuery, ComparisonSelection, CompareField, DepositBucket, GameQuery, GameSortKey,
        GameType, LicenseType, SortKey, WithdrawalBucket,
    },
    error::{AppError, Result},
    models::{CasinoRecord, Config, GameCategory, LocaleConfig, MessageLocale, render},
    records::{CachedStore, FileStore, RecordStore, RestStore, SystemClock},
    services::CatalogService,
    storage::{ClientStorage, LocalStorage},
    utils::query::{decode_catalog_query, decode_selection, encode_catalog_query, encode_selection},
};

/// Casino Catalog - filter, sort and compare online casinos
#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    version,
    about = "Casino catalog: filtering, sorting and comparison"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Read and write a local catalog.json in this directory instead of the remote store
    #[arg(long)]
    offline: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List casinos matching a search and filters
    List {
        /// Full query string, e.g. "payment=OXXO&games=live"; flags below are added to it
        #[arg(long)]
        query: Option<String>,

        #[arg(short, long)]
        search: Option<String>,

        /// Payment method (repeatable)
        #[arg(long)]
        payment: Vec<String>,

        /// Minimum deposit range: 0-100, 100-200, 200-500, 500+
        #[arg(long)]
        deposit: Option<String>,

        /// Game type (repeatable): slots, live, table, sports, poker
        #[arg(long)]
        games: Vec<String>,

        /// Withdrawal speed: instant, 24h, 48h, 72h
        #[arg(long)]
        withdrawal: Option<String>,

        /// Only SEGOB-licensed casinos
        #[arg(long)]
        segob: bool,

        /// Sort key: rating, bonus, newest, games
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show or edit the comparison selection
    Compare {
        /// Toggle these casino ids in the saved selection
        #[arg(long)]
        toggle: Vec<String>,

        /// Remove these casino ids
        #[arg(long)]
        remove: Vec<String>,

        /// Start from an empty selection
        #[arg(long)]
        clear: bool,

        /// Replace the selection with a shared query string, e.g. "casinos=a,b"
        #[arg(long)]
        query: Option<String>,
    },

    /// Show one casino by slug
    Casino { slug: String },

    /// List games
    Games {
        #[arg(short, long)]
        search: Option<String>,

        /// slots, live, table, poker, other
        #[arg(long)]
        category: Option<String>,

        /// rtp, name
        #[arg(long)]
        sort: Option<String>,
    },

    /// Payment methods and the casinos that accept them
    Payments,

    /// Create, update or delete records
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Validate configuration
    Validate,
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    /// Upsert a casino from a JSON draft
    SaveCasino { draft: PathBuf },
    /// Upsert a game from a JSON draft
    SaveGame { draft: PathBuf },
    DeleteCasino { id: String },
    DeleteGame { id: String },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let locale = LocaleConfig::load_or_default(
        config.locale.messages_file.as_deref(),
        config.locale.language,
    );
    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK (store: {})", config.store.base_url);
        return Ok(());
    }

    let ttl = config.cache.ttl()?;
    match &cli.offline {
        Some(dir) => {
            log::info!("Using local catalog in {}", dir.display());
            let store = CachedStore::with_clock(FileStore::new(dir), SystemClock, ttl);
            run(&cli, &config, locale.messages, store).await
        }
        None => {
            config.validate()?;
            let store = CachedStore::with_clock(RestStore::from_config(&config.store)?, SystemClock, ttl);
            run(&cli, &config, locale.messages, store).await
        }
    }
}

async fn run<S: RecordStore>(
    cli: &Cli,
    config: &Config,
    messages: MessageLocale,
    store: S,
) -> Result<()> {
    match &cli.command {
        Command::List {
            query,
            search,
            payment,
            deposit,
            games,
            withdrawal,
            segob,
            sort,
        } => {
            let mut catalog_query = query.as_deref().map(decode_catalog_query).unwrap_or_default();
            if let Some(search) = search {
                catalog_query.search = search.trim().to_string();
            }
            for method in payment {
                catalog_query.criteria.add_payment_method(method.trim());
            }
            if let Some(deposit) = deposit {
                catalog_query.criteria.min_deposit =
                    Some(parse_flag("deposit", deposit, DepositBucket::parse)?);
            }
            for tag in games {
                let game_type = parse_flag("games", tag, GameType::parse)?;
                catalog_query.criteria.add_game_type(game_type);
            }
            if let Some(withdrawal) = withdrawal {
                catalog_query.criteria.withdrawal_time =
                    Some(parse_flag("withdrawal", withdrawal, WithdrawalBucket::parse)?);
            }
            if *segob {
                catalog_query.criteria.license_type = LicenseType::Segob;
            }
            if let Some(sort) = sort {
                catalog_query.sort = SortKey::parse(sort);
            }

            list(cli, &messages, &CatalogService::new(store), &catalog_query).await
        }

        Command::Compare {
            toggle,
            remove,
            clear,
            query,
        } => {
            let storage = LocalStorage::new(&config.storage.dir);
            let mut selection = match query {
                Some(query) => decode_selection(query),
                None => storage.load_selection().await?,
            };
            if *clear {
                selection = selection.clear();
            }
            for id in remove {
                selection = selection.remove(id);
            }
            for id in toggle {
                let next = selection.toggle(id);
                if next == selection && !id.trim().is_empty() && !selection.contains(id.trim()) {
                    println!("{}", messages.comparison_full);
                }
                selection = next;
            }
            storage.save_selection(&selection).await?;

            compare(cli, &messages, &CatalogService::new(store), &selection).await
        }

        Command::Casino { slug } => {
            let service = CatalogService::new(store);
            let casino = service
                .casino_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found(slug.as_str()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&casino)?);
            } else {
                print_casino(&messages, &casino);
            }
            Ok(())
        }

        Command::Games {
            search,
            category,
            sort,
        } => {
            let query = GameQuery {
                search: search.as_deref().unwrap_or_default().trim().to_string(),
                category: category
                    .as_deref()
                    .map(|c| parse_flag("category", c, GameCategory::parse))
                    .transpose()?,
                sort: sort.as_deref().map(GameSortKey::parse).unwrap_or_default(),
            };
            let games = CatalogService::new(store).games(&query).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&games)?);
                return Ok(());
            }
            for game in &games {
                println!(
                    "{:<32} {:<20} {:<8} RTP {:.2}%",
                    game.name, game.provider, game.category, game.rtp
                );
            }
            Ok(())
        }

        Command::Payments => {
            let index = CatalogService::new(store).payment_methods().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&index)?);
                return Ok(());
            }
            for method in &index {
                println!(
                    "{:<24} {:>3}  {} {:.1}",
                    method.name,
                    method.casino_count(),
                    messages.label_rating,
                    method.best_rating
                );
            }
            Ok(())
        }

        Command::Admin { action } => admin(messages, store, action).await,

        // handled before a store is built
        Command::Validate => Ok(()),
    }
}

/// Parse a flag value, rejecting values the query string would silently drop.
fn parse_flag<T>(flag: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    parse(value.trim()).ok_or_else(|| AppError::validation(format!("invalid --{flag} value: {value}")))
}

async fn list<S: RecordStore>(
    cli: &Cli,
    messages: &MessageLocale,
    service: &CatalogService<S>,
    query: &CatalogQuery,
) -> Result<()> {
    let view = service.list(query).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.store_unavailable {
        println!("{}", messages.store_unavailable);
    }
    let count = view.casinos.len().to_string();
    println!("{}", render(&messages.results_found, &[("count", count.as_str())]));
    if view.active_filter_count > 0 {
        let filters = view.active_filter_count.to_string();
        println!("{}", render(&messages.active_filters, &[("count", filters.as_str())]));
        println!("?{}", encode_catalog_query(query));
    }
    if view.casinos.is_empty() {
        println!("{}", messages.no_results);
    }

    for casino in &view.casinos {
        println!(
            "{:<12} {:<28} {:.1}  {:>7.0}  {:>5}",
            casino.id, casino.name, casino.rating, casino.bonus.amount, casino.games.total
        );
    }
    Ok(())
}

async fn compare<S: RecordStore>(
    cli: &Cli,
    messages: &MessageLocale,
    service: &CatalogService<S>,
    selection: &ComparisonSelection,
) -> Result<()> {
    let view = service.comparison(selection).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.table.is_empty() {
        println!("{}", messages.comparison_empty);
        return Ok(());
    }

    println!("{}", messages.comparison_header);
    println!("?{}", encode_selection(selection));
    for id in &view.table.dropped {
        println!("{}", render(&messages.comparison_dropped, &[("id", id.as_str())]));
    }

    for column in &view.table.columns {
        println!("\n{}", column.casino.name);
        for cell in &column.cells {
            let marker = if cell.best {
                format!("  ★ {}", messages.best_value)
            } else {
                String::new()
            };
            println!(
                "  {:<16} {:>10.1}{}",
                field_label(messages, cell.field),
                cell.value,
                marker
            );
        }
    }
    Ok(())
}

fn field_label(messages: &MessageLocale, field: CompareField) -> &str {
    match field {
        CompareField::Rating => &messages.label_rating,
        CompareField::BonusAmount => &messages.label_bonus,
        CompareField::GamesTotal => &messages.label_games,
        CompareField::Wagering => &messages.label_wagering,
    }
}

fn print_casino(messages: &MessageLocale, casino: &CasinoRecord) {
    println!("{} ({})", casino.name, casino.slug);
    println!("  {:<16} {:.1}", messages.label_rating, casino.rating);
    println!(
        "  {:<16} {:.0} ({}%)",
        messages.label_bonus, casino.bonus.amount, casino.bonus.percentage
    );
    println!("  {:<16} {}", messages.label_games, casino.games.total);
    println!(
        "  {:<16} {}x",
        messages.label_wagering, casino.bonus.wagering_requirement
    );
    println!("  {:<16} {}", messages.label_withdrawal, casino.withdrawal_time);
    println!(
        "  {:<16} {}",
        messages.label_payments,
        casino.payment_methods.join(", ")
    );
}

fn read_draft<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn admin<S: RecordStore>(messages: MessageLocale, store: S, action: &AdminAction) -> Result<()> {
    let mut session = AdminSession::new(store, messages);

    let outcome = match action {
        AdminAction::SaveCasino { draft } => {
            session.casino = read_draft::<CasinoDraft>(draft)?;
            session
                .submit_casino()
                .await
                .map(|saved| render(&session.messages().record_saved, &[("name", saved.name.as_str())]))
        }
        AdminAction::SaveGame { draft } => {
            session.game = read_draft::<GameDraft>(draft)?;
            session
                .submit_game()
                .await
                .map(|saved| render(&session.messages().record_saved, &[("name", saved.name.as_str())]))
        }
        AdminAction::DeleteCasino { id } => session
            .delete_casino(id)
            .await
            .map(|()| render(&session.messages().record_deleted, &[("id", id.as_str())])),
        AdminAction::DeleteGame { id } => session
            .delete_game(id)
            .await
            .map(|()| render(&session.messages().record_deleted, &[("id", id.as_str())])),
    };

    match outcome {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(alert) => {
            eprintln!("{alert}");
            Err(AppError::validation(alert.message))
        }
    }
}
