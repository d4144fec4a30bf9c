//! História CLI: what happened on any day of the year

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, warn};

use historia::app::{AppController, DetailView, LookupState, Notice, Notifier};
use historia::config::lookup::EXAMPLE_DATES;
use historia::config::network::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use historia::data::{
    Category, FavoriteRecord, FavoritesStore, FileStore, KeyValueStore, MemoryStore, Settings,
};
use historia::error::Result as HistoriaResult;
use historia::providers::{HistoryLookupClient, MuffinLabsClient};
use historia::share::{years_since, ShareTarget};

#[derive(Parser)]
#[command(
    name = "historia",
    about = "Look up what happened on any day of the year",
    version
)]
struct Cli {
    /// Directory holding the favorites file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL of the history service
    #[arg(long, global = true)]
    server: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep favorites in memory for this run only
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the events, deaths and births of a day
    Search {
        /// Day and month, e.g. 25/12
        date: String,

        /// Only show one tab (events, deaths, births)
        #[arg(long, value_parser = parse_tab)]
        tab: Option<Category>,
    },
    /// Show one item of a day in detail
    Show {
        /// Day and month, e.g. 25/12
        date: String,

        /// events, deaths or births
        #[arg(value_parser = parse_tab)]
        tab: Category,

        /// Position in the tab, starting at 1
        index: usize,

        /// Add the item to favorites, or remove it if already saved
        #[arg(long)]
        favorite: bool,

        /// Print the share text
        #[arg(long)]
        share: bool,
    },
    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, newest first
    List,
    /// Remove the favorite at a list position
    Remove { index: usize },
    /// Remove every favorite
    Clear,
    /// Show the favorite at a list position in detail
    Show { index: usize },
}

fn parse_tab(value: &str) -> Result<Category, String> {
    let category = Category::from_key(&value.to_lowercase());
    if category.is_known() {
        Ok(category)
    } else {
        Err(format!("unknown tab '{value}' (expected events, deaths or births)"))
    }
}

/// Prints notices on stderr
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice_text(notice));
    }
}

/// Notice as printed: a status marker, the title, then the description
fn notice_text(notice: Notice) -> String {
    let marker = if notice.is_error() { "✗" } else { "✓" };
    let mut text = format!("{marker} {}\n  {}", notice.title(), notice.description());
    if matches!(notice, Notice::InvalidDate | Notice::EmptyDate) {
        text.push_str(&format!("\n  Exemplos: {}", EXAMPLE_DATES.join(", ")));
    }
    text
}

/// Share "sheet" of a terminal: the text goes to stdout
struct StdoutShare;

impl ShareTarget for StdoutShare {
    fn share(&self, title: &str, text: &str) -> HistoriaResult<()> {
        println!("--- {title} ---\n{text}");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load().unwrap_or_else(|e| {
        warn!("using default settings: {e}");
        Settings::default()
    });
    if let Some(server) = cli.server {
        settings.lookup_server = server;
    }
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }

    let lookup: Arc<dyn HistoryLookupClient> =
        Arc::new(MuffinLabsClient::with_base_url(&settings.lookup_server)?);
    debug!("lookup via {} at {}", lookup.name(), settings.lookup_server);

    let ok = if cli.in_memory {
        let favorites = FavoritesStore::new(MemoryStore::new());
        run(
            AppController::new(lookup, favorites, Box::new(StderrNotifier)),
            cli.command,
        )?
    } else {
        let dir = settings.resolved_data_dir()?;
        debug!("favorites in {}", dir.display());
        let favorites = FavoritesStore::new(FileStore::new(dir));
        run(
            AppController::new(lookup, favorites, Box::new(StderrNotifier)),
            cli.command,
        )?
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Level from `-v` count unless `RUST_LOG` is set
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Run one command; `Ok(false)` means a notice already explained the failure
fn run<S: KeyValueStore>(
    mut app: AppController<S>,
    command: Command,
) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Search { date, tab } => {
            if !load_day(&mut app, &date) {
                return Ok(false);
            }
            print_results(&app, tab.as_ref());
            Ok(true)
        }
        Command::Show {
            date,
            tab,
            index,
            favorite,
            share,
        } => {
            if !load_day(&mut app, &date) {
                return Ok(false);
            }
            let picked = index
                .checked_sub(1)
                .and_then(|i| app.select_event(&tab, i));
            if picked.is_none() {
                return Err(format!("no item {index} under {}", tab.tab_label()).into());
            }

            if favorite {
                app.toggle_favorite();
            }
            if let Some(detail) = app.detail() {
                print_detail(detail);
            }
            if share {
                app.share(Some(&StdoutShare as &dyn ShareTarget), &StdoutShare);
            }
            Ok(true)
        }
        Command::Favorites { action } => run_favorites(app, action.unwrap_or(FavoritesAction::List)),
    }
}

fn run_favorites<S: KeyValueStore>(
    mut app: AppController<S>,
    action: FavoritesAction,
) -> Result<bool, Box<dyn Error>> {
    match action {
        FavoritesAction::List => {
            print_favorites(&app.open_favorites());
            Ok(true)
        }
        FavoritesAction::Remove { index } => {
            let record = favorite_at(&mut app, index)?;
            // A failed write has already been reported as a notice
            Ok(app.remove_favorite(&record.event).is_ok())
        }
        FavoritesAction::Clear => {
            app.favorites_store().clear()?;
            println!("Todos os favoritos foram removidos");
            Ok(true)
        }
        FavoritesAction::Show { index } => {
            let record = favorite_at(&mut app, index)?;
            app.open_favorite(&record);
            if let Some(detail) = app.detail() {
                print_detail(detail);
            }
            Ok(true)
        }
    }
}

/// Favorite at a 1-based position of the newest-first list
fn favorite_at<S: KeyValueStore>(
    app: &mut AppController<S>,
    index: usize,
) -> Result<FavoriteRecord, Box<dyn Error>> {
    let favorites = app.open_favorites();
    index
        .checked_sub(1)
        .and_then(|i| favorites.into_iter().nth(i))
        .ok_or_else(|| format!("no favorite at position {index}").into())
}

/// Search a day and block until its results settle
fn load_day<S: KeyValueStore>(app: &mut AppController<S>, date: &str) -> bool {
    if !app.search(date) {
        return false;
    }

    let timeout = Duration::from_secs(CONNECT_TIMEOUT_SECS + READ_TIMEOUT_SECS);
    if !app.wait_for_lookup(timeout) {
        eprintln!("{}", Notice::LookupFailed.title());
        return false;
    }

    matches!(
        app.results().map(|view| &view.state),
        Some(LookupState::Loaded(_))
    )
}

fn print_results<S: KeyValueStore>(app: &AppController<S>, only: Option<&Category>) {
    let Some(view) = app.results() else {
        return;
    };

    println!("📅 {}\n", view.date_label);
    for tab in Category::TABS.iter().filter(|tab| only.map_or(true, |o| o == *tab)) {
        let items = view.items(tab);
        println!("{} ({})", tab.tab_label(), items.len());
        if items.is_empty() {
            println!("  {}", tab.empty_message());
        }
        for (i, event) in items.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, event);
        }
        println!();
    }
}

fn print_detail(detail: &DetailView) {
    let payload = &detail.payload;
    let star = if detail.is_favorited { "★" } else { "☆" };

    println!("{} · {} {star}", payload.category.detail_label(), payload.date);
    println!("\n{}\n{}", payload.event.year, payload.event.text);
    if let Some(years) = years_since(&payload.event, i64::from(Local::now().year())) {
        println!("\nEste evento aconteceu há {years} anos");
    }
}

fn print_favorites(favorites: &[FavoriteRecord]) {
    if favorites.is_empty() {
        println!("Nenhum favorito ainda");
        println!("Busque uma data e salve os eventos que mais gostar.");
        return;
    }

    for (i, record) in favorites.iter().enumerate() {
        println!(
            "{:>3}. [{}] {}",
            i + 1,
            record.category.badge_label(),
            record.event
        );
        println!("     {} · Salvo em {}", record.date, record.added_on());
    }

    let count = favorites.len();
    let noun = if count == 1 {
        "evento favorito"
    } else {
        "eventos favoritos"
    };
    println!("\n{count} {noun}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text_marks_errors() {
        let text = notice_text(Notice::SaveFailed);
        assert!(text.starts_with("✗ Erro ao salvar"));
        assert!(text.ends_with("Não foi possível salvar seus favoritos"));

        assert!(notice_text(Notice::FavoriteAdded).starts_with("✓ "));
    }

    #[test]
    fn test_date_notices_list_examples() {
        assert!(notice_text(Notice::InvalidDate).contains("Exemplos: 25/12, 01/01"));
        assert!(!notice_text(Notice::Copied).contains("Exemplos"));
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!(parse_tab("Deaths"), Ok(Category::Deaths));
        assert!(parse_tab("weddings").is_err());
    }
}
