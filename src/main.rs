//! SpecScout CLI shell.
//!
//! A thin interactive layer over the library: it reads commands from stdin,
//! drives the search pipeline, and renders the derived result sequence as
//! text. All pipeline semantics (validation, fallback, filtering, sorting,
//! favorites) live in the library; this file only translates lines into
//! operations and errors into messages.
//!
//! # Commands
//!
//! - free text          → run a search
//! - `:sort <key>`      → relevance | year-desc | year-asc | name-asc | manufacturer-asc
//! - `:maker [label]`   → filter by exact manufacturer label (no label clears)
//! - `:laptops on|off`  → toggle the laptops-only filter
//! - `:facets`          → list manufacturer filter choices
//! - `:fav <id>`        → toggle a favorite for a displayed row
//! - `:favs`            → list favorites in insertion order
//! - `:fav! <n>`        → re-run a search with favorite n's label
//! - `:clearfavs`       → clear all favorites
//! - `:show`            → re-render the current view
//! - `:quit`            → exit

use std::io::{BufRead, Write};

use specscout::app::{ResultView, SearchOrchestrator, SortKey, MIN_QUERY_CHARS};
use specscout::client::{WikidataDetailsClient, WikidataSearchClient};
use specscout::domain::SpecScoutError;
use specscout::storage::{FavoritesStore, JsonFavorites};
use specscout::{infrastructure, observability, Config};

fn main() -> std::process::ExitCode {
    let config = match Config::load(&infrastructure::config_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("specscout: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("specscout: failed to start runtime: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("specscout: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> specscout::Result<()> {
    let search = WikidataSearchClient::new(
        config.search_endpoint.clone(),
        config.search_limit,
        config.search_timeout(),
    )?;
    let details = WikidataDetailsClient::new(
        config.sparql_endpoint.clone(),
        config.label_languages(),
        config.details_chunk_size,
        config.details_timeout(),
    )?;

    let mut shell = Shell {
        orchestrator: SearchOrchestrator::new(
            search,
            details,
            config.primary_language.clone(),
            config.fallback_language.clone(),
        ),
        view: ResultView::new(),
        favorites: FavoritesStore::new(JsonFavorites::new(
            infrastructure::favorites_path(),
        )),
    };

    println!("SpecScout — type a model name to search, :help for commands.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Command::Quit => break,
            command => shell.handle(command).await,
        }
    }

    Ok(())
}

/// One user action, parsed from an input line.
enum Command {
    Search(String),
    Sort(String),
    Maker(Option<String>),
    Laptops(bool),
    Facets,
    FavToggle(String),
    Favs,
    FavShortcut(usize),
    ClearFavs,
    Show,
    Help,
    Unknown(String),
    Quit,
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "sort" => Command::Sort(arg.to_string()),
        "maker" => Command::Maker((!arg.is_empty()).then(|| arg.to_string())),
        "laptops" => Command::Laptops(arg == "on"),
        "facets" => Command::Facets,
        "fav" => Command::FavToggle(arg.to_string()),
        "favs" => Command::Favs,
        "fav!" => arg
            .parse()
            .map_or(Command::Unknown(line.to_string()), Command::FavShortcut),
        "clearfavs" => Command::ClearFavs,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

struct Shell {
    orchestrator: SearchOrchestrator<WikidataSearchClient, WikidataDetailsClient>,
    view: ResultView,
    favorites: FavoritesStore<JsonFavorites>,
}

impl Shell {
    async fn handle(&mut self, command: Command) {
        match command {
            Command::Search(term) => self.search(&term).await,
            Command::Sort(key) => match SortKey::parse(&key) {
                Some(key) => {
                    self.view.criteria.sort_key = key;
                    self.render();
                }
                None => println!(
                    "Unknown sort key. Use relevance, year-desc, year-asc, name-asc, or manufacturer-asc."
                ),
            },
            Command::Maker(maker) => {
                self.view.criteria.manufacturer = maker;
                self.render();
            }
            Command::Laptops(on) => {
                self.view.criteria.laptops_only = on;
                self.render();
            }
            Command::Facets => {
                let facets = ResultView::populate_facets(self.view.rows());
                if facets.is_empty() {
                    println!("No manufacturers in the current results.");
                } else {
                    println!("Manufacturers: {}", facets.join(", "));
                }
            }
            Command::FavToggle(id) => self.toggle_favorite(&id),
            Command::Favs => self.list_favorites(),
            Command::FavShortcut(n) => {
                let label = self
                    .favorites
                    .list()
                    .get(n.wrapping_sub(1))
                    .map(|f| f.label.clone());
                match label {
                    Some(label) => self.search(&label).await,
                    None => println!("No favorite #{n}."),
                }
            }
            Command::ClearFavs => {
                if let Err(e) = self.favorites.clear() {
                    report_persistence(&e);
                }
                println!("Favorites cleared.");
            }
            Command::Show => self.render(),
            Command::Help | Command::Unknown(_) => print_help(),
            // Quit is consumed by the input loop before dispatch.
            Command::Quit => {}
        }
    }

    async fn search(&mut self, term: &str) {
        match self.orchestrator.run_search(term).await {
            Ok(outcome) => {
                self.view.set_data(outcome.rows, outcome.canonical_order);
                self.render();
            }
            Err(e) => report_search_error(&e),
        }
    }

    fn toggle_favorite(&mut self, id: &str) {
        let Some(label) = self
            .view
            .rows()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.display_label().to_string())
        else {
            println!("No displayed row with id {id}.");
            return;
        };

        let result = if self.favorites.is_favorite(id) {
            println!("Removed {label} from favorites.");
            self.favorites.remove(id)
        } else {
            println!("Added {label} to favorites.");
            self.favorites.add(id, label.clone())
        };

        if let Err(e) = result {
            report_persistence(&e);
        }
    }

    fn list_favorites(&self) {
        if self.favorites.list().is_empty() {
            println!("No favorites yet. Star one with :fav <id>.");
            return;
        }
        for (i, fav) in self.favorites.list().iter().enumerate() {
            println!("{:2}. {} ({})", i + 1, fav.label, fav.id);
        }
    }

    fn render(&self) {
        let rows = self.view.derive();
        if rows.is_empty() {
            println!("No results after filtering. Try removing filters.");
            return;
        }

        for row in &rows {
            let star = if self.favorites.is_favorite(&row.id) {
                "*"
            } else {
                " "
            };
            let mut attributes = Vec::new();
            if let Some(m) = &row.manufacturer {
                attributes.push(m.clone());
            }
            if let Some(cpu) = &row.cpu {
                attributes.push(cpu.clone());
            }
            if let Some(cores) = row.cores {
                attributes.push(format!("{cores} cores"));
            }
            if let Some(threads) = row.threads {
                attributes.push(format!("{threads} threads"));
            }
            if let Some(ram) = &row.ram {
                attributes.push(format!("{ram} RAM"));
            }
            if let Some(year) = row.inception_year() {
                attributes.push(year.to_string());
            }
            if let Some(category) = &row.category_label {
                attributes.push(category.clone());
            }

            println!("{star} {} [{}]", row.display_label(), row.id);
            if let Some(description) = &row.description {
                println!("     {description}");
            }
            if !attributes.is_empty() {
                println!("     {}", attributes.join(" · "));
            }
        }
    }
}

/// Per-kind user messages for a failed search, mirroring the error taxonomy.
fn report_search_error(e: &SpecScoutError) {
    println!("{}", search_error_message(e));
}

fn search_error_message(e: &SpecScoutError) -> String {
    match e {
        SpecScoutError::Validation(_) => {
            format!("Type at least {MIN_QUERY_CHARS} characters to search.")
        }
        SpecScoutError::RateLimited { .. } => {
            "Too many requests (429). Wait a minute and try again.".to_string()
        }
        SpecScoutError::Timeout { .. } => "The request timed out. Try again.".to_string(),
        _ => "Network error while fetching data.".to_string(),
    }
}

fn report_persistence(e: &SpecScoutError) {
    println!("Warning: couldn't save favorites ({e}). Changes kept for this session.");
}

fn print_help() {
    println!(
        "Commands:\n  \
         <text>          search for a device/model\n  \
         :sort <key>     relevance | year-desc | year-asc | name-asc | manufacturer-asc\n  \
         :maker [label]  filter by manufacturer (omit label to clear)\n  \
         :laptops on|off laptops-only filter\n  \
         :facets         list manufacturer choices\n  \
         :fav <id>       toggle favorite for a displayed row\n  \
         :favs           list favorites\n  \
         :fav! <n>       search again using favorite n's label\n  \
         :clearfavs      clear favorites\n  \
         :show           re-render current view\n  \
         :quit           exit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_tracks_the_minimum_length() {
        let message =
            search_error_message(&SpecScoutError::Validation("too short".to_string()));
        assert_eq!(
            message,
            format!("Type at least {MIN_QUERY_CHARS} characters to search.")
        );
    }

    #[test]
    fn each_error_kind_gets_a_distinct_message() {
        let messages = [
            search_error_message(&SpecScoutError::RateLimited { service: "entity search" }),
            search_error_message(&SpecScoutError::Timeout { service: "entity search" }),
            search_error_message(&SpecScoutError::Network("boom".to_string())),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
