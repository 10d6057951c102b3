use std::io::{self, BufRead, Write};

use log::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod error;
mod models;
mod services;
mod ui;

use app::{Controller, SearchState, View};
use error::AppError;
use models::{SearchQuery, SearchType, SortBy};
use services::{FavoritesStore, OpenLibraryClient, SearchHistory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenv::dotenv().ok();

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookfinder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loading configuration...");
    let config = config::Config::load();

    // Repositories and gateway are constructed once and handed to the
    // controller; nothing else touches the storage slots.
    let gateway = OpenLibraryClient::new(&config);
    let favorites = FavoritesStore::new(&config.data_dir);
    let history = SearchHistory::new(&config.data_dir);
    let mut controller = Controller::new(gateway, favorites, history);

    println!("BookFinder — discover your next great read");
    println!("Type a query to search, or :help for commands.\n");
    if !controller.history().is_empty() {
        println!("{}\n", ui::render_history(controller.history()));
    }

    let mut search_type = SearchType::All;
    let mut sort = SortBy::Relevance;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::SetType(value) => match value.parse::<SearchType>() {
                Ok(ty) => {
                    search_type = ty;
                    println!("search type set to {}", ty);
                }
                Err(err) => println!("{}", ui::render_error(&err)),
            },
            Command::SetSort(value) => match value.parse::<SortBy>() {
                Ok(order) => {
                    sort = order;
                    println!("sort order set");
                }
                Err(err) => println!("{}", ui::render_error(&err)),
            },
            Command::Tab(value) => match value {
                "favorites" => {
                    controller.select_view(View::Favorites);
                    render(&controller);
                }
                "search" => {
                    controller.select_view(View::Search);
                    render(&controller);
                }
                other => println!("{}", ui::render_error(&format!("unknown tab: {}", other))),
            },
            Command::History => println!("{}", ui::render_history(controller.history())),
            Command::Favorite(index) => match nth(controller.visible_books(), index).cloned() {
                Some(book) => {
                    let now = controller.toggle_favorite(&book)?;
                    let verb = if now { "added to" } else { "removed from" };
                    println!("\"{}\" {} favorites", book.display_title(), verb);
                }
                None => println!("{}", ui::render_error("no book at that position")),
            },
            Command::Open(index) => match nth(controller.visible_books(), index) {
                Some(book) => println!("{}", ui::render_detail(book, controller.gateway())),
                None => println!("{}", ui::render_error("no book at that position")),
            },
            Command::Raw(index) => match nth(controller.visible_books(), index).cloned() {
                Some(book) => match controller.gateway().book_details(&book.key).await {
                    Ok(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
                    Err(err) => println!("{}", ui::render_error(&err.to_string())),
                },
                None => println!("{}", ui::render_error("no book at that position")),
            },
            Command::Retry => {
                let spinner = ui::search_spinner("Retrying last search…");
                controller.retry().await?;
                spinner.finish_and_clear();
                render(&controller);
            }
            Command::Search(text) => {
                let query = SearchQuery::new(text)
                    .with_type(search_type)
                    .with_sort(sort)
                    .with_limit(config.page_size);
                let spinner = ui::search_spinner("Searching…");
                let outcome = controller.submit(query).await;
                spinner.finish_and_clear();
                match outcome {
                    Ok(()) => render(&controller),
                    Err(AppError::EmptyQuery) => {
                        println!("{}", ui::render_error("search query must not be empty"))
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    Ok(())
}

enum Command<'a> {
    Search(&'a str),
    SetType(&'a str),
    SetSort(&'a str),
    Tab(&'a str),
    Favorite(usize),
    Open(usize),
    Raw(usize),
    History,
    Retry,
    Help,
    Quit,
}

/// 1-based lookup into the rendered card list.
fn nth(books: &[models::Book], index: usize) -> Option<&models::Book> {
    index.checked_sub(1).and_then(|i| books.get(i))
}

fn parse_command(line: &str) -> Command<'_> {
    let (name, arg) = match line.strip_prefix(':') {
        Some(rest) => match rest.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        },
        None => return Command::Search(line),
    };

    match name {
        "type" => Command::SetType(arg),
        "sort" => Command::SetSort(arg),
        "tab" => Command::Tab(arg),
        "fav" => Command::Favorite(arg.parse().unwrap_or(0)),
        "open" => Command::Open(arg.parse().unwrap_or(0)),
        "raw" => Command::Raw(arg.parse().unwrap_or(0)),
        "history" => Command::History,
        "retry" => Command::Retry,
        "quit" | "q" => Command::Quit,
        _ => Command::Help,
    }
}

fn render(controller: &Controller) {
    if controller.view() == View::Search {
        match controller.state() {
            SearchState::Error(message) => {
                println!("{}", ui::render_error(message));
                return;
            }
            SearchState::Success(results) => {
                if let Some(query) = controller.last_query() {
                    println!("{}", ui::render_results_header(&query.text, results));
                }
            }
            _ => {}
        }
    }

    let books = controller.visible_books();
    if books.is_empty() {
        println!("{}", ui::render_empty_state(controller.view()));
        return;
    }
    for (i, book) in books.iter().enumerate() {
        println!(
            "{}",
            ui::render_card(i + 1, book, controller.is_favorite(&book.key))
        );
    }
}

fn print_help() {
    println!(
        "commands:\n  <text>            search\n  :type <t>         all|title|author|subject|isbn\n  :sort <s>         relevance|newest|oldest|rating\n  :tab <v>          search|favorites\n  :fav <n>          toggle favorite for result n\n  :open <n>         show details for result n\n  :raw <n>          fetch the raw detail record for result n\n  :history          recent searches\n  :retry            rerun the last search\n  :quit             exit"
    );
}
