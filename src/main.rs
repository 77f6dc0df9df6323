mod commands;
mod config;
mod error;
mod github_api_utils;
mod search_utils;
mod state_utils;

use commands::parse_command;
use config::Config;
use github_api_utils::search_client::GitHubClient;
use search_utils::{
    debouncer::Debouncer,
    orchestrator::{FetchOutcome, SearchOrchestrator},
};
use state_utils::{
    events::{log_event, SearchEvent},
    store::Store,
    AppState, SearchState, Status,
};

use dotenv::dotenv;
use std::{sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

// extra time for a fired timer to hand over to its request
const SETTLE_TIME: Duration = Duration::from_millis(50);

fn print_results(search: &SearchState, json: bool) {
    if json {
        match serde_json::to_string_pretty(&search.results) {
            Ok(out) => println!("{out}"),
            Err(err) => error!("Couldn't serialize results: {err}"),
        }
        return;
    }
    println!(
        "\n'{}': showing {} of {} repositories\n",
        search.search_text,
        search.results.len(),
        search.total_count
    );
    for repo in &search.results {
        println!("  {}/{}", repo.owner.login, repo.name);
        println!(
            "    ★ {}  forks {}  issues {}  {}",
            repo.stars,
            repo.forks,
            repo.open_issues,
            repo.language.as_deref().unwrap_or("-")
        );
        if let Some(desc) = &repo.description {
            println!("    {}", desc);
        }
        println!(
            "    {}  (last push {})\n",
            repo.url,
            repo.latest_commit.format("%Y-%m-%d")
        );
    }
}

fn print_outcome(search: &SearchState, json: bool) {
    match search.status {
        Status::Success => print_results(search, json),
        Status::Failure => eprintln!(
            "{}",
            search.error_message.as_deref().unwrap_or("Search failed")
        ),
        _ => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // load env variables
    dotenv().ok();
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let json = args.iter().any(|a| a == "--json");
    let words: Vec<&str> = args
        .iter()
        .skip(2)
        .map(String::as_str)
        .filter(|a| *a != "--json")
        .collect();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let store = Store::new(AppState {
        filters: config.filters.clone(),
        sorting: config.sorting.clone(),
        ..Default::default()
    });
    store.subscribe(log_event);

    let orchestrator = Arc::new(SearchOrchestrator::new(
        store.clone(),
        GitHubClient::new(reqwest::Client::new(), &config),
        config.discard_stale_responses,
    ));

    match args.get(1).map(String::as_str) {
        Some("search") => {
            store.dispatch(SearchEvent::UpdateSearchField(words.join(" ")));
            let outcome = orchestrator.fetch_search_results().await;
            print_outcome(&store.state().search, json);
            match outcome {
                FetchOutcome::Succeeded { count, total_count } => {
                    info!("Fetched {} of {} repositories", count, total_count)
                }
                FetchOutcome::Cleared => warn!("Nothing to search for"),
                FetchOutcome::Failed(_) | FetchOutcome::Discarded => std::process::exit(1),
            }
        }
        Some("watch") => {
            store.subscribe(move |event, state| {
                if matches!(event, SearchEvent::SearchSuccess | SearchEvent::SearchFailure(_)) {
                    print_outcome(&state.search, json);
                }
            });
            let debouncer = Debouncer::new(orchestrator, config.typing_delay);

            // every line is the whole content of the search field,
            // unless it starts with ':' (e.g. `:language rust`, `:order asc`)
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match parse_command(&line, &store.state()) {
                        // a filter or sort change re-runs the current text
                        Some(Ok(event)) => {
                            store.dispatch(event);
                            debouncer.on_input(store.state().search.search_text);
                        }
                        Some(Err(err)) => error!("{err}"),
                        None => debouncer.on_input(line),
                    },
                    Ok(None) => break,
                    Err(err) => {
                        error!("Couldn't read stdin: {err}");
                        break;
                    }
                }
            }

            tokio::time::sleep(config.typing_delay + SETTLE_TIME).await;
            while store.state().search.status == Status::Loading {
                tokio::time::sleep(SETTLE_TIME).await;
            }
        }
        Some(other) => error!("Unrecognized argument {}, closing...", other),
        None => error!("Usage: repo_search <search <text...> | watch> [--json]"),
    }
}
