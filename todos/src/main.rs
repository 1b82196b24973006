//! Todo Master command line
//!
//! Seeds a task list from the remote endpoint, applies any local additions,
//! and prints the projected list once.
//!
//! # Usage
//!
//! ```bash
//! todo-master                       # everything
//! todo-master buy --filter active   # open items containing "buy"
//! todo-master --add "Water plants"  # create an item before printing
//! ```

use clap::Parser;
use std::time::Duration;
use todo_master_core::environment::SystemClock;
use todos::editor::SUBMIT_DELAY;
use todos::{
    Config, Editor, FilterMode, HttpSeedLoader, ItemStore, Projection, SeedLoader, TodoState,
    projection::ListStatus,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print a seeded, filtered task list
#[derive(Parser, Debug)]
#[command(name = "todo-master")]
#[command(about = "Seed a task list from the remote endpoint and print it")]
#[command(version)]
struct Cli {
    /// Case-insensitive text the rows must contain
    search: Option<String>,

    /// Which rows to show: all, active or completed
    #[arg(short, long, default_value_t)]
    filter: FilterMode,

    /// Create an item before printing (repeatable)
    #[arg(short, long, value_name = "TEXT")]
    add: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log.filter)
                .unwrap_or_else(|_| todos::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let loader = HttpSeedLoader::from_config(&config.seed);
    tracing::info!(url = %loader.url(), "Starting task list");

    let store = ItemStore::launch(loader).await?;
    println!("Loading your todos...");

    if store.wait_for_seed(config.seed.wait()).await.is_err() {
        tracing::warn!(wait = ?config.seed.wait(), "Seed fetch still pending");
    }

    add_items(&store, &cli.add).await?;

    let state = store.snapshot();
    print!("{}", render(&state, cli.search.as_deref().unwrap_or_default(), cli.filter));

    if let Err(error) = store.shutdown(Duration::from_secs(1)).await {
        tracing::debug!(%error, "Discarding unfinished seed fetch");
    }
    Ok(())
}

/// Create one item per `--add` through the editor
async fn add_items<L>(store: &ItemStore<L>, texts: &[String]) -> anyhow::Result<()>
where
    L: SeedLoader + 'static,
{
    let clock = SystemClock;
    let mut editor = Editor::new();

    for text in texts {
        editor.open_create();
        let Some(draft) = editor.begin_submit(text) else {
            editor.cancel();
            tracing::warn!("Skipping blank todo");
            continue;
        };

        // Also keeps millisecond ids of consecutive additions apart
        tokio::time::sleep(SUBMIT_DELAY).await;
        if let Some(action) = editor.finish_submit(draft, &clock) {
            store.send(action).await?;
        }
    }
    Ok(())
}

/// Text rendering of one frame
fn render(state: &TodoState, search: &str, filter: FilterMode) -> String {
    use std::fmt::Write;

    let view = Projection::new(&state.items, search, filter);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", view.headline());

    if state.is_loading {
        let _ = writeln!(out, "(still loading)");
    }
    if let Some(error) = &state.load_error {
        let _ = writeln!(out, "Something went wrong\n{error}");
    }

    // The list area waits for a settled, successful seed
    if state.is_loading || state.load_error.is_some() {
        return out;
    }

    let _ = writeln!(out, "Filter: {}", filter.label());
    if view.total_count > 0 {
        let percent = view.progress_percent();
        let _ = writeln!(
            out,
            "{} of {} completed  {}  {percent:.0}%",
            view.completed_count,
            view.total_count,
            progress_bar(percent, 20)
        );
    }

    match view.status() {
        ListStatus::Showing(_) => {
            for item in &view.visible {
                let mark = if item.completed { 'x' } else { ' ' };
                let _ = writeln!(out, "[{mark}] {}", item.text);
            }
        },
        status => {
            if let Some(message) = status.message() {
                let _ = writeln!(out, "{message}");
            }
            if let Some(hint) = status.hint() {
                let _ = writeln!(out, "{hint}");
            }
        },
    }

    out
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todos::mocks::sample_todos;

    fn cli(list: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("todo-master").chain(list.iter().copied()))
    }

    #[test]
    fn test_cli_shape() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() -> Result<(), clap::Error> {
        let parsed = cli(&[])?;
        assert_eq!(parsed.search, None);
        assert_eq!(parsed.filter, FilterMode::All);
        assert!(parsed.add.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_search_and_filter() -> Result<(), clap::Error> {
        let parsed = cli(&["buy", "-f", "done", "--add", "Bake", "-a", "Fry"])?;
        assert_eq!(parsed.search.as_deref(), Some("buy"));
        assert_eq!(parsed.filter, FilterMode::Completed);
        assert_eq!(parsed.add, vec!["Bake".to_string(), "Fry".to_string()]);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(cli(&["--verbose"]).is_err());
        assert!(cli(&["--filter"]).is_err());
        assert!(cli(&["--filter", "urgent"]).is_err());
        assert!(cli(&["one", "two"]).is_err());
    }

    #[test]
    fn test_render_rows_and_progress() {
        let state = TodoState::with_items(sample_todos());
        let out = render(&state, "", FilterMode::All);

        assert!(out.contains("1 of 3 tasks completed"));
        assert!(out.contains("[x] Buy eggs"));
        assert!(out.contains("[ ] Call mom"));
        assert!(out.contains("33%"));
    }

    #[test]
    fn test_render_empty_and_error() {
        let mut state = TodoState::with_items(Vec::new());
        state.load_error = Some("Failed to fetch todos".to_string());
        let out = render(&state, "", FilterMode::All);

        assert!(out.contains("Start organizing your day"));
        assert!(out.contains("Something went wrong\nFailed to fetch todos"));
        assert!(!out.contains("No todos yet"));
        assert!(!out.contains("Filter:"));
    }

    #[test]
    fn test_render_empty_list_after_seed() {
        let state = TodoState::with_items(Vec::new());
        let out = render(&state, "", FilterMode::All);

        assert!(out.contains("No todos yet"));
        assert!(out.contains("Create your first todo to get started!"));
    }

    #[test]
    fn test_render_hides_rows_while_loading() {
        let mut state = TodoState::with_items(sample_todos());
        state.is_loading = true;
        let out = render(&state, "", FilterMode::All);

        assert!(out.contains("(still loading)"));
        assert!(!out.contains("Buy eggs"));
        assert!(!out.contains("completed  ["));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(100.0, 4), "[####]");
        assert_eq!(progress_bar(50.0, 4), "[##--]");
    }
}
