use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;
use wortschatz_core::Collation;
use wortschatz_lang_german::{GermanCollation, NO_TRANSLATION};

pub mod command;
pub mod controller;
pub mod editor;
pub mod events;
pub mod io;
pub mod settings;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::editor::Editor;
use self::events::AppEvent;
use self::state::AppState;

/// German vocabulary list with article-aware sorting
#[derive(Debug, Parser)]
#[command(name = "wortschatz", version)]
struct Args {
    /// Settings file, created on first change
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Dictionary to open instead of the last one
    #[arg(long)]
    open: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wortschatz=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = settings::load_settings(&args.settings);
    let state = Arc::new(AppState::new(config, args.settings));

    let mut editor = Editor::new(GermanCollation, NO_TRANSLATION);
    open_initial(&state, &mut editor, args.open).await;
    ui::print_message(format!(
        "{} words, type 'help' for commands",
        editor.index().len()
    ));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, editor, shutdown).await
}

/// Open the dictionary given on the command line, or the last saved one
/// when auto-open is on
async fn open_initial<C: Collation + Clone>(
    state: &AppState,
    editor: &mut Editor<C>,
    requested: Option<PathBuf>,
) {
    let path = match requested {
        Some(path) => Some(path),
        None => {
            let config = state.config.read().await;
            config
                .storage
                .open_automatically
                .then(|| config.storage.last_save_path.clone())
                .flatten()
        }
    };
    let Some(path) = path else {
        return;
    };

    match editor.open(&path) {
        Ok(count) => {
            tracing::info!("Opened {} ({} words)", path.display(), count);
            state
                .update_config(|c| c.storage.last_save_path = Some(path.clone()))
                .await;
        }
        Err(e) => {
            tracing::warn!("Could not open {}: {}", path.display(), e);
            ui::print_error(format!("Could not open {}: {}", path.display(), e));
        }
    }
}

pub async fn run<C: Collation + Clone + 'static>(
    state: Arc<AppState>,
    editor: Editor<C>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(editor)?;

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            // The event loop autosaves on Shutdown, then cancels the rest
            if controller.sender().send(AppEvent::Shutdown).await.is_err() {
                controller.shutdown();
            }
        }
        Some(result) = tasks.join_next() => {
            log_task_result(result);
            controller.shutdown();
        }
    }

    while let Some(result) = tasks.join_next().await {
        log_task_result(result);
    }

    Ok(())
}

fn log_task_result(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("Task finished"),
        Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
        Err(e) => tracing::error!("Task panicked: {e}"),
    }
}
