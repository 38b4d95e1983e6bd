use std::io::BufRead;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use kanal::{AsyncSender, Sender};
use tokio_util::sync::CancellationToken;

use crate::command::Command;
use crate::events::AppEvent;
use crate::state::AppState;
use crate::ui;

/// How often a disabled autosave checks whether it was turned on
const AUTOSAVE_IDLE_POLL: Duration = Duration::from_secs(1);

/// Read commands from stdin on a dedicated thread
///
/// Blocking reads never hold up runtime shutdown this way. The thread ends
/// when stdin closes or the event loop is gone.
pub fn spawn_stdin_reader(event_tx: Sender<AppEvent>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<Command>() {
                    Ok(command) => {
                        if event_tx.send(AppEvent::Command(command)).is_err() {
                            return;
                        }
                    }
                    Err(e) => ui::print_error(e),
                }
            }

            tracing::info!("stdin closed");
            let _ = event_tx.send(AppEvent::Shutdown);
        })
}

/// Send an autosave tick every configured interval
///
/// The interval is re-read from the config before each wait, so changes
/// take effect after the current wait.
pub async fn autosave_timer(
    state: Arc<AppState>,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let interval = state.config.read().await.autosave.interval();

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval.unwrap_or(AUTOSAVE_IDLE_POLL)) => {}
        }

        if interval.is_some() {
            tracing::debug!("Autosave tick");
            event_tx.send(AppEvent::Autosave).await?;
        }
    }

    tracing::info!("Autosave timer stopping");
    Ok(())
}
