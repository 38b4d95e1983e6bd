use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wortschatz_core::Collation;

use crate::editor::Editor;
use crate::events::{AppEvent, event_loop};
use crate::io::{autosave_timer, spawn_stdin_reader};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<C>(&self, editor: Editor<C>) -> anyhow::Result<JoinSet<anyhow::Result<()>>>
    where
        C: Collation + Clone + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop, sole owner of the editor
        tasks.spawn(event_loop(
            self.state.clone(),
            editor,
            self.channels.events.1.clone(),
            self.cancel_token.clone(),
        ));

        // Autosave ticks go through the same queue as commands
        tasks.spawn(autosave_timer(
            self.state.clone(),
            self.channels.events.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin is read on its own thread, detached
        spawn_stdin_reader(self.channels.events.0.clone_sync())?;

        Ok(tasks)
    }

    /// Sender for injecting events, e.g. from tests
    pub fn sender(&self) -> AsyncSender<AppEvent> {
        self.channels.events.0.clone()
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
