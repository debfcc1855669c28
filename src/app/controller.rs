use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use log::{debug, info};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::app::effects::EffectRunner;
use crate::app::event::Event;
use crate::app::state::DashboardState;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::ui::{map_key, render_dashboard, TerminalGuard};

/// Owns the terminal session and feeds input and task results into the dashboard state.
pub struct DashboardController {
    config: Config,
    client: ApiClient,
}

impl DashboardController {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        Ok(Self { config, client })
    }

    pub async fn run(self) -> Result<()> {
        let (tx, mut rx) = unbounded_channel();
        let mut runner = EffectRunner::new(
            self.client.clone(),
            self.config.exports.download_dir.clone(),
            self.config.ui.search_debounce,
            tx,
        );
        let mut state = DashboardState::new(self.config.pagination.default_page_size);
        info!("Dashboard starting against {}", self.client.base_url());

        let mut guard = TerminalGuard::new()?;
        runner.run_all(state.start());
        let outcome = drive(
            &mut guard,
            &mut state,
            &mut runner,
            &mut rx,
            self.config.ui.tick_rate,
        );

        runner.shutdown();
        guard.restore()?;
        outcome
    }
}

fn drive(
    guard: &mut TerminalGuard,
    state: &mut DashboardState,
    runner: &mut EffectRunner,
    rx: &mut UnboundedReceiver<Event>,
    tick_rate: Duration,
) -> Result<()> {
    while state.running {
        guard
            .terminal_mut()
            .draw(|f| render_dashboard(f, &*state))?;

        // Polling blocks, so hand this worker back to the runtime while waiting.
        if tokio::task::block_in_place(|| event::poll(tick_rate))? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(event) = map_key(state, key) {
                        debug!("Key {:?} -> {:?}", key.code, event);
                        runner.run_all(state.update(event));
                    }
                }
                // Resizes are picked up by the next draw.
                _ => {}
            }
        }

        while let Ok(event) = rx.try_recv() {
            runner.run_all(state.update(event));
        }
    }
    Ok(())
}
