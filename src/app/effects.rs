use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};

use crate::app::event::{Effect, Event};
use crate::fetch::{ApiClient, ExportKind};
use crate::utils::list_csv_files;

/// Executes effects as tokio tasks that report back through the event channel.
pub struct EffectRunner {
    client: ApiClient,
    download_dir: PathBuf,
    search_debounce: Duration,
    events: UnboundedSender<Event>,
    search_timer: Option<JoinHandle<()>>,
    progress_timers: HashMap<ExportKind, JoinHandle<()>>,
    reset_timers: HashMap<ExportKind, JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(
        client: ApiClient,
        download_dir: PathBuf,
        search_debounce: Duration,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            client,
            download_dir,
            search_debounce,
            events,
            search_timer: None,
            progress_timers: HashMap::new(),
            reset_timers: HashMap::new(),
        }
    }

    pub fn run_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::LoadPage {
                request,
                page,
                limit,
            } => {
                let client = self.client.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome = client
                        .fetch_page(page, limit)
                        .await
                        .map_err(|err| {
                            error!("Loading page {} failed: {}", page, err);
                            err.user_message()
                        });
                    let _ = events.send(Event::PageLoaded { request, outcome });
                });
            }
            Effect::RunExport { kind, job } => {
                let client = self.client.clone();
                let events = self.events.clone();
                let dir = self.download_dir.clone();
                tokio::spawn(async move {
                    let outcome = client.export(kind, &dir).await.map_err(|err| {
                        error!("{} failed: {}", kind.label(), err);
                        err.user_message()
                    });
                    let _ = events.send(Event::ExportFinished { kind, job, outcome });
                });
            }
            Effect::StartProgress { kind, job, every } => {
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    let mut ticker = interval(every);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    // The first tick of an interval completes immediately.
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        if events.send(Event::ExportTick { kind, job }).is_err() {
                            break;
                        }
                    }
                });
                if let Some(previous) = self.progress_timers.insert(kind, handle) {
                    previous.abort();
                }
            }
            Effect::StopProgress { kind } => {
                if let Some(handle) = self.progress_timers.remove(&kind) {
                    handle.abort();
                }
            }
            Effect::ScheduleExportReset { kind, job, after } => {
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    sleep(after).await;
                    let _ = events.send(Event::ExportReset { kind, job });
                });
                if let Some(previous) = self.reset_timers.insert(kind, handle) {
                    previous.abort();
                }
            }
            Effect::ScheduleSearchSettle { generation } => {
                if let Some(previous) = self.search_timer.take() {
                    previous.abort();
                }
                let events = self.events.clone();
                let delay = self.search_debounce;
                self.search_timer = Some(tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = events.send(Event::SearchSettled { generation });
                }));
            }
            Effect::ScanExports => {
                let events = self.events.clone();
                let dir = self.download_dir.clone();
                tokio::spawn(async move {
                    match tokio::task::spawn_blocking(move || list_csv_files(dir)).await {
                        Ok(entries) => {
                            let _ = events.send(Event::ExportsScanned(entries));
                        }
                        Err(err) => error!("Scanning saved exports failed: {}", err),
                    }
                });
            }
        }
    }

    /// Cancel every outstanding timer.
    pub fn shutdown(&mut self) {
        debug!("Cancelling outstanding timers");
        if let Some(handle) = self.search_timer.take() {
            handle.abort();
        }
        for (_, handle) in self.progress_timers.drain() {
            handle.abort();
        }
        for (_, handle) in self.reset_timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
