use log::{debug, info, warn};

use crate::app::event::{Effect, Event, Focus, Modal, NavItem};
use crate::app::exports::{ExportCoordinator, RESET_DELAY};
use crate::app::loader::PageLoader;
use crate::app::pagination::Pagination;
use crate::fetch::{ExportKind, ExportReceipt};
use crate::records::{derive_view, FilterCriteria, SortSpec, Transaction, ViewSummary};
use crate::utils::FileEntry;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line transient message shown in the status bar.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

/// Debounced "searching…" indicator; only the newest generation may clear it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchIndicator {
    pub searching: bool,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavMenu {
    pub open: bool,
    pub selected: usize,
}

/// All dashboard state, mutated only through [`DashboardState::update`].
#[derive(Debug)]
pub struct DashboardState {
    pub loader: PageLoader,
    pub pagination: Pagination,
    pub filters: FilterCriteria,
    pub sort: SortSpec,
    pub exports: ExportCoordinator,
    pub search: SearchIndicator,
    pub focus: Focus,
    pub modal: Option<Modal>,
    pub nav: NavMenu,
    pub status: Option<StatusMessage>,
    pub saved_exports: Vec<FileEntry>,
    pub running: bool,
    selected: usize,
}

impl DashboardState {
    pub fn new(records_per_page: u32) -> Self {
        Self {
            loader: PageLoader::new(),
            pagination: Pagination::new(records_per_page),
            filters: FilterCriteria::default(),
            sort: SortSpec::default(),
            exports: ExportCoordinator::new(),
            search: SearchIndicator::default(),
            focus: Focus::Table,
            modal: None,
            nav: NavMenu::default(),
            status: None,
            saved_exports: Vec::new(),
            running: true,
            selected: 0,
        }
    }

    /// Effects to run when the dashboard first opens.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.load_current()]
    }

    /// The loaded page after filtering and sorting.
    pub fn visible_rows(&self) -> Vec<&Transaction> {
        derive_view(self.loader.transactions(), &self.filters, self.sort)
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary::of(&self.visible_rows())
    }

    /// Index of the highlighted row, clamped to the current view.
    pub fn selected_index(&self) -> usize {
        let len = self.visible_rows().len();
        self.selected.min(len.saturating_sub(1))
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        let rows = self.visible_rows();
        rows.get(self.selected.min(rows.len().saturating_sub(1)))
            .copied()
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Reload => vec![self.load_current()],
            Event::PageLoaded { request, outcome } => {
                if self.loader.complete(request, outcome) {
                    if let Some(page) = self.loader.page() {
                        self.pagination.apply(page);
                    }
                    self.selected = 0;
                }
                Vec::new()
            }

            Event::GoToPage(page) => self.go_to(page),
            Event::NextPage => self.go_to(self.pagination.current_page.saturating_add(1)),
            Event::PreviousPage => self.go_to(self.pagination.current_page.saturating_sub(1)),
            Event::FirstPage => self.go_to(1),
            Event::LastPage => self.go_to(self.pagination.total_pages),
            Event::SetRecordsPerPage(size) => self.set_records_per_page(size),
            Event::CycleRecordsPerPage => {
                let next = self.pagination.next_page_size();
                self.set_records_per_page(next)
            }

            Event::Focus(focus) => {
                self.focus = focus;
                Vec::new()
            }
            Event::SearchChanged(query) => {
                self.filters.query = query;
                self.selected = 0;
                self.search.generation += 1;
                self.search.searching = true;
                vec![Effect::ScheduleSearchSettle {
                    generation: self.search.generation,
                }]
            }
            Event::SearchSettled { generation } => {
                if generation == self.search.generation {
                    self.search.searching = false;
                }
                Vec::new()
            }
            Event::MinAmountChanged(value) => {
                self.filters.min_amount = value;
                self.selected = 0;
                Vec::new()
            }
            Event::MaxAmountChanged(value) => {
                self.filters.max_amount = value;
                self.selected = 0;
                Vec::new()
            }
            Event::ClearFilters => {
                self.filters.clear();
                self.search.searching = false;
                self.selected = 0;
                Vec::new()
            }
            Event::SortBy(field) => {
                self.sort.select(field);
                self.selected = 0;
                Vec::new()
            }

            Event::SelectNext => {
                let len = self.visible_rows().len();
                if len > 0 {
                    self.selected = (self.selected_index() + 1) % len;
                }
                Vec::new()
            }
            Event::SelectPrevious => {
                let len = self.visible_rows().len();
                if len > 0 {
                    self.selected = self
                        .selected_index()
                        .checked_sub(1)
                        .unwrap_or(len - 1);
                }
                Vec::new()
            }
            Event::OpenDetail => {
                if let Some(txn) = self.selected_transaction().cloned() {
                    self.modal = Some(Modal::Detail(txn));
                }
                Vec::new()
            }

            Event::StartExport(kind) => self.start_export(kind),
            Event::ExportTick { kind, job } => {
                self.exports.tick(kind, job);
                Vec::new()
            }
            Event::ExportFinished { kind, job, outcome } => self.finish_export(kind, job, outcome),
            Event::ExportReset { kind, job } => {
                self.exports.reset(kind, job);
                Vec::new()
            }
            Event::ExportsScanned(entries) => {
                self.saved_exports = entries;
                Vec::new()
            }

            Event::OpenModal(modal) => {
                self.nav.open = false;
                let scan = matches!(modal, Modal::Exports);
                self.modal = Some(modal);
                if scan {
                    vec![Effect::ScanExports]
                } else {
                    Vec::new()
                }
            }
            Event::CloseModal => {
                self.modal = None;
                Vec::new()
            }
            Event::ToggleNav => {
                self.nav.open = !self.nav.open;
                self.nav.selected = 0;
                Vec::new()
            }
            Event::NavNext => {
                self.nav.selected = (self.nav.selected + 1) % NavItem::ALL.len();
                Vec::new()
            }
            Event::NavPrevious => {
                self.nav.selected = self
                    .nav
                    .selected
                    .checked_sub(1)
                    .unwrap_or(NavItem::ALL.len() - 1);
                Vec::new()
            }
            Event::NavActivate => {
                let item = NavItem::ALL[self.nav.selected.min(NavItem::ALL.len() - 1)];
                self.nav.open = false;
                self.update(item.event())
            }

            Event::Quit => {
                info!("Shutting down dashboard");
                self.running = false;
                Vec::new()
            }
        }
    }

    fn load_current(&mut self) -> Effect {
        let request = self.loader.begin();
        debug!(
            "Loading page {} ({} per page) as request {}",
            self.pagination.current_page, self.pagination.records_per_page, request
        );
        Effect::LoadPage {
            request,
            page: self.pagination.current_page,
            limit: self.pagination.records_per_page,
        }
    }

    fn go_to(&mut self, page: u32) -> Vec<Effect> {
        if !self.pagination.can_go_to(page) {
            return Vec::new();
        }
        if self.pagination.set_page(page) {
            vec![self.load_current()]
        } else {
            Vec::new()
        }
    }

    fn set_records_per_page(&mut self, size: u32) -> Vec<Effect> {
        if !crate::config::PAGE_SIZE_OPTIONS.contains(&size) {
            warn!("Ignoring unsupported page size {}", size);
            return Vec::new();
        }
        if self.pagination.set_records_per_page(size) {
            vec![self.load_current()]
        } else {
            Vec::new()
        }
    }

    fn start_export(&mut self, kind: ExportKind) -> Vec<Effect> {
        match self.exports.start(kind) {
            Some(job) => {
                self.status = Some(StatusMessage::info(format!("{} started…", kind.label())));
                vec![
                    Effect::StartProgress {
                        kind,
                        job,
                        every: kind.progress_step(),
                    },
                    Effect::RunExport { kind, job },
                ]
            }
            None => {
                self.status = Some(StatusMessage::info(
                    "An export is already running; wait for it to finish.",
                ));
                Vec::new()
            }
        }
    }

    fn finish_export(
        &mut self,
        kind: ExportKind,
        job: u64,
        outcome: Result<ExportReceipt, String>,
    ) -> Vec<Effect> {
        let succeeded = outcome.is_ok();
        let applied = match outcome {
            Ok(receipt) => {
                let summary = receipt.summary();
                let applied = self.exports.finish(kind, job, Some(receipt));
                if applied {
                    self.status = Some(StatusMessage::info(summary));
                }
                applied
            }
            Err(message) => {
                let applied = self.exports.finish(kind, job, None);
                if applied {
                    warn!("{} failed: {}", kind.label(), message);
                    self.status = Some(StatusMessage::error(format!(
                        "{} failed: {}",
                        kind.label(),
                        message
                    )));
                }
                applied
            }
        };

        if !applied {
            return Vec::new();
        }

        let mut effects = vec![
            Effect::StopProgress { kind },
            Effect::ScheduleExportReset {
                kind,
                job,
                after: RESET_DELAY,
            },
        ];
        if succeeded && matches!(self.modal, Some(Modal::Exports)) {
            effects.push(Effect::ScanExports);
        }
        effects
    }
}
