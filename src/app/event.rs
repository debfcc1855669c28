use std::time::Duration;

use crate::fetch::{ExportKind, ExportReceipt};
use crate::records::{PageResult, SortField, Transaction};
use crate::utils::FileEntry;

/// Which input currently receives typed characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Table,
    Search,
    MinAmount,
    MaxAmount,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Detail(Transaction),
    Help,
    Exports,
}

/// Entries of the collapsible navigation menu.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavItem {
    Reload,
    BufferedExport,
    StreamedExport,
    SavedExports,
    Help,
    Quit,
}

impl NavItem {
    pub const ALL: [NavItem; 6] = [
        NavItem::Reload,
        NavItem::BufferedExport,
        NavItem::StreamedExport,
        NavItem::SavedExports,
        NavItem::Help,
        NavItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Reload => "Reload page",
            NavItem::BufferedExport => "Export CSV",
            NavItem::StreamedExport => "Export CSV (stream)",
            NavItem::SavedExports => "Saved exports",
            NavItem::Help => "Help",
            NavItem::Quit => "Quit",
        }
    }

    pub fn is_export(self) -> bool {
        matches!(self, NavItem::BufferedExport | NavItem::StreamedExport)
    }

    pub fn event(self) -> Event {
        match self {
            NavItem::Reload => Event::Reload,
            NavItem::BufferedExport => Event::StartExport(ExportKind::Buffered),
            NavItem::StreamedExport => Event::StartExport(ExportKind::Streamed),
            NavItem::SavedExports => Event::OpenModal(Modal::Exports),
            NavItem::Help => Event::OpenModal(Modal::Help),
            NavItem::Quit => Event::Quit,
        }
    }
}

/// Everything that can change dashboard state: user intents and task completions.
#[derive(Clone, Debug)]
pub enum Event {
    Reload,
    PageLoaded {
        request: u64,
        outcome: Result<PageResult, String>,
    },

    GoToPage(u32),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    SetRecordsPerPage(u32),
    CycleRecordsPerPage,

    Focus(Focus),
    SearchChanged(String),
    SearchSettled {
        generation: u64,
    },
    MinAmountChanged(String),
    MaxAmountChanged(String),
    ClearFilters,
    SortBy(SortField),

    SelectNext,
    SelectPrevious,
    OpenDetail,

    StartExport(ExportKind),
    ExportTick {
        kind: ExportKind,
        job: u64,
    },
    ExportFinished {
        kind: ExportKind,
        job: u64,
        outcome: Result<ExportReceipt, String>,
    },
    ExportReset {
        kind: ExportKind,
        job: u64,
    },
    ExportsScanned(Vec<FileEntry>),

    OpenModal(Modal),
    CloseModal,
    ToggleNav,
    NavNext,
    NavPrevious,
    NavActivate,

    Quit,
}

/// Work the runtime performs on behalf of the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPage {
        request: u64,
        page: u32,
        limit: u32,
    },
    RunExport {
        kind: ExportKind,
        job: u64,
    },
    StartProgress {
        kind: ExportKind,
        job: u64,
        every: Duration,
    },
    StopProgress {
        kind: ExportKind,
    },
    ScheduleExportReset {
        kind: ExportKind,
        job: u64,
        after: Duration,
    },
    ScheduleSearchSettle {
        generation: u64,
    },
    ScanExports,
}
