use std::time::Duration;

use log::{debug, info};

use crate::fetch::{ExportKind, ExportReceipt};

/// Progress steps for the buffered export; the last one is reserved for completion.
pub const BUFFERED_RAMP: [u8; 5] = [20, 40, 60, 80, 100];
pub const BUFFERED_STEP: Duration = Duration::from_millis(300);
pub const STREAMED_STEP: Duration = Duration::from_millis(250);
pub const STREAMED_INCREMENT: u8 = 10;
pub const STREAMED_CAP: u8 = 90;
/// Delay between an export finishing and its controls re-enabling.
pub const RESET_DELAY: Duration = Duration::from_millis(1000);

impl ExportKind {
    pub fn progress_step(self) -> Duration {
        match self {
            ExportKind::Buffered => BUFFERED_STEP,
            ExportKind::Streamed => STREAMED_STEP,
        }
    }

    fn advance(self, progress: u8) -> u8 {
        match self {
            ExportKind::Buffered => BUFFERED_RAMP
                .iter()
                .copied()
                .find(|step| *step > progress && *step < 100)
                .unwrap_or(progress),
            ExportKind::Streamed => progress.saturating_add(STREAMED_INCREMENT).min(STREAMED_CAP),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub kind: ExportKind,
    pub progress: u8,
    pub active: bool,
    pub job: u64,
    finished: bool,
}

impl ExportJob {
    fn idle(kind: ExportKind) -> Self {
        Self {
            kind,
            progress: 0,
            active: false,
            job: 0,
            finished: false,
        }
    }

    fn is_current(&self, job: u64) -> bool {
        self.active && self.job == job
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Owns both export jobs and the rule that only one may run at a time.
#[derive(Debug, Clone)]
pub struct ExportCoordinator {
    buffered: ExportJob,
    streamed: ExportJob,
    next_job: u64,
    last_receipt: Option<ExportReceipt>,
}

impl Default for ExportCoordinator {
    fn default() -> Self {
        Self {
            buffered: ExportJob::idle(ExportKind::Buffered),
            streamed: ExportJob::idle(ExportKind::Streamed),
            next_job: 0,
            last_receipt: None,
        }
    }
}

impl ExportCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(&self, kind: ExportKind) -> &ExportJob {
        match kind {
            ExportKind::Buffered => &self.buffered,
            ExportKind::Streamed => &self.streamed,
        }
    }

    fn job_mut(&mut self, kind: ExportKind) -> &mut ExportJob {
        match kind {
            ExportKind::Buffered => &mut self.buffered,
            ExportKind::Streamed => &mut self.streamed,
        }
    }

    /// Both export controls are disabled while either job runs.
    pub fn any_active(&self) -> bool {
        self.buffered.active || self.streamed.active
    }

    pub fn last_receipt(&self) -> Option<&ExportReceipt> {
        self.last_receipt.as_ref()
    }

    /// Start a job, or return `None` when an export is already running.
    pub fn start(&mut self, kind: ExportKind) -> Option<u64> {
        if self.any_active() {
            debug!("Rejecting {} while another export is active", kind.label());
            return None;
        }

        self.next_job += 1;
        let job = self.next_job;
        *self.job_mut(kind) = ExportJob {
            kind,
            progress: 0,
            active: true,
            job,
            finished: false,
        };
        info!("Starting {} (job {})", kind.label(), job);
        Some(job)
    }

    /// Advance the simulated progress. Ticks for other jobs or finished jobs are ignored.
    pub fn tick(&mut self, kind: ExportKind, job: u64) -> bool {
        let entry = self.job_mut(kind);
        if !entry.is_current(job) || entry.finished {
            return false;
        }
        let next = kind.advance(entry.progress);
        let changed = next != entry.progress;
        entry.progress = next;
        changed
    }

    pub fn finish(&mut self, kind: ExportKind, job: u64, receipt: Option<ExportReceipt>) -> bool {
        let entry = self.job_mut(kind);
        if !entry.is_current(job) {
            return false;
        }
        entry.progress = 100;
        entry.finished = true;
        if receipt.is_some() {
            self.last_receipt = receipt;
        }
        true
    }

    /// Re-enable the controls once the post-completion delay has passed.
    pub fn reset(&mut self, kind: ExportKind, job: u64) -> bool {
        let entry = self.job_mut(kind);
        if entry.job != job {
            return false;
        }
        entry.active = false;
        entry.finished = false;
        entry.progress = 0;
        true
    }
}
