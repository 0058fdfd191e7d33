use std::time::{Duration, Instant};

/// Where a command ended up once the transaction finished with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Executed,
    Failed,
    Undone,
    UndoFailed,
}

impl StepStatus {
    fn marker(self) -> &'static str {
        match self {
            Self::Executed => "✓",
            Self::Failed => "✗",
            Self::Undone => "↩",
            Self::UndoFailed => "⚠",
        }
    }
}

#[derive(Debug)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started: Instant,
    /// Set when execute returns, and moved forward again when undo returns.
    pub settled: Option<Instant>,
    /// Only present for commands whose execute succeeded.
    pub undo_description: Option<String>,
}

impl StepRecord {
    /// Time from start until the command last settled, if it has.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.settled.map(|settled| settled.duration_since(self.started))
    }
}

/// What a single run did to each of its commands, in execution order.
///
/// Entries are addressed by the position returned from `record_start`, so two
/// commands sharing a name are tracked separately.
#[derive(Debug, Default)]
pub struct TransactionJournal {
    records: Vec<StepRecord>,
}

impl TransactionJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) -> usize {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started: Instant::now(),
            settled: None,
            undo_description: None,
        });
        self.records.len() - 1
    }

    pub(crate) fn record_failure(&mut self, index: usize) {
        self.settle(index, StepStatus::Failed);
    }

    pub(crate) fn record_success(&mut self, index: usize, undo_description: String) {
        self.settle(index, StepStatus::Executed);
        if let Some(record) = self.records.get_mut(index) {
            record.undo_description = Some(undo_description);
        }
    }

    pub(crate) fn record_undone(&mut self, index: usize) {
        self.settle(index, StepStatus::Undone);
    }

    pub(crate) fn record_undo_failed(&mut self, index: usize) {
        self.settle(index, StepStatus::UndoFailed);
    }

    fn settle(&mut self, index: usize, status: StepStatus) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = status;
            record.settled = Some(Instant::now());
        }
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Names of the commands whose effects are still in place.
    #[must_use]
    pub fn committed(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.status == StepStatus::Executed)
            .map(|record| record.name.as_str())
            .collect()
    }

    /// Human-readable run report, `<marker> <name>` per line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{} {}", record.status.marker(), record.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
