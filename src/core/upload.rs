//! The simulated upload: a staging list plus a progress state machine.
//!
//! No bytes move anywhere. A run ticks from 0 to 100 percent and then hands
//! the staged records over as one batch.

use super::{CoreError, FileRecord};
use serde::Serialize;

/// Progress of the current (or last) run.
///
/// `Completed`, `Cancelled` and `Failed` end a run; exactly one of them holds
/// once it is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum UploadState {
    #[default]
    Idle,
    InProgress {
        percent: u8,
    },
    Completed,
    Cancelled,
    /// The batch was refused at commit time. Staged records are kept.
    Failed,
}

impl UploadState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }

    pub fn percent(&self) -> u8 {
        match self {
            Self::InProgress { percent } => *percent,
            Self::Completed => 100,
            Self::Idle | Self::Cancelled | Self::Failed => 0,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::InProgress { .. } => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Default)]
pub struct UploadSession {
    staged: Vec<FileRecord>,
    state: UploadState,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn staged(&self) -> &[FileRecord] {
        &self.staged
    }

    /// Appends records to the staging list.
    pub fn stage(&mut self, records: Vec<FileRecord>) -> Result<(), CoreError> {
        if self.state.is_in_progress() {
            return Err(CoreError::UploadInProgress);
        }
        self.staged.extend(records);
        Ok(())
    }

    /// Drops a record from the staging list. Absent ids are a no-op.
    pub fn unstage(&mut self, id: &str) -> Result<Option<FileRecord>, CoreError> {
        if self.state.is_in_progress() {
            return Err(CoreError::UploadInProgress);
        }
        let removed = self
            .staged
            .iter()
            .position(|r| r.id.as_str() == id)
            .map(|pos| self.staged.remove(pos));
        Ok(removed)
    }

    /// Starts a new run at 0 percent.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        if self.state.is_in_progress() {
            return Err(CoreError::UploadInProgress);
        }
        if self.staged.is_empty() {
            return Err(CoreError::NothingStaged);
        }
        self.state = UploadState::InProgress { percent: 0 };
        Ok(())
    }

    /// Moves progress forward by `step` percent, saturating at 100.
    pub fn advance(&mut self, step: u8) -> Result<u8, CoreError> {
        match self.state {
            UploadState::InProgress { percent } => {
                let next = percent.saturating_add(step).min(100);
                self.state = UploadState::InProgress { percent: next };
                Ok(next)
            }
            other => Err(CoreError::InvalidTransition(other.name())),
        }
    }

    /// Finishes a run that has reached 100 percent and hands over the batch.
    pub fn complete(&mut self) -> Result<Vec<FileRecord>, CoreError> {
        match self.state {
            UploadState::InProgress { percent: 100 } => {
                self.state = UploadState::Completed;
                Ok(std::mem::take(&mut self.staged))
            }
            other => Err(CoreError::InvalidTransition(other.name())),
        }
    }

    /// Ends a run whose batch could not be committed. Staged records stay.
    pub fn fail(&mut self) -> Result<(), CoreError> {
        match self.state {
            UploadState::InProgress { .. } => {
                self.state = UploadState::Failed;
                Ok(())
            }
            other => Err(CoreError::InvalidTransition(other.name())),
        }
    }

    /// Stops a running upload. Staged records stay for another attempt.
    ///
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_in_progress() {
            self.state = UploadState::Cancelled;
            true
        } else {
            false
        }
    }
}
