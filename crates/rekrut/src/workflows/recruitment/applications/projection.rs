//! Explicit two-phase stage edit: project the change locally for immediate
//! display, fire the remote command, then reconcile against its result. The
//! caller never mutates its cached record in place, so a failed command
//! rolls back to the exact pre-edit snapshot.

use crate::workflows::recruitment::domain::{StageName, StageStatus};
use crate::workflows::recruitment::pipeline;

use super::domain::Application;

/// The edit was attempted on a stage the unlock rule still gates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stage '{stage}' is locked until the preceding stage is passed")]
pub struct StageLockedError {
    pub stage: StageName,
}

/// In-flight optimistic edit of one stage status.
#[derive(Debug, Clone)]
pub struct OptimisticStageUpdate {
    original: Application,
    projected: Application,
}

impl OptimisticStageUpdate {
    /// Capture the pre-edit snapshot and apply the local projection. The
    /// same unlock gate the service enforces applies here, so the local
    /// display can never project an edit the backend would refuse.
    pub fn begin(
        application: &Application,
        name: StageName,
        status: StageStatus,
    ) -> Result<Self, StageLockedError> {
        if !pipeline::is_stage_unlocked(name, &application.stages) {
            return Err(StageLockedError { stage: name });
        }

        let mut projected = application.clone();
        projected.set_stage_status(name, status);

        Ok(Self {
            original: application.clone(),
            projected,
        })
    }

    /// The record to display while the remote command is in flight.
    pub fn projected(&self) -> &Application {
        &self.projected
    }

    /// Fold in the remote command's result. Success adopts the server's
    /// record wholesale (it is authoritative and may differ from the
    /// projection); failure restores the pre-edit snapshot.
    pub fn reconcile<E>(self, remote: Result<Application, E>) -> ReconcileOutcome<E> {
        match remote {
            Ok(application) => ReconcileOutcome::Confirmed(application),
            Err(error) => ReconcileOutcome::Reverted {
                application: self.original,
                error,
            },
        }
    }
}

/// Result of reconciling an optimistic edit.
#[derive(Debug)]
pub enum ReconcileOutcome<E> {
    Confirmed(Application),
    Reverted { application: Application, error: E },
}

impl<E> ReconcileOutcome<E> {
    /// The record the cache should hold after reconciliation.
    pub fn application(&self) -> &Application {
        match self {
            ReconcileOutcome::Confirmed(application) => application,
            ReconcileOutcome::Reverted { application, .. } => application,
        }
    }
}
