//! The entry store and its transition function.

use std::sync::Arc;

use tracker_domain::{Draft, EditSession, Entry, EntryKind, StoreState};
use uuid::Uuid;

use crate::{
    summary::Summary,
    time::{Clock, SystemClock, DEFAULT_TIMESTAMP_FORMAT},
    Action, CoreError,
};

/// Inputs the reducer needs from outside the state value.
pub struct ReduceContext<'a> {
    pub clock: &'a dyn Clock,
    pub timestamp_format: &'a str,
}

/// Outcome of an accepted dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub entries_changed: bool,
}

/// Computes the state that follows `state` under `action`.
///
/// Errors leave no partial state behind: the caller keeps `state` as is.
pub fn reduce(
    state: &StoreState,
    action: Action,
    ctx: &ReduceContext<'_>,
) -> Result<StoreState, CoreError> {
    let mut next = state.clone();
    match action {
        Action::SetDraftKind(kind) => next.draft.kind = kind,
        Action::SetDraftDescription(text) => next.draft.description = text,
        Action::SetDraftAmount(amount) => next.draft.amount = amount,
        Action::AddEntry => {
            validate_fields(&state.draft.description, state.draft.amount)?;
            let mut id = Uuid::new_v4();
            while state.contains(id) {
                id = Uuid::new_v4();
            }
            let entry = Entry::new(
                state.draft.kind,
                state.draft.description.clone(),
                state.draft.amount,
                ctx.clock.stamp(ctx.timestamp_format),
            )
            .with_id(id);
            next.entries.push(entry);
            next.draft.reset();
        }
        Action::DeleteEntry(id) => {
            if state.is_editing() {
                return Err(CoreError::EditInProgress);
            }
            next.entries.retain(|entry| entry.id != id);
        }
        Action::OpenEditMode {
            id,
            description,
            amount,
        } => {
            if state.is_editing() {
                return Err(CoreError::EditInProgress);
            }
            next.edit_session = Some(EditSession::new(id, description, amount));
        }
        Action::UpdateEditSession(field) => {
            next.edit_session
                .as_mut()
                .ok_or(CoreError::NoEditSession)?
                .apply(field);
        }
        Action::CommitEdit {
            description,
            amount,
        } => {
            let session = state.edit_session.as_ref().ok_or(CoreError::NoEditSession)?;
            validate_fields(&description, amount)?;
            if let Some(entry) = next
                .entries
                .iter_mut()
                .find(|entry| entry.id == session.entry_id)
            {
                entry.description = description;
                entry.amount = amount;
            }
            next.edit_session = None;
        }
        Action::CloseEditMode => next.edit_session = None,
    }
    Ok(next)
}

/// Rejects an empty description or a zero amount. Non-finite amounts are
/// rejected as well since they cannot be totalled.
fn validate_fields(description: &str, amount: f64) -> Result<(), CoreError> {
    if description.is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    if amount == 0.0 || !amount.is_finite() {
        return Err(CoreError::Validation("amount must be a non-zero number".into()));
    }
    Ok(())
}

/// Owns the authoritative [`StoreState`] and applies actions to it.
pub struct EntryStore {
    state: StoreState,
    clock: Arc<dyn Clock>,
    timestamp_format: String,
}

impl EntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self::with_clock(entries, Arc::new(SystemClock))
    }

    pub fn with_clock(entries: Vec<Entry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: StoreState::with_entries(entries),
            clock,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Preselects the kind of the new-entry form.
    pub fn with_draft_kind(mut self, kind: EntryKind) -> Self {
        self.state.draft = Draft::with_kind(kind);
        self
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary::from_entries(&self.state.entries)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Transition, CoreError> {
        let tag = action.tag();
        let ctx = ReduceContext {
            clock: self.clock.as_ref(),
            timestamp_format: &self.timestamp_format,
        };
        let next = match reduce(&self.state, action, &ctx) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(action = tag, error = %err, "action rejected");
                return Err(err);
            }
        };
        let entries_changed = next.entries != self.state.entries;
        self.state = next;
        tracing::debug!(
            action = tag,
            entries = self.state.entries.len(),
            entries_changed,
            editing = self.state.is_editing(),
            "action applied"
        );
        Ok(Transition { entries_changed })
    }
}
