/// State store that owns the current snapshot and its persistence
///
/// The store is the only place where effects happen: it loads the snapshot
/// once when opened and writes it back after every command that changed it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::state::{reduce, AppState, Command};
use crate::storage::StateStorage;
use crate::AppError;

/// Owns the current AppState and persists it through a StateStorage
pub struct StateStore<S: StateStorage> {
    storage: S,
    state: AppState,
}

impl<S: StateStorage> StateStore<S> {
    /// Open the store, loading the persisted snapshot or starting fresh
    pub fn open(storage: S, today: NaiveDate) -> Result<Self, AppError> {
        let state = match storage.load_state()? {
            Some(state) => {
                info!(
                    "Loaded state with {} habits and {} journal entries",
                    state.habits.len(),
                    state.journal_entries.len()
                );
                state
            }
            None => {
                info!("No saved state found, starting fresh");
                AppState::new(today)
            }
        };

        Ok(Self { storage, state })
    }

    /// Current snapshot
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply a command, persisting the result if anything changed
    pub fn dispatch(&mut self, command: Command) -> Result<&AppState, AppError> {
        self.dispatch_at(command, Utc::now())
    }

    /// Like `dispatch`, with an explicit timestamp for created/updated fields
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Utc>) -> Result<&AppState, AppError> {
        let name = command.name();
        let next = reduce(&self.state, command, now)?;

        if next == self.state {
            debug!("Command {} left the state unchanged", name);
            return Ok(&self.state);
        }

        // Only adopt the new snapshot once it is safely stored.
        self.storage.save_state(&next)?;
        self.state = next;
        debug!("Command {} applied and persisted", name);
        Ok(&self.state)
    }
}
