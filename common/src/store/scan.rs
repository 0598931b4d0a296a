//! Scan store: the most recent scan plus a deduplicated, persisted history.
//!
//! State changes go through [`reduce`], a pure `(state, event) -> (state, effect)`
//! function. [`ScanStore`] owns a state value and a storage backend, feeds
//! events through `reduce` and performs the returned [`Effect`]s. The
//! frontend keeps one `ScanStore` in its root component and hands views a
//! snapshot through a yew context.
//!
//! A product fetch is split in two events so the network call can happen
//! outside the store: [`ScanStore::begin_fetch`] hands out a [`FetchTicket`]
//! and [`ScanStore::finish_fetch`] applies the outcome. Only the most
//! recently started fetch may complete; outcomes carrying an older ticket are
//! dropped.

use crate::model::product::{ScanPayload, ScanResult};
use crate::store::storage::{load_history, save_history, KeyValueStorage, StorageError};

/// Identifies one started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanState {
    /// Product currently on screen, if any.
    pub current_scan: Option<ScanResult>,
    /// Newest first, at most one entry per barcode.
    pub scan_history: Vec<ScanResult>,
    pub is_loading: bool,
    /// Message of the last failed fetch. Reset when a new fetch starts.
    pub error: Option<String>,
    latest_fetch: Option<FetchTicket>,
}

impl ScanState {
    pub fn new(scan_history: Vec<ScanResult>) -> Self {
        Self {
            scan_history,
            ..Self::default()
        }
    }

    pub fn has_current_scan(&self) -> bool {
        self.current_scan.is_some()
    }

    pub fn has_scan_history(&self) -> bool {
        !self.scan_history.is_empty()
    }

    fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.latest_fetch == Some(ticket)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    FetchStarted(FetchTicket),
    FetchSucceeded(FetchTicket, ScanPayload),
    FetchFailed(FetchTicket, String),
    SetCurrent(Option<ScanPayload>),
    Clear,
    HistoryLoaded(Vec<ScanResult>),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistHistory,
}

pub fn reduce(mut state: ScanState, event: ScanEvent) -> (ScanState, Effect) {
    match event {
        ScanEvent::FetchStarted(ticket) => {
            state.is_loading = true;
            state.error = None;
            state.latest_fetch = Some(ticket);
            (state, Effect::None)
        }
        ScanEvent::FetchSucceeded(ticket, payload) => {
            if !state.is_latest(ticket) {
                return (state, Effect::None);
            }
            state.is_loading = false;
            reduce(state, ScanEvent::SetCurrent(Some(payload)))
        }
        ScanEvent::FetchFailed(ticket, message) => {
            if state.is_latest(ticket) {
                state.is_loading = false;
                state.error = Some(message);
            }
            (state, Effect::None)
        }
        ScanEvent::SetCurrent(None) | ScanEvent::Clear => {
            state.current_scan = None;
            (state, Effect::None)
        }
        ScanEvent::SetCurrent(Some(payload)) => {
            let scan = payload.normalize();
            let known = state
                .scan_history
                .iter()
                .any(|item| item.barcode == scan.barcode);
            state.current_scan = Some(scan.clone());
            if known {
                (state, Effect::None)
            } else {
                state.scan_history.insert(0, scan);
                (state, Effect::PersistHistory)
            }
        }
        ScanEvent::HistoryLoaded(history) => {
            state.scan_history = history;
            (state, Effect::None)
        }
    }
}

/// Handle that owns the scan state and its persistence backend.
pub struct ScanStore<S: KeyValueStorage> {
    state: ScanState,
    storage: S,
    next_ticket: u64,
    storage_error: Option<StorageError>,
}

impl<S: KeyValueStorage> ScanStore<S> {
    /// Creates the store, loading history from `storage`. Unreadable history
    /// starts the store empty; the error is kept for [`Self::take_storage_error`].
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            state: ScanState::default(),
            storage,
            next_ticket: 0,
            storage_error: None,
        };
        store.load_history_from_storage();
        store
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn has_current_scan(&self) -> bool {
        self.state.has_current_scan()
    }

    pub fn has_scan_history(&self) -> bool {
        self.state.has_scan_history()
    }

    /// Marks a fetch as in flight and returns the ticket its outcome must carry.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.dispatch(ScanEvent::FetchStarted(ticket));
        ticket
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, outcome: Result<ScanPayload, String>) {
        let event = match outcome {
            Ok(payload) => ScanEvent::FetchSucceeded(ticket, payload),
            Err(message) => ScanEvent::FetchFailed(ticket, message),
        };
        self.dispatch(event);
    }

    pub fn set_current_scan(&mut self, scan: Option<ScanPayload>) {
        self.dispatch(ScanEvent::SetCurrent(scan));
    }

    pub fn clear_current_scan(&mut self) {
        self.dispatch(ScanEvent::Clear);
    }

    pub fn load_history_from_storage(&mut self) {
        let history = match load_history(&self.storage) {
            Ok(history) => history,
            Err(e) => {
                self.storage_error = Some(e);
                Vec::new()
            }
        };
        self.dispatch(ScanEvent::HistoryLoaded(history));
    }

    /// Returns (and forgets) the last storage failure, if any.
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    fn dispatch(&mut self, event: ScanEvent) {
        let (next, effect) = reduce(std::mem::take(&mut self.state), event);
        self.state = next;
        if effect == Effect::PersistHistory {
            if let Err(e) = save_history(&self.storage, &self.state.scan_history) {
                self.storage_error = Some(e);
            }
        }
    }
}
