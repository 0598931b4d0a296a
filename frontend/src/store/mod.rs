//! Browser bindings for the shared stores in `common::store`.
//!
//! - `local_storage`: `window.localStorage` as the history backend.
//! - `context`: the snapshot and action callback handed to views.

pub mod context;
pub mod local_storage;

pub use context::{ScanAction, ScanContext};
pub use local_storage::LocalStorage;
