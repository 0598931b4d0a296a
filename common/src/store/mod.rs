//! Client-side state holders.
//!
//! - `scan`: current product and deduplicated scan history.
//! - `storage`: key-value persistence used by the scan history.
//! - `ui`: global loading indicator.

pub mod scan;
pub mod storage;
pub mod ui;
