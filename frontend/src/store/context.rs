//! Context value shared by every view below `App`.
//!
//! Views never touch the `ScanStore` directly. They read the snapshot carried
//! here and send [`ScanAction`]s back through `actions`; `App` applies them
//! and provides a fresh context.

use common::model::product::ScanPayload;
use common::store::scan::ScanState;
use common::store::ui::UiState;
use std::rc::Rc;
use yew::Callback;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanAction {
    /// Look a barcode up through the proxy.
    Fetch(String),
    SetCurrent(Option<ScanPayload>),
    ClearCurrent,
    ReloadHistory,
}

#[derive(Clone, PartialEq)]
pub struct ScanContext {
    pub scan: Rc<ScanState>,
    pub ui: UiState,
    pub actions: Callback<ScanAction>,
}

impl ScanContext {
    pub fn dispatch(&self, action: ScanAction) {
        self.actions.emit(action);
    }
}
