use crate::store::ScanContext;
use common::model::product::ScanResult;

pub enum Msg {
    UpdateInput(String),
    Submit,
    /// Show a history entry as the current scan.
    Select(ScanResult),
    ClearCurrent,
    ReloadHistory,
    ContextChanged(ScanContext),
}
