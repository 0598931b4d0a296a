use super::messages::Msg;
use super::state::Scanner;
use crate::api::check_barcode;
use crate::store::ScanAction;
use common::model::product::ScanPayload;

/// Applies `msg` to the panel. Store changes are forwarded to `App`, which
/// answers with a new context; only local edits re-render here directly.
pub fn update(scanner: &mut Scanner, msg: Msg) -> bool {
    match msg {
        Msg::UpdateInput(value) => {
            scanner.input = value;
            scanner.input_error = None;
            true
        }
        Msg::Submit => match check_barcode(&scanner.input) {
            Ok(()) => {
                send(scanner, ScanAction::Fetch(scanner.input.trim().to_string()));
                false
            }
            Err(message) => {
                scanner.input_error = Some(message);
                true
            }
        },
        Msg::Select(scan) => {
            send(scanner, ScanAction::SetCurrent(Some(ScanPayload::from(scan))));
            false
        }
        Msg::ClearCurrent => {
            send(scanner, ScanAction::ClearCurrent);
            false
        }
        Msg::ReloadHistory => {
            send(scanner, ScanAction::ReloadHistory);
            false
        }
        Msg::ContextChanged(context) => {
            scanner.context = Some(context);
            true
        }
    }
}

fn send(scanner: &Scanner, action: ScanAction) {
    if let Some(context) = &scanner.context {
        context.dispatch(action);
    }
}
