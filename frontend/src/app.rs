//! Root component. Owns the scan store and the UI flags and publishes them
//! to the rest of the tree as a [`ScanContext`].

use crate::api;
use crate::scanner::Scanner;
use crate::store::{LocalStorage, ScanAction, ScanContext};
use common::model::product::ScanPayload;
use common::store::scan::{FetchTicket, ScanStore};
use common::store::ui::UiState;
use gloo_console as console;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Action(ScanAction),
    Fetched {
        ticket: FetchTicket,
        outcome: Result<ScanPayload, String>,
    },
}

pub struct App {
    store: ScanStore<LocalStorage>,
    ui: UiState,
    context: ScanContext,
}

impl App {
    /// Rebuilds the published context from the store and logs any storage
    /// failure the last transition produced.
    fn publish(&mut self) {
        if let Some(e) = self.store.take_storage_error() {
            console::error!(format!("Scan history storage error: {}", e));
        }
        self.context = ScanContext {
            scan: Rc::new(self.store.state().clone()),
            ui: self.ui,
            actions: self.context.actions.clone(),
        };
    }

    fn apply(&mut self, ctx: &Context<Self>, action: ScanAction) {
        match action {
            ScanAction::Fetch(barcode) => {
                self.ui = self.ui.show_global_loading();
                let ticket = self.store.begin_fetch();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let outcome = api::find_product(&barcode).await;
                    link.send_message(Msg::Fetched { ticket, outcome });
                });
            }
            ScanAction::SetCurrent(scan) => self.store.set_current_scan(scan),
            ScanAction::ClearCurrent => self.store.clear_current_scan(),
            ScanAction::ReloadHistory => self.store.load_history_from_storage(),
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let store = ScanStore::new(LocalStorage);
        let ui = UiState::default();
        let context = ScanContext {
            scan: Rc::new(store.state().clone()),
            ui,
            actions: ctx.link().callback(Msg::Action),
        };
        let mut app = Self { store, ui, context };
        app.publish();
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Action(action) => self.apply(ctx, action),
            Msg::Fetched { ticket, outcome } => {
                self.store.finish_fetch(ticket, outcome);
                // A newer lookup may still be running.
                if !self.store.state().is_loading {
                    self.ui = self.ui.hide_global_loading();
                }
            }
        }
        self.publish();
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <ContextProvider<ScanContext> context={self.context.clone()}>
                <main class="app-root">
                    if self.ui.is_global_loading {
                        <div class="global-loading">{"Loading..."}</div>
                    }
                    <Scanner />
                </main>
            </ContextProvider<ScanContext>>
        }
    }
}
