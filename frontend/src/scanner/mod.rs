//! Scanner panel: barcode entry, the current product card and the scan
//! history list.
//!
//! The panel reads everything from the [`ScanContext`] provided by `App` and
//! only keeps the text of the barcode input locally. Lookups, selection from
//! history and clearing are sent back to `App` as `ScanAction`s.

use crate::store::ScanContext;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::Scanner;

impl Component for Scanner {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let subscription = ctx
            .link()
            .context::<ScanContext>(ctx.link().callback(Msg::ContextChanged));
        Scanner::new(subscription)
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
