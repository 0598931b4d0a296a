use crate::store::ScanContext;
use yew::context::ContextHandle;

pub struct Scanner {
    /// Raw text of the barcode input.
    pub input: String,

    /// Local validation message for `input`, cleared on the next edit.
    pub input_error: Option<String>,

    /// Latest context received from `App`. `None` when rendered outside of it.
    pub context: Option<ScanContext>,

    _subscription: Option<ContextHandle<ScanContext>>,
}

impl Scanner {
    pub fn new(subscription: Option<(ScanContext, ContextHandle<ScanContext>)>) -> Self {
        let (context, handle) = match subscription {
            Some((context, handle)) => (Some(context), Some(handle)),
            None => (None, None),
        };
        Self {
            input: String::new(),
            input_error: None,
            context,
            _subscription: handle,
        }
    }
}
