/// Global UI flags shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub is_global_loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ShowGlobalLoading,
    HideGlobalLoading,
}

pub fn reduce(_state: UiState, event: UiEvent) -> UiState {
    match event {
        UiEvent::ShowGlobalLoading => UiState {
            is_global_loading: true,
        },
        UiEvent::HideGlobalLoading => UiState {
            is_global_loading: false,
        },
    }
}

impl UiState {
    pub fn show_global_loading(self) -> Self {
        reduce(self, UiEvent::ShowGlobalLoading)
    }

    pub fn hide_global_loading(self) -> Self {
        reduce(self, UiEvent::HideGlobalLoading)
    }
}
