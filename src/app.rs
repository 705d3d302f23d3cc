use falcon_flights::{DataSourceState, LaunchItem};
use ratatui::widgets::ListState;

use crate::events::AppMsg;

/// Rows from the end of the list at which the next page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 3;

pub struct App {
    /// Latest snapshot published by the data source.
    pub state: DataSourceState<LaunchItem>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Set when the UI wants the next page; drained by the main loop.
    load_requested: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: DataSourceState::default(),
            list_state: ListState::default(),
            quit: false,
            // The first page is requested as soon as the list appears.
            load_requested: true,
        }
    }

    pub fn items(&self) -> &[LaunchItem] {
        self.state.items()
    }

    pub fn handle_msg(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::State(state) => {
                self.state = state;
                if self.list_state.selected().is_none() && !self.items().is_empty() {
                    self.list_state.select(Some(0));
                }
            }
        }
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        let count = self.items().len();
        if self.state.is_loading {
            "Loading…".into()
        } else if self.state.last_request_failed {
            "Request failed, press r to retry".into()
        } else if self.state.is_exhausted() {
            format!("All {count} launches loaded")
        } else {
            format!("{count} launches")
        }
    }

    // -- paging -------------------------------------------------------------

    /// Ask for the next page (retry, or load more).
    pub fn request_load(&mut self) {
        self.load_requested = true;
    }

    /// Returns and clears the pending load request.
    pub fn take_load_request(&mut self) -> bool {
        std::mem::take(&mut self.load_requested)
    }

    /// Request the next page when the selection nears the end of the list.
    ///
    /// Failures are not retried from scrolling; the user has to ask.
    fn load_if_near_end(&mut self) {
        let len = self.items().len();
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        if self.state.last_request_failed || self.state.is_exhausted() {
            return;
        }
        if selected + LOAD_MORE_THRESHOLD >= len {
            self.request_load();
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.items().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.items().len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.load_if_near_end();
    }

    pub fn select_previous(&mut self) {
        if self.items().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items().is_empty() {
            self.list_state.select(Some(self.items().len() - 1));
            self.load_if_near_end();
        }
    }
}
