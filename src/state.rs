// Shared state structs to avoid circular dependencies.
// Managed by Tauri in run(); the back ledger is reached from both the
// command path and the window-event path.

use std::sync::Mutex;

use crate::connectivity::NetworkStatus;
use crate::modules::backstack::BackStack;

pub struct AppState {
    pub back_stack: Mutex<BackStack>,
    /// Connectivity snapshot taken at startup, kept for diagnostics.
    pub network: NetworkStatus,
}

impl AppState {
    pub fn new(network: NetworkStatus) -> Self {
        Self {
            back_stack: Mutex::new(BackStack::new()),
            network,
        }
    }
}
