// Back-signal handling - pure history ledger + the Tauri command that
// receives forwarded back input from the surface.
//
// Desktop webviews do not expose the engine's back-capability directly,
// so the shell keeps its own ledger of top-level loads and steps it in
// lockstep with the history.back() calls it issues.

use tauri::{AppHandle, Manager};

use crate::state::AppState;

/// Shell-side ledger of the surface's navigation history.
#[derive(Debug, Default)]
pub struct BackStack {
    entries: Vec<String>,
    // Counts shell-issued history.back() calls still in flight so the
    // loads they cause are not recorded as fresh entries. Queued back
    // presses can put more than one in flight at once.
    pending_backs: usize,
}

impl BackStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished top-level load.
    ///
    /// Reloads of the current page and loads caused by our own back-steps
    /// leave the ledger depth unchanged.
    pub fn record_load(&mut self, url: &str) {
        if self.pending_backs > 0 {
            self.pending_backs -= 1;
            if let Some(current) = self.entries.last_mut() {
                // Resync in case the engine landed somewhere other than
                // the entry we popped back to (redirects, mostly).
                *current = url.to_string();
            }
            return;
        }

        if self.entries.last().map(String::as_str) == Some(url) {
            return;
        }

        self.entries.push(url.to_string());
    }

    /// True when the surface has a page behind the current one.
    pub fn can_step_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Consume one back step. Returns false (and changes nothing) when
    /// history is already at its first entry.
    pub fn step_back(&mut self) -> bool {
        if !self.can_step_back() {
            return false;
        }

        self.entries.pop();
        self.pending_backs += 1;
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

/// Run the back-signal decision: step the ledger and the surface
/// together. Returns true when the signal was consumed.
///
/// Shared by the `navigate_back` command (keyboard / mouse back) and the
/// window close-request handler, so both inputs behave identically.
pub fn consume_back_signal(app: &AppHandle) -> bool {
    let state = app.state::<AppState>();
    let stepped = state.back_stack.lock().unwrap().step_back();

    if stepped {
        if let Some(webview) = app.get_webview_window("main") {
            log::debug!("[Back] stepping surface history");
            let _ = webview.eval("window.history.back()");
        }
    }

    stepped
}

/// Forwarded back input from the surface. Steps history when there is
/// somewhere to go; otherwise falls through to default dismissal and
/// closes the shell window.
#[tauri::command]
pub fn navigate_back(app: AppHandle) -> Result<bool, String> {
    if consume_back_signal(&app) {
        return Ok(true);
    }

    log::debug!("[Back] history empty, dismissing shell");
    if let Some(window) = app.get_webview_window("main") {
        window.close().map_err(|e| e.to_string())?;
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_does_not_consume() {
        let mut stack = BackStack::new();

        assert!(!stack.can_step_back());
        assert!(!stack.step_back());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_single_entry_is_the_floor() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");

        assert!(!stack.can_step_back());
        assert!(!stack.step_back());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Some("https://tscireland.com/"));
    }

    #[test]
    fn test_back_steps_one_entry_and_consumes() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/menu");

        assert!(stack.can_step_back());
        assert!(stack.step_back());
        assert_eq!(stack.current(), Some("https://tscireland.com/"));
    }

    #[test]
    fn test_back_step_load_is_not_re_recorded() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/menu");

        assert!(stack.step_back());
        // The load our own back-step caused.
        stack.record_load("https://tscireland.com/");

        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_step_back());
    }

    #[test]
    fn test_reload_does_not_grow_history() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/");

        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_back_landing_on_redirect_resyncs_current() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/contact");

        assert!(stack.step_back());
        stack.record_load("https://www.tscireland.com/");

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Some("https://www.tscireland.com/"));
    }

    #[test]
    fn test_repeated_back_stops_at_the_floor() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/a");
        stack.record_load("https://tscireland.com/b");

        assert!(stack.step_back());
        stack.record_load("https://tscireland.com/a");
        assert!(stack.step_back());
        stack.record_load("https://tscireland.com/");

        assert!(!stack.step_back());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_queued_back_presses_do_not_grow_ledger() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/a");
        stack.record_load("https://tscireland.com/b");

        // Second press arrives before the first back-landing loads.
        assert!(stack.step_back());
        assert!(stack.step_back());

        // The two back-landings settle in order.
        stack.record_load("https://tscireland.com/a");
        stack.record_load("https://tscireland.com/");

        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_step_back());
        assert_eq!(stack.current(), Some("https://tscireland.com/"));
    }

    #[test]
    fn test_queued_back_press_past_the_floor_falls_through() {
        let mut stack = BackStack::new();
        stack.record_load("https://tscireland.com/");
        stack.record_load("https://tscireland.com/a");

        assert!(stack.step_back());
        // Pressed again before the landing: nothing left to consume.
        assert!(!stack.step_back());

        stack.record_load("https://tscireland.com/");
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Some("https://tscireland.com/"));
    }
}
