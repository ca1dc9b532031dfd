//! Deferred-event handling.
//!
//! Applies `AppEvent`s sent back by the timers the jump sequence spawns.

use crate::app::{App, AppEvent};
use tokio::sync::mpsc;

pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::JumpSettled { generation, target } => {
            app.settle_jump(generation, target, event_tx);
        }
        AppEvent::HighlightExpired { generation } => {
            app.expire_highlight(generation);
        }
    }
}
