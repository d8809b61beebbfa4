//! Browser driver for timer-backed views
//!
//! The wizard, chat and offer inbox only record when their deferred work is
//! due. [`drive`] polls the view on a short interval for as long as the
//! calling component is mounted and fires whatever is due; unmounting
//! drops the interval, so nothing fires after the page is left.

use gloo_timers::callback::Interval;
use homehelp_core::ViewClock;
use leptos::prelude::*;
use std::time::Duration;

const TICK_MS: u32 = 200;

/// Elapsed time since a page mounted.
#[derive(Debug, Clone, Copy)]
pub struct PageClock {
    started_at: f64,
}

impl PageClock {
    pub fn start() -> Self {
        Self {
            started_at: js_sys::Date::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        let millis = (js_sys::Date::now() - self.started_at).max(0.0);
        Duration::from_millis(millis as u64)
    }
}

/// Advance `view` while the current component lives. Returns the page clock
/// callers should pass as `now` to the view's own operations.
pub fn drive<V>(view: RwSignal<V>) -> PageClock
where
    V: ViewClock + Send + Sync + 'static,
{
    let clock = PageClock::start();
    let interval = Interval::new(TICK_MS, move || {
        let now = clock.elapsed();
        let due = view
            .try_with_untracked(|v| v.next_due().is_some_and(|at| at <= now))
            .unwrap_or(false);
        if due {
            view.update(|v| {
                v.advance(now);
            });
        }
    });

    let handle = StoredValue::new_local(Some(interval));
    on_cleanup(move || {
        // Dropping an Interval clears it
        handle.update_value(|interval| {
            interval.take();
        });
    });
    clock
}
