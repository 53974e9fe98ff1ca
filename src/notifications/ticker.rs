// SPDX-License-Identifier: MPL-2.0
//! Tick loop driving a single toast's countdown.
//!
//! The loop is a `spawn_local` task on the current [`tokio::task::LocalSet`]
//! that fires every period until its callback breaks. Dropping (or
//! cancelling) the [`TickLoop`] aborts the task, so no tick can fire after
//! the owning toast is gone.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Handle to a running tick task.
#[derive(Debug)]
pub(crate) struct TickLoop {
    handle: JoinHandle<()>,
}

impl TickLoop {
    /// Spawns the loop. The first tick fires immediately.
    ///
    /// # Panics
    ///
    /// Panics when called outside a `LocalSet` context.
    pub(crate) fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + 'static,
    {
        let handle = tokio::task::spawn_local(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stops the loop. Equivalent to dropping the handle.
    pub(crate) fn cancel(self) {
        drop(self);
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn ticks_at_fixed_period_until_break() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let count = Rc::new(Cell::new(0_u32));
                let seen = Rc::clone(&count);
                let ticker = TickLoop::spawn(Duration::from_millis(50), move || {
                    seen.set(seen.get() + 1);
                    if seen.get() == 3 {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                });

                time::sleep(Duration::from_millis(500)).await;
                assert_eq!(count.get(), 3);
                assert!(ticker.is_finished());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_further_ticks() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let count = Rc::new(Cell::new(0_u32));
                let seen = Rc::clone(&count);
                let ticker = TickLoop::spawn(Duration::from_millis(50), move || {
                    seen.set(seen.get() + 1);
                    ControlFlow::Continue(())
                });

                time::sleep(Duration::from_millis(120)).await;
                let before = count.get();
                assert!(before >= 2);
                ticker.cancel();

                time::sleep(Duration::from_millis(500)).await;
                assert_eq!(count.get(), before);
            })
            .await;
    }
}
