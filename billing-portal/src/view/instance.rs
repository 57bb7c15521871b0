//! A mounted billing view.
//!
//! Mounting spawns the single fetch for this instance and publishes the view
//! state through a watch channel; hosts subscribe and re-render on change.
//! Dropping the view cancels the fetch, and a fetch that completes after
//! teardown never touches the state.

use crate::render::{Layout, Renderer};
use crate::services::BillingLoader;
use crate::view::ViewState;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub struct BillingView {
    state: watch::Receiver<ViewState>,
    cancel: CancellationToken,
}

impl BillingView {
    /// Start the one fetch of this instance. Must be called inside a tokio runtime.
    pub fn mount(loader: BillingLoader) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);
        let cancel = CancellationToken::new();
        let alive = cancel.clone();

        tracing::debug!(source = %loader.location(), "Mounting billing view");

        tokio::spawn(async move {
            tokio::select! {
                _ = alive.cancelled() => {
                    tracing::debug!("Billing view torn down before fetch settled");
                }
                outcome = loader.load() => {
                    let published = tx.send_if_modified(|state| {
                        !alive.is_cancelled() && state.settle(outcome)
                    });
                    if !published {
                        tracing::debug!("Discarded billing fetch outcome for a torn-down view");
                    }
                }
            }
        });

        Self { state: rx, cancel }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified when the state settles.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait until the fetch settles. Returns the last published state if the
    /// fetch task ended without settling (teardown).
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.state.clone();
        let result = rx.wait_for(ViewState::is_settled).await.map(|s| ViewState::clone(&s));
        match result {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Like [`settled`](Self::settled) but gives up after `limit`, returning
    /// whatever is current (usually `Loading`).
    pub async fn settled_within(&self, limit: Duration) -> ViewState {
        match tokio::time::timeout(limit, self.settled()).await {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Render the current state.
    pub fn render(&self, renderer: &Renderer) -> Layout {
        renderer.render(&self.state.borrow())
    }

    /// Tear the view down. Equivalent to dropping it.
    pub fn unmount(self) {}
}

impl Drop for BillingView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
