//! Interval polling of a deploy's execution status.
//!
//! One background task per watched deploy. Each tick issues a single status
//! request and waits for it before the next tick can fire, so at most one
//! request is ever outstanding. The task stops for good on the first
//! terminal status, or when the watcher is cancelled or dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use casperflow_types::{DeployHash, DeployStatus};

use crate::client::ChainClient;
use crate::transport::RpcTransport;

/// Handle to a running status poller.
///
/// Dropping the handle cancels the poller, so a consumer that goes away
/// stops the background requests with it.
pub struct DeployWatcher {
    deploy: DeployHash,
    status_rx: watch::Receiver<DeployStatus>,
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<DeployStatus>>,
}

impl DeployWatcher {
    /// Start polling `deploy` every `interval`.
    ///
    /// The first request goes out one interval after the call.
    pub fn spawn<T>(client: Arc<ChainClient<T>>, deploy: DeployHash, interval: Duration) -> Self
    where
        T: RpcTransport + 'static,
    {
        let (status_tx, status_rx) = watch::channel(DeployStatus::Pending);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let polled = deploy.clone();
        let task = tokio::spawn(async move {
            poll_until_terminal(&client, &polled, interval, status_tx, cancel_rx).await
        });

        Self {
            deploy,
            status_rx,
            cancel_tx,
            task: Some(task),
        }
    }

    pub fn deploy(&self) -> &DeployHash {
        &self.deploy
    }

    /// Most recently observed status.
    pub fn status(&self) -> DeployStatus {
        *self.status_rx.borrow()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<DeployStatus> {
        self.status_rx.clone()
    }

    /// Stop polling. No request is issued after this returns, although one
    /// already in flight is abandoned rather than awaited.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// Wait for the poller to finish and return its final status: the
    /// terminal status, or the last observed one if cancelled.
    pub async fn wait(mut self) -> DeployStatus {
        match self.task.take() {
            Some(task) => match task.await {
                Ok(status) => status,
                Err(e) => {
                    warn!(deploy = %self.deploy, "status poller task failed: {e}");
                    self.status()
                }
            },
            None => self.status(),
        }
    }
}

impl Drop for DeployWatcher {
    fn drop(&mut self) {
        self.cancel_tx.send_replace(true);
    }
}

/// Poll `deploy` until a terminal status is seen or `cancel` fires.
///
/// Every observed status is published on `status_tx`. Returns the terminal
/// status, or the last published one when cancelled.
pub async fn poll_until_terminal<T: RpcTransport>(
    client: &ChainClient<T>,
    deploy: &DeployHash,
    interval: Duration,
    status_tx: watch::Sender<DeployStatus>,
    mut cancel: watch::Receiver<bool>,
) -> DeployStatus {
    let period = interval.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if *cancel.borrow() {
        return *status_tx.borrow();
    }

    loop {
        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                debug!(%deploy, "status polling cancelled");
                return *status_tx.borrow();
            }
            _ = ticker.tick() => {}
        }

        let status = tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                debug!(%deploy, "status polling cancelled mid-request");
                return *status_tx.borrow();
            }
            status = client.deploy_status(deploy) => status,
        };

        status_tx.send_replace(status);
        if status.is_terminal() {
            info!(%deploy, %status, "deploy reached terminal status");
            return status;
        }
    }
}

/// Resolves once cancellation is requested or the cancelling side is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            return;
        }
    }
}
