//! Runs route queries off the caller's thread.
//!
//! [`PathExecutor::submit`] accepts any algorithm invocation, runs it on tokio's
//! blocking pool and hands back a [`PathHandle`]. Results and failures travel through
//! the same [`Result`](crate::Result) type as synchronous calls. A [`CancelToken`]
//! makes a pending handle resolve to [`Error::Cancelled`](crate::Error::Cancelled).

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::algorithm::{PathResult, RouteQuery};
use crate::graph::Graph;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation signal shared between a caller and a submitted query
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Completes once [`cancel`](Self::cancel) has been called
    pub async fn cancelled(&self) {
        loop {
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Pending result of a submitted query
#[derive(Debug)]
pub struct PathHandle {
    id: Uuid,
    task: JoinHandle<Result<PathResult>>,
    cancel: Option<CancelToken>,
}

impl PathHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the outcome of the query
    pub async fn result(self) -> Result<PathResult> {
        let PathHandle { id, task, cancel } = self;

        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Query {} cancelled while pending", id);
                        Err(Error::Cancelled)
                    }
                    joined = task => {
                        if token.is_cancelled() {
                            Err(Error::Cancelled)
                        } else {
                            flatten_join(id, joined)
                        }
                    }
                }
            }
            None => flatten_join(id, task.await),
        }
    }
}

fn flatten_join(
    id: Uuid,
    joined: std::result::Result<Result<PathResult>, tokio::task::JoinError>,
) -> Result<PathResult> {
    match joined {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("Query {} worker failed: {}", id, err);
            Err(Error::Worker(err.to_string()))
        }
    }
}

/// Algorithm-agnostic façade that moves route computations onto worker threads
#[derive(Debug, Clone)]
pub struct PathExecutor {
    runtime: Handle,
}

impl PathExecutor {
    /// Creates an executor on the given runtime
    pub fn new(runtime: Handle) -> Self {
        PathExecutor { runtime }
    }

    /// Creates an executor on the runtime of the calling context.
    ///
    /// Panics when called outside a tokio runtime, like [`Handle::current`].
    pub fn current() -> Self {
        PathExecutor::new(Handle::current())
    }

    /// Submits an arbitrary algorithm invocation; returns immediately
    pub fn submit<F>(&self, call: F) -> PathHandle
    where
        F: FnOnce() -> Result<PathResult> + Send + 'static,
    {
        self.spawn(call, None)
    }

    /// Submits an invocation that resolves to [`Error::Cancelled`] once `token` fires
    pub fn submit_with_cancel<F>(&self, call: F, token: CancelToken) -> PathHandle
    where
        F: FnOnce() -> Result<PathResult> + Send + 'static,
    {
        self.spawn(call, Some(token))
    }

    /// Submits a [`RouteQuery`] against a shared graph
    pub fn submit_query<G>(&self, graph: Arc<G>, query: RouteQuery) -> PathHandle
    where
        G: Graph + 'static,
    {
        self.submit(move || query.run(graph.as_ref()))
    }

    /// Runs `call` in the background and delivers its outcome to `callback`.
    ///
    /// The callback runs on the worker's async task, not on the submitting thread.
    pub fn submit_with_callback<F, C>(&self, call: F, callback: C) -> Uuid
    where
        F: FnOnce() -> Result<PathResult> + Send + 'static,
        C: FnOnce(Result<PathResult>) + Send + 'static,
    {
        let handle = self.submit(call);
        let id = handle.id();
        self.runtime.spawn(async move {
            callback(handle.result().await);
        });
        id
    }

    fn spawn<F>(&self, call: F, cancel: Option<CancelToken>) -> PathHandle
    where
        F: FnOnce() -> Result<PathResult> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let worker_token = cancel.clone();
        debug!("Submitting query {}", id);

        let task = self.runtime.spawn_blocking(move || {
            if worker_token.as_ref().map_or(false, CancelToken::is_cancelled) {
                return Err(Error::Cancelled);
            }
            call()
        });

        PathHandle { id, task, cancel }
    }
}
