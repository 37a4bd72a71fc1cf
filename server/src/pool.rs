//! Fixed-size pool of session workers
//!
//! Each worker takes one connection at a time from the request queue and
//! runs its whole session before taking the next. A stalled client therefore
//! holds its worker until it disconnects; there is no idle timeout.
//!
//! Workers stop when the shared cancellation token fires. A session that is
//! still running at that point is dropped on the spot and its client is not
//! told.

use crate::context::ServerContext;
use crate::error::SessionError;
use crate::queue::{PendingConnection, RequestQueue};
use crate::session::Session;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub type ConnectionQueue<S> = RequestQueue<PendingConnection<S>>;

pub struct WorkerPool {
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers draining `queue`
    pub fn start<S>(
        size: usize,
        queue: Arc<ConnectionQueue<S>>,
        context: Arc<ServerContext>,
        cancel: CancellationToken,
    ) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let workers = (0..size)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&queue),
                    Arc::clone(&context),
                    cancel.clone(),
                ))
            })
            .collect();

        info!("Started {} workers", size);
        Self { workers }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Waits for every worker to exit after cancellation
    pub async fn join(self) {
        for worker in self.workers {
            if let Err(e) = worker.await {
                warn!("Worker task panicked: {}", e);
            }
        }
    }
}

async fn run_worker<S>(
    id: usize,
    queue: Arc<ConnectionQueue<S>>,
    context: Arc<ServerContext>,
    cancel: CancellationToken,
) where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    loop {
        let pending = tokio::select! {
            _ = cancel.cancelled() => break,
            pending = queue.dequeue() => pending,
        };

        let sequence = pending.sequence;
        debug!(
            "Worker {} serving connection #{} from {}",
            id, sequence, pending.peer
        );
        let session = Session::new(sequence, pending.stream, Arc::clone(&context));

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Worker {} dropping connection #{} on shutdown", id, sequence);
                break;
            }
            result = session.run() => match result {
                Ok(()) => info!("Connection #{} closed", sequence),
                Err(e @ SessionError::Transport(_)) => {
                    warn!("Connection #{} ended: {}", sequence, e)
                }
                Err(e) => info!("Connection #{} ended: {}", sequence, e),
            },
        }
    }

    debug!("Worker {} stopped", id);
}
