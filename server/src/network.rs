//! Server wiring: listening socket, request queue, acceptor and worker pool

use crate::acceptor::Acceptor;
use crate::config::ServerConfig;
use crate::context::ServerContext;
use crate::error::ServerError;
use crate::pool::{ConnectionQueue, WorkerPool};
use crate::queue::RequestQueue;
use log::info;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

/// A bound hangman server, ready to run
pub struct Server {
    listener: TcpListener,
    context: Arc<ServerContext>,
    queue: Arc<ConnectionQueue<TcpStream>>,
    workers: usize,
}

impl Server {
    pub async fn bind(config: &ServerConfig, context: ServerContext) -> Result<Self, ServerError> {
        let addr = config.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Server {
            listener,
            context: Arc::new(context),
            queue: Arc::new(RequestQueue::new()),
            workers: config.workers.max(1),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Shared state, for inspecting the leaderboard from outside the server
    pub fn context(&self) -> Arc<ServerContext> {
        Arc::clone(&self.context)
    }

    /// Serves clients until `cancel` fires
    ///
    /// Returns once the listener is closed and every worker has stopped.
    /// Sessions still running at cancellation are cut off.
    pub async fn run(self, cancel: CancellationToken) {
        if let Ok(addr) = self.listener.local_addr() {
            info!(
                "Server listening on {} with {} workers ({} words, {} users)",
                addr,
                self.workers,
                self.context.words.len(),
                self.context.credentials.len()
            );
        }

        let pool = WorkerPool::start(
            self.workers,
            Arc::clone(&self.queue),
            Arc::clone(&self.context),
            cancel.clone(),
        );

        Acceptor::new(self.listener, Arc::clone(&self.queue))
            .run(cancel)
            .await;
        pool.join().await;

        let abandoned = self.queue.len();
        if abandoned > 0 {
            info!("Dropped {} queued connections", abandoned);
        }
        info!("Server shut down");
    }
}
