//! Accept loop feeding the request queue

use crate::pool::ConnectionQueue;
use crate::queue::PendingConnection;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

/// Accepts inbound connections and hands them to the worker pool
pub struct Acceptor {
    listener: TcpListener,
    queue: Arc<ConnectionQueue<TcpStream>>,
    next_sequence: u64,
}

impl Acceptor {
    pub fn new(listener: TcpListener, queue: Arc<ConnectionQueue<TcpStream>>) -> Self {
        Self {
            listener,
            queue,
            next_sequence: 0,
        }
    }

    /// Accepts until cancelled, then closes the listening socket
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            let accepted = tokio::select! {
                _ = cancel.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => {
                    let sequence = self.next_sequence;
                    self.next_sequence += 1;

                    info!("Got connection #{} from {}", sequence, peer);
                    self.queue.enqueue(PendingConnection {
                        stream,
                        sequence,
                        peer,
                    });
                }
                Err(e) => {
                    // Usually transient (e.g. out of file descriptors)
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }

        info!("Stopped accepting connections");
    }
}
