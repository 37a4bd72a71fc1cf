//! Producer/consumer queue between the acceptor and the worker pool
//!
//! The queue is a monitor: a mutex guards the FIFO and a notifier wakes one
//! sleeping worker per enqueued item. Producers never wait. Consumers sleep
//! until an item is available, then take the oldest one.
//!
//! There is no capacity bound. While every worker is busy, accepted
//! connections pile up here and wait their turn.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::SocketAddr;
use tokio::sync::Notify;

/// An accepted connection waiting for a free worker
#[derive(Debug)]
pub struct PendingConnection<S> {
    pub stream: S,
    /// Acceptance order, starting at 0
    pub sequence: u64,
    pub peer: SocketAddr,
}

/// Unbounded FIFO with a blocking `dequeue`
#[derive(Debug)]
pub struct RequestQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Notify,
}

impl<T> Default for RequestQueue<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }
}

impl<T> RequestQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and wakes one waiting consumer
    pub fn enqueue(&self, item: T) {
        self.items.lock().push_back(item);
        // Stores a permit when nobody is waiting, so a consumer that checked
        // the queue just before this push still wakes up.
        self.available.notify_one();
    }

    /// Waits for and removes the oldest item
    ///
    /// Cancel-safe: dropping the future before it resolves never loses an item.
    pub async fn dequeue(&self) -> T {
        loop {
            if let Some(item) = self.try_dequeue() {
                return item;
            }
            self.available.notified().await;
        }
    }

    pub fn try_dequeue(&self) -> Option<T> {
        let mut items = self.items.lock();
        let item = items.pop_front();
        // Pass the wakeup on if more work is queued, so a permit consumed by
        // a worker that found the queue empty is not lost for the others.
        if item.is_some() && !items.is_empty() {
            self.available.notify_one();
        }
        item
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_test::task::spawn;
    use tokio_test::{assert_pending, assert_ready_eq};

    #[test]
    fn test_fifo_order() {
        let queue = RequestQueue::new();
        for i in 0..5 {
            queue.enqueue(i);
        }
        assert_eq!(queue.len(), 5);

        let drained: Vec<i32> = std::iter::from_fn(|| queue.try_dequeue()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_waits_for_enqueue() {
        let queue = RequestQueue::new();
        let mut waiter = spawn(queue.dequeue());

        assert_pending!(waiter.poll());

        queue.enqueue(42);
        assert!(waiter.is_woken());
        assert_ready_eq!(waiter.poll(), 42);
    }

    #[test]
    fn test_dropped_waiter_loses_nothing() {
        let queue = RequestQueue::new();
        {
            let mut waiter = spawn(queue.dequeue());
            assert_pending!(waiter.poll());
        }

        queue.enqueue("conn");
        let mut waiter = spawn(queue.dequeue());
        assert_ready_eq!(waiter.poll(), "conn");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_item_delivered_exactly_once() {
        let queue = Arc::new(RequestQueue::new());
        let total = 1000;

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                tokio::spawn(async move {
                    let mut taken = Vec::new();
                    while let Ok(item) =
                        tokio::time::timeout(Duration::from_millis(200), queue.dequeue()).await
                    {
                        taken.push(item);
                    }
                    taken
                })
            })
            .collect();

        for i in 0..total {
            queue.enqueue(i);
        }

        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.unwrap());
        }
        all.sort_unstable();

        assert_eq!(all, (0..total).collect::<Vec<_>>());
    }
}
