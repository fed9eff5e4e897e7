//! In-memory toast sink.
//!
//! Keeps a bounded history and fans every toast out to broadcast subscribers.
//! Works within a single process only.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use agora_core::ports::{Toast, ToastError, ToastSink};

pub struct InMemoryToastSink {
    pending: RwLock<VecDeque<Toast>>,
    history: RwLock<VecDeque<Toast>>,
    sender: broadcast::Sender<Toast>,
    capacity: usize,
    closed: AtomicBool,
}

impl InMemoryToastSink {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: RwLock::new(VecDeque::new()),
            history: RwLock::new(VecDeque::with_capacity(capacity)),
            sender: broadcast::channel(capacity).0,
            capacity,
            closed: AtomicBool::new(false),
        }
    }

    /// Receive every toast pushed from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Refuse further toasts.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn bounded_push(queue: &mut VecDeque<Toast>, toast: Toast, capacity: usize) -> bool {
        let dropped = queue.len() >= capacity;
        if dropped {
            queue.pop_front();
        }
        queue.push_back(toast);
        dropped
    }
}

impl Default for InMemoryToastSink {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl ToastSink for InMemoryToastSink {
    async fn push(&self, toast: Toast) -> Result<(), ToastError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ToastError::Closed);
        }

        tracing::debug!(
            toast_id = %toast.id,
            destructive = toast.is_destructive(),
            description = %toast.description,
            "Toast pushed"
        );

        // Ignore send errors (no subscribers)
        let _ = self.sender.send(toast.clone());

        let mut history = self.history.write().await;
        Self::bounded_push(&mut history, toast.clone(), self.capacity);
        drop(history);

        let mut pending = self.pending.write().await;
        if Self::bounded_push(&mut pending, toast, self.capacity) {
            tracing::warn!(capacity = self.capacity, "Toast buffer full, oldest toast dropped");
        }
        Ok(())
    }

    async fn take_pending(&self) -> Vec<Toast> {
        let mut pending = self.pending.write().await;
        pending.drain(..).collect()
    }

    async fn history(&self) -> Vec<Toast> {
        let history = self.history.read().await;
        history.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pending_drains_but_history_stays() {
        let sink = InMemoryToastSink::new(8);
        sink.push(Toast::success("Post published.")).await.unwrap();
        sink.push(Toast::destructive("Please enter a title.")).await.unwrap();

        let pending = sink.take_pending().await;
        assert_eq!(pending.len(), 2);
        assert!(pending[1].is_destructive());
        assert!(sink.take_pending().await.is_empty());
        assert_eq!(sink.history().await.len(), 2);
    }

    #[tokio::test]
    async fn buffer_drops_oldest() {
        let sink = InMemoryToastSink::new(2);
        for text in ["one", "two", "three"] {
            sink.push(Toast::success(text)).await.unwrap();
        }
        let history: Vec<String> = sink
            .history()
            .await
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(history, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn subscribers_see_toasts() {
        let sink = InMemoryToastSink::default();
        let mut receiver = sink.subscribe();
        sink.push(Toast::success("Comment posted.")).await.unwrap();
        assert_eq!(receiver.recv().await.unwrap().description, "Comment posted.");
    }

    #[tokio::test]
    async fn closed_sink_refuses_toasts() {
        let sink = InMemoryToastSink::default();
        sink.close();
        assert!(matches!(
            sink.push(Toast::success("late")).await,
            Err(ToastError::Closed)
        ));
    }
}
