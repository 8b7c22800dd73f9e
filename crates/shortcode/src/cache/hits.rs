use tokio::sync::mpsc;

use crate::code::ShortCode;

/// Default depth of the hit-notification queue.
pub const DEFAULT_HIT_BUFFER: usize = 64;

/// Creates a bounded hit-notification channel.
///
/// The receiver side is drained by whatever owns the persistent hit-count
/// bookkeeping; the [`HitSink`] goes to the cache coordinator.
pub fn hit_channel(buffer: usize) -> (HitSink, mpsc::Receiver<ShortCode>) {
    let (tx, rx) = mpsc::channel(buffer);
    (HitSink { tx }, rx)
}

/// Fire-and-forget notifications for cache hits.
///
/// `record` must never block a redirect: it enqueues without waiting and
/// drops the notification when the queue is full or the receiver is gone.
/// Dropped notifications are logged and lost; there is no retry and no
/// ordering guarantee relative to other store writes.
#[derive(Debug, Clone)]
pub struct HitSink {
    tx: mpsc::Sender<ShortCode>,
}

impl HitSink {
    pub fn record(&self, code: &ShortCode) {
        if let Err(e) = self.tx.try_send(code.clone()) {
            tracing::debug!(code = %code, error = %e, "hit notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_are_delivered_in_order() {
        let (sink, mut rx) = hit_channel(8);
        sink.record(&ShortCode::from("aaaaaaa"));
        sink.record(&ShortCode::from("bbbbbbb"));

        assert_eq!(rx.recv().await.unwrap(), ShortCode::from("aaaaaaa"));
        assert_eq!(rx.recv().await.unwrap(), ShortCode::from("bbbbbbb"));
    }

    #[tokio::test]
    async fn overflow_and_closed_receiver_drop_silently() {
        let (sink, mut rx) = hit_channel(1);
        sink.record(&ShortCode::from("aaaaaaa"));
        // Queue full: dropped, not blocked.
        sink.record(&ShortCode::from("bbbbbbb"));
        assert_eq!(rx.recv().await.unwrap(), ShortCode::from("aaaaaaa"));

        drop(rx);
        // Receiver gone: still no panic, no error surfaced.
        sink.record(&ShortCode::from("ccccccc"));
    }
}
