use std::collections::VecDeque;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::task::noop_waker_ref;
use uuid::Uuid;

use crate::surface::DecodeFuture;

struct PendingRestore<D> {
    snapshot_id: Uuid,
    decode: DecodeFuture<D>,
}

/// Serializes snapshot restores.
///
/// Decodes may finish in any order, but their results are handed out strictly
/// in the order they were queued: a finished decode waits behind any earlier
/// one that is still pending.
pub struct RestoreQueue<D> {
    pending: VecDeque<PendingRestore<D>>,
}

impl<D> Default for RestoreQueue<D> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<D> RestoreQueue<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, snapshot_id: Uuid, decode: DecodeFuture<D>) {
        log::debug!(
            "Queued restore of snapshot {} ({} pending)",
            snapshot_id,
            self.pending.len() + 1
        );
        self.pending.push_back(PendingRestore {
            snapshot_id,
            decode,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies every restore at the front of the queue whose decode has
    /// finished, stopping at the first one that is still pending.
    ///
    /// Failed decodes are dropped without touching the surface. Returns the
    /// number of restores handed to `apply`.
    pub fn drain_ready(&mut self, mut apply: impl FnMut(D)) -> usize {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut applied = 0;

        while let Some(front) = self.pending.front_mut() {
            let outcome = match front.decode.poll_unpin(&mut cx) {
                Poll::Pending => break,
                Poll::Ready(outcome) => outcome,
            };
            let snapshot_id = front.snapshot_id;
            self.pending.pop_front();

            match outcome {
                Ok(decoded) => {
                    apply(decoded);
                    applied += 1;
                    log::debug!("Restored snapshot {}", snapshot_id);
                }
                Err(err) => {
                    log::warn!("Dropping restore of snapshot {}: {}", snapshot_id, err);
                }
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use futures::channel::oneshot;

    fn gated() -> (oneshot::Sender<u32>, DecodeFuture<u32>) {
        let (tx, rx) = oneshot::channel();
        let decode = async move { rx.await.map_err(|_| SurfaceError::DecodeAbandoned) };
        (tx, decode.boxed_local())
    }

    #[test]
    fn test_ready_restores_apply_in_order() {
        let mut queue = RestoreQueue::new();
        queue.enqueue(Uuid::new_v4(), async { Ok::<_, SurfaceError>(1) }.boxed_local());
        queue.enqueue(Uuid::new_v4(), async { Ok::<_, SurfaceError>(2) }.boxed_local());

        let mut applied = Vec::new();
        assert_eq!(queue.drain_ready(|d| applied.push(d)), 2);
        assert_eq!(applied, vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_later_completion_waits_for_earlier() {
        let mut queue = RestoreQueue::new();
        let (first_tx, first) = gated();
        let (second_tx, second) = gated();
        queue.enqueue(Uuid::new_v4(), first);
        queue.enqueue(Uuid::new_v4(), second);

        second_tx.send(2).unwrap();
        let mut applied = Vec::new();
        assert_eq!(queue.drain_ready(|d| applied.push(d)), 0);
        assert!(applied.is_empty());
        assert_eq!(queue.len(), 2);

        first_tx.send(1).unwrap();
        assert_eq!(queue.drain_ready(|d| applied.push(d)), 2);
        assert_eq!(applied, vec![1, 2]);
    }

    #[test]
    fn test_failed_decode_is_skipped() {
        let mut queue = RestoreQueue::new();
        let (abandoned_tx, abandoned) = gated();
        queue.enqueue(Uuid::new_v4(), abandoned);
        queue.enqueue(Uuid::new_v4(), async { Ok::<_, SurfaceError>(7) }.boxed_local());
        drop(abandoned_tx);

        let mut applied = Vec::new();
        assert_eq!(queue.drain_ready(|d| applied.push(d)), 1);
        assert_eq!(applied, vec![7]);
        assert!(queue.is_empty());
    }
}
