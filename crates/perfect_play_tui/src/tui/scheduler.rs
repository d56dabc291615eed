//! Delayed delivery of the computer's move.

use perfect_play::ComputerTurn;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// A computer move waiting for its delay to run out.
///
/// Dropping the handle cancels the delivery.
#[derive(Debug)]
pub struct ScheduledMove {
    turn: ComputerTurn,
    handle: JoinHandle<()>,
}

impl ScheduledMove {
    /// Sends `turn` on `tx` after `delay`.
    #[instrument(skip(tx))]
    pub fn schedule(turn: ComputerTurn, delay: Duration, tx: UnboundedSender<ComputerTurn>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(turn).is_err() {
                trace!("Receiver gone, dropping computer move");
            }
        });
        debug!("Computer move scheduled");
        Self { turn, handle }
    }

    /// The move being delivered.
    pub fn turn(&self) -> ComputerTurn {
        self.turn
    }

    /// Stops the delivery if it has not happened yet.
    pub fn cancel(self) {
        self.handle.abort();
        debug!(turn = ?self.turn, "Computer move cancelled");
    }
}

impl Drop for ScheduledMove {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfect_play::Position;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_move_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let turn = ComputerTurn::new(3, Position::TopLeft);
        let _scheduled = ScheduledMove::schedule(turn, Duration::from_millis(10), tx);

        assert_eq!(rx.recv().await, Some(turn));
    }

    #[tokio::test]
    async fn test_cancelled_move_never_arrives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let turn = ComputerTurn::new(1, Position::Center);
        ScheduledMove::schedule(turn, Duration::from_millis(20), tx).cancel();

        // The task held the only sender; aborting it closes the channel.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancel_stops_delivery_while_channel_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let turn = ComputerTurn::new(2, Position::TopRight);
        let scheduled = ScheduledMove::schedule(turn, Duration::from_millis(5), tx.clone());
        scheduled.cancel();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
