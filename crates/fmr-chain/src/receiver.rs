use std::time::Duration;

use fmr_core::data::Data;
use fmr_core::error::{ChainError, Result};

/// Receiving end of an asynchronous evaluation.
///
/// The worker sends exactly one message, the final value or the error, and
/// then hangs up. Every receive after that reports
/// [`ChainError::Disconnected`].
#[derive(Debug)]
pub struct ChainReceiver<T> {
    rx: flume::Receiver<Result<Data<T>>>,
}

impl<T> ChainReceiver<T> {
    pub(crate) fn new(rx: flume::Receiver<Result<Data<T>>>) -> Self {
        Self { rx }
    }

    /// Block the calling thread until the result arrives.
    pub fn recv(&self) -> Result<Data<T>> {
        self.rx.recv().map_err(|_| ChainError::Disconnected)?
    }

    /// Wait for the result from async code.
    pub async fn recv_async(&self) -> Result<Data<T>> {
        self.rx
            .recv_async()
            .await
            .map_err(|_| ChainError::Disconnected)?
    }

    /// Block for at most `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Data<T>> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(flume::RecvTimeoutError::Timeout) => Err(ChainError::Timeout.into()),
            Err(flume::RecvTimeoutError::Disconnected) => Err(ChainError::Disconnected.into()),
        }
    }

    /// Take the result if it is ready; `Ok(None)` while the worker is running.
    pub fn try_recv(&self) -> Result<Option<Data<T>>> {
        match self.rx.try_recv() {
            Ok(result) => result.map(Some),
            Err(flume::TryRecvError::Empty) => Ok(None),
            Err(flume::TryRecvError::Disconnected) => Err(ChainError::Disconnected.into()),
        }
    }

    /// True once the worker has hung up and no message is left to take.
    pub fn is_closed(&self) -> bool {
        self.rx.is_disconnected() && self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmr_core::error::FmrError;

    fn ready(result: Result<Data<i32>>) -> ChainReceiver<i32> {
        let (tx, rx) = flume::bounded(1);
        tx.send(result).unwrap();
        ChainReceiver::new(rx)
    }

    #[test]
    fn recv_once_then_closed() {
        let rx = ready(Ok(Data::Item(1)));
        assert!(!rx.is_closed());
        assert_eq!(rx.recv().unwrap(), Data::Item(1));
        assert!(rx.is_closed());
        assert!(matches!(
            rx.recv(),
            Err(FmrError::Chain(ChainError::Disconnected))
        ));
    }

    #[test]
    fn error_message_is_delivered_as_err() {
        let rx = ready(Err(ChainError::not_a_sequence("map", "0").into()));
        assert!(matches!(
            rx.recv(),
            Err(FmrError::Chain(ChainError::NotASequence { .. }))
        ));
    }

    #[test]
    fn try_recv_empty_while_pending() {
        let (tx, rx) = flume::bounded::<Result<Data<i32>>>(1);
        let rx = ChainReceiver::new(rx);
        assert!(matches!(rx.try_recv(), Ok(None)));
        tx.send(Ok(Data::Absent)).unwrap();
        assert!(matches!(rx.try_recv(), Ok(Some(Data::Absent))));
    }

    #[test]
    fn recv_timeout_expires() {
        let (_tx, rx) = flume::bounded::<Result<Data<i32>>>(1);
        let rx = ChainReceiver::new(rx);
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(10)),
            Err(FmrError::Chain(ChainError::Timeout))
        ));
    }

    #[test]
    fn sender_dropped_without_message() {
        let (tx, rx) = flume::bounded::<Result<Data<i32>>>(1);
        drop(tx);
        let rx = ChainReceiver::new(rx);
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(1)),
            Err(FmrError::Chain(ChainError::Disconnected))
        ));
    }

    #[tokio::test]
    async fn recv_async_delivers() {
        let rx = ready(Ok(Data::Sequence(vec![2, 4])));
        assert_eq!(rx.recv_async().await.unwrap(), Data::Sequence(vec![2, 4]));
    }
}
