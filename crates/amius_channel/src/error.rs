//! Channel error types

use std::fmt;

/// Error returned by [`Sender::send`](crate::Sender::send)
///
/// The rejected item is handed back in either case.
#[derive(PartialEq, Eq)]
pub enum SendError<T> {
    /// The store already holds the maximum number of items; retry later
    Full(T),
    /// The receiver was dropped; the channel is unusable
    HungUp(T),
}

impl<T> SendError<T> {
    /// Take back the item that could not be sent
    pub fn into_inner(self) -> T {
        match self {
            SendError::Full(item) | SendError::HungUp(item) => item,
        }
    }

    /// Whether the error is terminal for the channel
    pub fn is_hung_up(&self) -> bool {
        matches!(self, SendError::HungUp(_))
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Full(_) => write!(f, "Full(..)"),
            SendError::HungUp(_) => write!(f, "HungUp(..)"),
        }
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Full(_) => write!(f, "channel is full"),
            SendError::HungUp(_) => write!(f, "channel hung up: receiver dropped"),
        }
    }
}

impl<T> std::error::Error for SendError<T> {}

/// Error returned by the non-blocking and timed receive operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing is waiting (or the timeout elapsed); retry or wait
    Empty,
    /// The sender was dropped; the channel is unusable
    HungUp,
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryRecvError::Empty => write!(f, "channel is empty"),
            TryRecvError::HungUp => write!(f, "channel hung up: sender dropped"),
        }
    }
}

impl std::error::Error for TryRecvError {}

/// Error returned by [`Receiver::recv_block`](crate::Receiver::recv_block)
///
/// Blocking receive only gives up when the sender is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecvError;

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel hung up: sender dropped")
    }
}

impl std::error::Error for RecvError {}

impl From<RecvError> for TryRecvError {
    fn from(_: RecvError) -> Self {
        TryRecvError::HungUp
    }
}
