//! Bounded single-producer/single-consumer channel
//!
//! Used to hand discrete messages between threads (an audio or loader thread
//! and the main loop). A channel is created as a [`Sender`]/[`Receiver`] pair
//! that share one fixed-capacity store.
//!
//! - [`Sender::send`] fails with `Full` once [`CHANNEL_CAPACITY`] items are waiting
//! - [`Receiver::try_recv`] never blocks
//! - [`Receiver::recv_block`] and [`Receiver::recv_timeout`] poll every
//!   [`POLL_INTERVAL`] instead of parking on a condition variable. This keeps
//!   the primitive trivially portable at the cost of wake-up latency.
//!
//! Dropping either endpoint hangs the channel up: unconsumed items are
//! discarded and the surviving endpoint reports `HungUp` from then on.
//!
//! # Example
//! ```
//! use amius_channel::{channel, TryRecvError};
//!
//! let (tx, rx) = channel::<u32>();
//! tx.send(5).unwrap();
//! tx.send(2).unwrap();
//!
//! // The default order hands back the newest item first
//! assert_eq!(rx.try_recv(), Ok(2));
//! assert_eq!(rx.try_recv(), Ok(5));
//! assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
//! ```

mod channel;
mod error;

pub use channel::{
    channel, channel_with_order, ChannelOrder, Receiver, Sender, CHANNEL_CAPACITY, POLL_INTERVAL,
};
pub use error::{RecvError, SendError, TryRecvError};
