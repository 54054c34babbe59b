//! Sender/Receiver pair over a shared bounded store

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{RecvError, SendError, TryRecvError};

/// Maximum number of items waiting in a channel
pub const CHANNEL_CAPACITY: usize = 16;

/// Sleep between polls in the blocking receive operations
pub const POLL_INTERVAL: Duration = Duration::from_micros(100);

/// Order in which waiting items are handed to the receiver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Newest item first (stack order). This is what existing callers rely on.
    #[default]
    Lifo,
    /// Oldest item first (queue order)
    Fifo,
}

/// Items waiting in an open channel
struct Store<T> {
    items: VecDeque<T>,
    order: ChannelOrder,
}

impl<T> Store<T> {
    fn new(order: ChannelOrder) -> Self {
        Self {
            items: VecDeque::with_capacity(CHANNEL_CAPACITY),
            order,
        }
    }

    fn push(&mut self, item: T) -> Result<(), T> {
        if self.items.len() >= CHANNEL_CAPACITY {
            return Err(item);
        }
        self.items.push_back(item);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        match self.order {
            ChannelOrder::Lifo => self.items.pop_back(),
            ChannelOrder::Fifo => self.items.pop_front(),
        }
    }
}

/// `None` once either endpoint has been dropped
type Shared<T> = Arc<Mutex<Option<Store<T>>>>;

// The store is a plain queue; a panic while holding the lock cannot leave
// it half-updated, so a poisoned lock is still safe to use.
fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, Option<Store<T>>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// Hang the channel up from one side. Whatever is still queued is dropped.
fn hang_up<T>(shared: &Shared<T>, side: &str) {
    let discarded = lock(shared).take().map(|store| store.items.len());
    if let Some(count) = discarded {
        log::debug!("channel {} dropped, hanging up ({} item(s) discarded)", side, count);
    }
}

/// Create a channel that hands back the newest item first
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    channel_with_order(ChannelOrder::default())
}

/// Create a channel with an explicit receive order
pub fn channel_with_order<T>(order: ChannelOrder) -> (Sender<T>, Receiver<T>) {
    let shared: Shared<T> = Arc::new(Mutex::new(Some(Store::new(order))));
    (
        Sender { shared: Arc::clone(&shared) },
        Receiver { shared },
    )
}

/// Sending half of a channel
///
/// There is exactly one sender per channel; it cannot be cloned.
pub struct Sender<T> {
    shared: Shared<T>,
}

impl<T> Sender<T> {
    /// Put an item into the channel
    ///
    /// Never blocks. On failure the item is handed back inside the error.
    pub fn send(&self, item: T) -> Result<(), SendError<T>> {
        let mut guard = lock(&self.shared);
        match guard.as_mut() {
            None => Err(SendError::HungUp(item)),
            Some(store) => store.push(item).map_err(SendError::Full),
        }
    }

    /// Number of items waiting (0 once hung up)
    pub fn len(&self) -> usize {
        lock(&self.shared).as_ref().map_or(0, |store| store.items.len())
    }

    /// Whether no items are waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the receiver has been dropped
    pub fn is_hung_up(&self) -> bool {
        lock(&self.shared).is_none()
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        hang_up(&self.shared, "sender");
    }
}

/// Receiving half of a channel
///
/// There is exactly one receiver per channel; it cannot be cloned.
pub struct Receiver<T> {
    shared: Shared<T>,
}

impl<T> Receiver<T> {
    /// Take an item if one is waiting
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut guard = lock(&self.shared);
        match guard.as_mut() {
            None => Err(TryRecvError::HungUp),
            Some(store) => store.pop().ok_or(TryRecvError::Empty),
        }
    }

    /// Wait until an item arrives or the sender hangs up
    ///
    /// Polls every [`POLL_INTERVAL`]. There is no timeout.
    pub fn recv_block(&self) -> Result<T, RecvError> {
        loop {
            match self.try_recv() {
                Ok(item) => return Ok(item),
                Err(TryRecvError::HungUp) => return Err(RecvError),
                Err(TryRecvError::Empty) => thread::sleep(POLL_INTERVAL),
            }
        }
    }

    /// Wait until an item arrives, the sender hangs up, or `timeout` elapses
    ///
    /// Returns [`TryRecvError::Empty`] on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, TryRecvError> {
        let start = Instant::now();
        loop {
            match self.try_recv() {
                Err(TryRecvError::Empty) => {
                    if start.elapsed() >= timeout {
                        return Err(TryRecvError::Empty);
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                result => return result,
            }
        }
    }

    /// Number of items waiting (0 once hung up)
    pub fn len(&self) -> usize {
        lock(&self.shared).as_ref().map_or(0, |store| store.items.len())
    }

    /// Whether no items are waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the sender has been dropped
    pub fn is_hung_up(&self) -> bool {
        lock(&self.shared).is_none()
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        hang_up(&self.shared, "receiver");
    }
}
