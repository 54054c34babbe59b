//! Channel behavior across threads

use std::thread;
use std::time::{Duration, Instant};

use amius_channel::{channel, channel_with_order, ChannelOrder, TryRecvError, CHANNEL_CAPACITY};

#[test]
fn test_recv_timeout_waits_full_duration() {
    let (tx, rx) = channel::<i32>();

    let waiter = thread::spawn(move || {
        let start = Instant::now();
        let result = rx.recv_timeout(Duration::from_secs(2));
        (result, start.elapsed())
    });

    let (result, elapsed) = waiter.join().unwrap();
    assert_eq!(result, Err(TryRecvError::Empty));
    // The sender was alive for the whole wait, so this is a timeout and not a hang-up
    assert!(elapsed >= Duration::from_secs(2), "returned after {:?}", elapsed);
    drop(tx);
}

#[test]
fn test_recv_timeout_reports_hang_up_during_wait() {
    let (tx, rx) = channel::<i32>();

    let waiter = thread::spawn(move || rx.recv_timeout(Duration::from_secs(5)));

    thread::sleep(Duration::from_millis(20));
    drop(tx);

    assert_eq!(waiter.join().unwrap(), Err(TryRecvError::HungUp));
}

#[test]
fn test_recv_block_wakes_on_item_from_other_thread() {
    let (tx, rx) = channel::<String>();

    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        tx.send("loaded".to_string()).unwrap();
        // Keep the sender alive until the item has been picked up
        while !tx.is_empty() {
            thread::sleep(Duration::from_millis(1));
        }
    });

    assert_eq!(rx.recv_block().unwrap(), "loaded");
    producer.join().unwrap();
}

#[test]
fn test_producer_backs_off_when_full() {
    let (tx, rx) = channel_with_order::<usize>(ChannelOrder::Fifo);
    let total = CHANNEL_CAPACITY * 4;

    let producer = thread::spawn(move || {
        let mut next = 0;
        while next < total {
            match tx.send(next) {
                Ok(()) => next += 1,
                Err(err) if err.is_hung_up() => panic!("receiver hung up early"),
                Err(_) => thread::sleep(Duration::from_micros(200)),
            }
        }
        // Hold the channel open until everything is consumed
        while !tx.is_empty() {
            thread::sleep(Duration::from_millis(1));
        }
    });

    let mut received = Vec::with_capacity(total);
    while received.len() < total {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(item) => received.push(item),
            Err(err) => panic!("unexpected receive error: {}", err),
        }
    }
    producer.join().unwrap();

    assert_eq!(received, (0..total).collect::<Vec<_>>());
}
