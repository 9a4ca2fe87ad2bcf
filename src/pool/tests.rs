use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::model::{Op, Outcome};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

// ── Train operations ─────────────────────────────────────

#[test]
fn new_train_is_fully_available() {
    let train = Train::new(3, 500);
    assert_eq!(train.id(), 3);
    assert_eq!(train.available(), 500);
    assert_eq!(train.booked(), 0);
    assert_eq!(train.inquire(), Outcome::Seats { available: 500 });
}

#[test]
#[should_panic(expected = "train capacity must be greater than 0")]
fn zero_capacity_train_panics() {
    Train::new(0, 0);
}

#[test]
fn book_decrements_when_enough_seats() {
    let mut train = Train::new(0, 10);
    assert_eq!(train.book(6), Outcome::booked(6, 4));
    assert_eq!(train.available(), 4);
}

#[test]
fn book_rejected_leaves_train_unchanged() {
    let mut train = Train::new(0, 10);
    train.book(6);
    assert_eq!(train.book(6), Outcome::rejected(6, 4));
    assert_eq!(train.available(), 4);
}

#[test]
fn book_exact_remainder_empties_train() {
    let mut train = Train::new(0, 10);
    assert_eq!(train.book(10), Outcome::booked(10, 0));
    assert_eq!(train.available(), 0);
}

#[test]
#[should_panic(expected = "booking quantity must be greater than 0")]
fn book_zero_panics() {
    Train::new(0, 10).book(0);
}

#[test]
fn cancel_without_bookings_is_noop() {
    let mut train = Train::new(0, 10);
    assert_eq!(train.cancel(&mut rng()), Outcome::NothingToCancel);
    assert_eq!(train.available(), 10);
}

#[test]
fn cancel_on_full_train_restores_between_one_and_capacity() {
    let mut rng = rng();
    for _ in 0..200 {
        let mut train = Train::new(0, 10);
        train.book(10);
        match train.cancel(&mut rng) {
            Outcome::Cancelled { seats, remaining } => {
                assert!((1..=10).contains(&seats));
                assert_eq!(remaining, seats);
                assert_eq!(train.available(), seats);
            }
            other => panic!("expected a cancellation, got {other:?}"),
        }
    }
}

#[test]
fn cancel_never_exceeds_booked() {
    let mut rng = rng();
    let mut train = Train::new(0, 50);
    train.book(7);
    for _ in 0..100 {
        let before = train.booked();
        let outcome = train.cancel(&mut rng);
        if before == 0 {
            assert_eq!(outcome, Outcome::NothingToCancel);
            train.book(7);
            continue;
        }
        let Outcome::Cancelled { seats, .. } = outcome else {
            panic!("expected a cancellation, got {outcome:?}");
        };
        assert!(seats <= before);
        assert!(train.available() <= train.capacity());
    }
}

#[test]
fn apply_dispatches_on_op() {
    let mut rng = rng();
    let mut train = Train::new(0, 20);
    assert_eq!(
        train.apply(Op::Inquire, &mut rng),
        Outcome::Seats { available: 20 }
    );
    assert_eq!(
        train.apply(Op::Book { seats: 5 }, &mut rng),
        Outcome::booked(5, 15)
    );
    assert!(matches!(
        train.apply(Op::Cancel, &mut rng),
        Outcome::Cancelled { .. }
    ));
}

// ── Pool ─────────────────────────────────────────────────

#[tokio::test]
async fn pool_creates_independent_trains() {
    let pool = ResourcePool::new(4, 30);
    assert_eq!(pool.len(), 4);
    assert!(!pool.is_empty());

    pool.lock(2).await.unwrap().book(10);

    let snap = pool.snapshot().await;
    assert_eq!(snap.len(), 4);
    assert_eq!(snap[2].available, 20);
    for (i, s) in snap.iter().enumerate() {
        assert_eq!(s.train, i);
        assert_eq!(s.capacity, 30);
        if i != 2 {
            assert_eq!(s.available, 30);
        }
    }
}

#[tokio::test]
async fn pool_with_mixed_capacities() {
    let pool = ResourcePool::with_capacities([1, 5, 10]);
    let snap = pool.snapshot().await;
    let caps: Vec<u32> = snap.iter().map(|s| s.capacity).collect();
    assert_eq!(caps, vec![1, 5, 10]);
}

#[tokio::test]
async fn pool_unknown_train_is_none() {
    let pool = ResourcePool::new(2, 10);
    assert!(pool.get(2).is_none());
    assert!(pool.lock(99).await.is_none());
}

#[tokio::test]
async fn locks_are_per_train() {
    let pool = ResourcePool::new(2, 10);
    let _held = pool.lock(0).await.unwrap();
    // Train 1 is reachable while train 0 is held.
    let other = pool.get(1).unwrap();
    assert!(other.try_lock().is_ok());
    assert!(pool.get(0).unwrap().try_lock().is_err());
}

#[tokio::test]
async fn snapshot_is_repeatable() {
    let pool = ResourcePool::new(3, 10);
    pool.lock(1).await.unwrap().book(4);
    let first = pool.snapshot().await;
    let second = pool.snapshot().await;
    assert_eq!(first, second);
}
