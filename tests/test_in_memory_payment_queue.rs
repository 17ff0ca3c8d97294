use std::time::Duration;

use futures::future::join_all;
use payment_relay::domain::payment::Payment;
use payment_relay::domain::queue::Queue;
use payment_relay::infrastructure::queue::in_memory_payment_queue::InMemoryPaymentQueue;
use tokio::time::timeout;
use uuid::Uuid;

fn payment(amount: f64) -> Payment {
	Payment::new(Uuid::new_v4(), amount)
}

#[tokio::test]
async fn test_queue_is_fifo() {
	let queue = InMemoryPaymentQueue::new(10);

	let first = payment(1.0);
	let second = payment(2.0);
	let third = payment(3.0);

	queue.push(first.clone()).await.unwrap();
	queue.push(second.clone()).await.unwrap();
	queue.push(third.clone()).await.unwrap();

	assert_eq!(queue.pop().await.unwrap(), Some(first));
	assert_eq!(queue.pop().await.unwrap(), Some(second));
	assert_eq!(queue.pop().await.unwrap(), Some(third));
}

#[tokio::test]
async fn test_pop_blocks_until_a_payment_arrives() {
	let queue = InMemoryPaymentQueue::new(10);

	let pending = timeout(Duration::from_millis(50), queue.pop()).await;
	assert!(pending.is_err(), "pop should block on an empty queue");

	let producer = queue.clone();
	let pushed = payment(7.0);
	let expected = pushed.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(20)).await;
		producer.push(pushed).await.unwrap();
	});

	let popped = timeout(Duration::from_secs(1), queue.pop())
		.await
		.expect("pop should wake once a payment is pushed")
		.unwrap();
	assert_eq!(popped, Some(expected));
}

#[tokio::test]
async fn test_closed_queue_drains_then_signals_end() {
	let queue = InMemoryPaymentQueue::new(10);

	let remaining = payment(5.0);
	queue.push(remaining.clone()).await.unwrap();
	queue.close();

	assert_eq!(queue.pop().await.unwrap(), Some(remaining));
	assert_eq!(queue.pop().await.unwrap(), None);
}

#[tokio::test]
async fn test_push_to_closed_queue_fails() {
	let queue = InMemoryPaymentQueue::new(10);
	queue.close();

	assert!(queue.push(payment(1.0)).await.is_err());
}

#[tokio::test]
async fn test_push_blocks_while_at_capacity() {
	let queue = InMemoryPaymentQueue::new(1);

	queue.push(payment(1.0)).await.unwrap();

	let blocked = timeout(Duration::from_millis(50), queue.push(payment(2.0))).await;
	assert!(blocked.is_err(), "push should block on a full queue");

	// Draining one slot unblocks the producer.
	let producer = queue.clone();
	let handle = tokio::spawn(async move { producer.push(payment(3.0)).await });

	queue.pop().await.unwrap();

	timeout(Duration::from_secs(1), handle)
		.await
		.expect("push should wake once capacity frees up")
		.unwrap()
		.unwrap();
	assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn test_close_wakes_a_parked_consumer() {
	let queue = InMemoryPaymentQueue::new(10);

	// The consumer sees an empty, open queue and parks before close runs.
	let consumer = queue.clone();
	let parked = tokio::spawn(async move { consumer.pop().await });
	tokio::time::sleep(Duration::from_millis(50)).await;

	queue.close();

	let popped = timeout(Duration::from_secs(1), parked)
		.await
		.expect("a parked consumer must observe end-of-queue on close")
		.unwrap()
		.unwrap();
	assert_eq!(popped, None);
}

#[tokio::test]
async fn test_each_push_wakes_its_own_consumer() {
	let queue = InMemoryPaymentQueue::new(10);

	let consumers: Vec<_> = (0..2)
		.map(|_| {
			let queue = queue.clone();
			tokio::spawn(async move { queue.pop().await })
		})
		.collect();
	tokio::time::sleep(Duration::from_millis(50)).await;

	queue.push(payment(1.0)).await.unwrap();
	queue.push(payment(2.0)).await.unwrap();

	// Two pushes, two parked consumers: both must receive a payment.
	for consumer in consumers {
		let popped = timeout(Duration::from_secs(1), consumer)
			.await
			.expect("every parked consumer must be woken by a push")
			.unwrap()
			.unwrap();
		assert!(popped.is_some());
	}
	assert!(queue.is_empty());
}

#[tokio::test]
async fn test_concurrent_producers_and_consumers_lose_nothing() {
	let queue = InMemoryPaymentQueue::new(100);

	let producers: Vec<_> = (0..4)
		.map(|_| {
			let queue = queue.clone();
			tokio::spawn(async move {
				for i in 0..25 {
					queue.push(payment(i as f64)).await.unwrap();
				}
			})
		})
		.collect();
	join_all(producers).await;

	let consumers: Vec<_> = (0..4)
		.map(|_| {
			let queue = queue.clone();
			tokio::spawn(async move {
				let mut seen = 0;
				while let Some(_payment) = queue.pop().await.unwrap() {
					seen += 1;
				}
				seen
			})
		})
		.collect();

	queue.close();

	let totals: usize = join_all(consumers)
		.await
		.into_iter()
		.map(|count| count.unwrap())
		.sum();
	assert_eq!(totals, 100);
}
