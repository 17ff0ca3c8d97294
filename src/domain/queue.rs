use async_trait::async_trait;

/// Bounded, ordered, multi-producer/multi-consumer buffer between request
/// intake and the dispatch workers.
#[async_trait]
pub trait Queue<B>: Send + Sync + 'static {
	/// Takes the oldest item, waiting while the queue is empty. Returns
	/// `None` once the queue has been closed and drained.
	async fn pop(&self) -> Result<Option<B>, Box<dyn std::error::Error + Send>>;

	/// Appends an item to the tail, waiting while the queue is at
	/// capacity. Fails once the queue has been closed.
	async fn push(&self, item: B) -> Result<(), Box<dyn std::error::Error + Send>>;
}
