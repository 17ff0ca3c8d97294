pub mod in_memory_payment_queue;
