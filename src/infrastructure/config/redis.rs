/// Sorted set of correlation ids, scored by `requested_at` in unix
/// milliseconds. Drives the inclusive range filter of summary queries.
pub const PAYMENTS_INDEX_KEY: &str = "payments:by_requested_at";

/// Prefix of the per-payment hash (`amount`, `processor`, `requested_at`).
pub const PAYMENT_KEY_PREFIX: &str = "payment:";
