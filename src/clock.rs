/// Monotonic millisecond time source.
///
/// On target this is `embassy_time::Instant::now()`; tests drive a
/// simulated clock that only moves when the controller sleeps.
pub trait Clock {
    fn now_ms(&self) -> u64;

    fn elapsed_since(&self, earlier_ms: u64) -> u64 {
        self.now_ms().saturating_sub(earlier_ms)
    }
}
