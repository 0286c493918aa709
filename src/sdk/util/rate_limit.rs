use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

// Public ORS directions quota on the free plan
const ORS_REQUESTS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(40) {
    Some(n) => n,
    None => panic!("quota must be non-zero"),
};

pub fn ors_limiter() -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(
        ORS_REQUESTS_PER_MINUTE,
    )))
}

/// Blocks the calling thread until the limiter grants a cell.
pub fn wait(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let delay = not_until.wait_time_from(clock.now());
        log::debug!("Rate limit reached, sleeping {:?}", delay);
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_is_not_delayed() {
        let limiter = ors_limiter();
        let started = std::time::Instant::now();
        wait(&limiter);
        assert!(started.elapsed() < std::time::Duration::from_millis(500));
    }
}
