// src/fetch.rs
//
// Paced GET with open-ended retry. One `Fetcher` owns the pacing delay for a
// whole collection run: every call pays it, and every failed attempt makes
// it a little longer for the calls that follow.

use std::time::Duration;

use crate::config::consts::{BASE_DELAY_MS, DELAY_GROWTH};
use crate::core::net::{Sleep, ThreadSleep, Transport};

pub struct Fetcher<T, S = ThreadSleep> {
    transport: T,
    sleeper: S,
    delay_ms: u64,
    growth: f64,
}

impl<T: Transport> Fetcher<T, ThreadSleep> {
    pub fn new(transport: T) -> Self {
        Self::with_sleep(transport, ThreadSleep)
    }
}

impl<T: Transport, S: Sleep> Fetcher<T, S> {
    pub fn with_sleep(transport: T, sleeper: S) -> Self {
        Self { transport, sleeper, delay_ms: BASE_DELAY_MS, growth: DELAY_GROWTH }
    }

    /// Starting delay and the factor it grows by per failed attempt.
    pub fn pacing(mut self, base_delay_ms: u64, growth: f64) -> Self {
        self.delay_ms = base_delay_ms;
        self.growth = growth;
        self
    }

    /// Current pacing delay; only ever grows.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// GET `url` until the server answers with a success status, and return
    /// the body. Never gives up: a rate-limited site is expected to recover.
    /// Transport errors count as failed attempts.
    pub fn fetch_page(&mut self, url: &str) -> String {
        let mut attempt = self.transport.get(url);
        let mut wait = self.delay_ms;
        self.sleeper.sleep(Duration::from_millis(wait));

        loop {
            match attempt {
                Ok(resp) if resp.is_success() => return resp.body,
                Ok(resp) => logw!("GET {url} → {}; retrying in {}ms", resp.status, wait * 2),
                Err(e) => logw!("{e}; retrying in {}ms", wait * 2),
            }

            attempt = self.transport.get(url);
            wait = wait.saturating_mul(2);
            self.delay_ms = (self.delay_ms as f64 * self.growth).round() as u64;
            self.sleeper.sleep(Duration::from_millis(wait));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::{Response, TransportError};
    use std::collections::VecDeque;

    struct Canned(VecDeque<Result<Response, TransportError>>);

    impl Transport for Canned {
        fn get(&mut self, _url: &str) -> Result<Response, TransportError> {
            self.0.pop_front().expect("more requests than canned responses")
        }
    }

    #[derive(Default)]
    struct Recorded(Vec<u64>);

    impl Sleep for Recorded {
        fn sleep(&mut self, d: Duration) {
            self.0.push(d.as_millis() as u64);
        }
    }

    fn status(code: u16) -> Result<Response, TransportError> {
        Ok(Response { status: code, body: s!() })
    }

    #[test]
    fn success_pays_the_delay_once() {
        let t = Canned(VecDeque::from([Ok(Response::ok("hi"))]));
        let mut f = Fetcher::with_sleep(t, Recorded::default());
        assert_eq!(f.fetch_page("u"), "hi");
        assert_eq!(f.sleeper().0, vec![300]);
        assert_eq!(f.delay_ms(), 300);
    }

    #[test]
    fn two_failures_double_the_wait_and_grow_the_delay() {
        let t = Canned(VecDeque::from([status(429), status(503), Ok(Response::ok("body"))]));
        let mut f = Fetcher::with_sleep(t, Recorded::default());
        assert_eq!(f.fetch_page("u"), "body");
        assert_eq!(f.sleeper().0, vec![300, 600, 1200]);
        assert_eq!(f.delay_ms(), 432); // 300 → 360 → 432
    }

    #[test]
    fn transport_errors_are_retried_like_bad_statuses() {
        let err = Err(TransportError { url: s!("u"), message: s!("reset") });
        let t = Canned(VecDeque::from([err, Ok(Response::ok("x"))]));
        let mut f = Fetcher::with_sleep(t, Recorded::default()).pacing(100, 1.5);
        assert_eq!(f.fetch_page("u"), "x");
        assert_eq!(f.sleeper().0, vec![100, 200]);
        assert_eq!(f.delay_ms(), 150);
    }

    #[test]
    fn grown_delay_carries_into_the_next_call() {
        let t = Canned(VecDeque::from([status(500), Ok(Response::ok("a")), Ok(Response::ok("b"))]));
        let mut f = Fetcher::with_sleep(t, Recorded::default());
        f.fetch_page("a");
        f.fetch_page("b");
        assert_eq!(f.sleeper().0, vec![300, 600, 360]);
    }
}
