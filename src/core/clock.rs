use instant::Instant;
use std::time::Duration;

/// Elapsed time between frames, capped so a backgrounded tab or a stall
/// produces one bounded step instead of a jump.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    cap_sec: f32,
}

impl FrameClock {
    pub fn new(cap_sec: f32) -> Self {
        Self {
            last: None,
            cap_sec,
        }
    }

    /// Seconds since the previous call, at most the cap. The first call returns 0.
    pub fn advance(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => capped_dt(now - last, self.cap_sec),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}

#[inline]
pub fn capped_dt(elapsed: Duration, cap_sec: f32) -> f32 {
    elapsed.as_secs_f32().min(cap_sec)
}
