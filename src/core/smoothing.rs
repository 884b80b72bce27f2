/// One-pole low-pass follower used to glide audio parameters towards their
/// targets without clicks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed {
    pub value: f32,
    pub tau_sec: f32,
}

impl Smoothed {
    pub fn new(value: f32, tau_sec: f32) -> Self {
        Self { value, tau_sec }
    }

    /// Move towards `target` by the fraction `1 - e^(-dt/tau)` and return the
    /// new value. A non-positive tau snaps.
    #[inline]
    pub fn approach(&mut self, target: f32, dt_sec: f32) -> f32 {
        let alpha = smoothing_alpha(dt_sec, self.tau_sec);
        self.value += (target - self.value) * alpha;
        self.value
    }
}

#[inline]
pub fn smoothing_alpha(dt_sec: f32, tau_sec: f32) -> f32 {
    if tau_sec <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt_sec.max(0.0) / tau_sec).exp()
}
