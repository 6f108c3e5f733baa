//! Time-sampled transitionable values
//!
//! A [`Transitionable`] moves a [`Vec3`] from where it currently is toward a
//! target over one leg. It never steps itself: [`Transitionable::get`] and
//! [`Transitionable::is_active`] evaluate the leg's curve at the clock's
//! current time, so sampling is read-only and any number of samples per
//! frame agree with each other.

use textfx_core::Vec3;

use crate::clock::Clock;
use crate::transition::{Curve, TransitionSpec};

/// A multi-component value that interpolates toward a target over time
#[derive(Clone, Debug)]
pub struct Transitionable<C: Clock> {
    clock: C,
    start_value: Vec3,
    end_value: Vec3,
    start_ms: f64,
    /// Cached at `set` so springs don't re-solve their settle time per sample
    leg_ms: f64,
    curve: Curve,
    active: bool,
}

impl<C: Clock> Transitionable<C> {
    /// Create a transitionable resting at `value`
    pub fn new(clock: C, value: Vec3) -> Self {
        let start_ms = clock.now_ms();
        Self {
            clock,
            start_value: value,
            end_value: value,
            start_ms,
            leg_ms: 0.0,
            curve: Curve::default(),
            active: false,
        }
    }

    /// Start moving from the current value toward `target`.
    ///
    /// A target equal to the current value, or a leg of zero length, lands
    /// immediately and leaves the transitionable inactive.
    pub fn set(&mut self, target: Vec3, transition: &TransitionSpec) {
        let now = self.clock.now_ms();
        let current = self.sample_at(now);

        self.start_value = current;
        self.end_value = target;
        self.start_ms = now;
        self.curve = transition.curve;
        self.leg_ms = transition.leg_ms();
        self.active = current != target && self.leg_ms > 0.0;

        if !self.active {
            self.start_value = target;
        }

        tracing::trace!(
            from = ?current,
            to = ?target,
            curve = %self.curve,
            leg_ms = self.leg_ms,
            active = self.active,
            "transitionable set"
        );
    }

    /// Jump straight to `value`, cancelling any leg in flight
    pub fn reset(&mut self, value: Vec3) {
        self.start_value = value;
        self.end_value = value;
        self.start_ms = self.clock.now_ms();
        self.leg_ms = 0.0;
        self.active = false;
    }

    /// Current value at the clock's present time
    pub fn get(&self) -> Vec3 {
        self.sample_at(self.clock.now_ms())
    }

    /// Whether a leg is still in flight at the clock's present time
    pub fn is_active(&self) -> bool {
        self.active && self.clock.now_ms() - self.start_ms < self.leg_ms
    }

    /// Freeze at the present value and drop the pending target
    pub fn halt(&mut self) {
        let value = self.get();
        tracing::trace!(at = ?value, target = ?self.end_value, "transitionable halted");
        self.reset(value);
    }

    /// Target of the current (or last) leg
    pub fn target(&self) -> Vec3 {
        self.end_value
    }

    /// Curve of the current (or last) leg
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Eased progress of the current leg, 1.0 once it has landed
    pub fn progress(&self) -> f32 {
        if !self.active {
            return 1.0;
        }
        self.curve
            .progress_in_leg(self.clock.now_ms() - self.start_ms, self.leg_ms)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn sample_at(&self, now_ms: f64) -> Vec3 {
        if !self.active {
            return self.end_value;
        }
        let elapsed = now_ms - self.start_ms;
        if elapsed >= self.leg_ms {
            return self.end_value;
        }
        let t = self.curve.progress_in_leg(elapsed, self.leg_ms);
        self.start_value.lerp(self.end_value, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::easing::Easing;
    use crate::spring::SpringConfig;

    fn linear(ms: u32) -> TransitionSpec {
        TransitionSpec::new(Easing::Linear, ms)
    }

    #[test]
    fn test_new_is_at_rest() {
        let clock = ManualClock::new();
        let t = Transitionable::new(clock, Vec3::ONE);
        assert_eq!(t.get(), Vec3::ONE);
        assert!(!t.is_active());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_linear_leg_progresses_with_clock() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        t.set(Vec3::new(10.0, 20.0, -10.0), &linear(100));

        assert!(t.is_active());
        assert_eq!(t.get(), Vec3::ZERO);

        clock.advance_ms(25.0);
        assert_eq!(t.get(), Vec3::new(2.5, 5.0, -2.5));
        assert_eq!(t.progress(), 0.25);

        clock.advance_ms(75.0);
        assert!(!t.is_active());
        assert_eq!(t.get(), Vec3::new(10.0, 20.0, -10.0));
    }

    #[test]
    fn test_sampling_does_not_mutate() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        t.set(Vec3::splat(4.0), &linear(40));
        clock.advance_ms(10.0);
        assert_eq!(t.get(), t.get());
        assert!(t.is_active() && t.is_active());
    }

    #[test]
    fn test_equal_target_lands_immediately() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock, Vec3::ONE);
        t.set(Vec3::ONE, &linear(500));
        assert!(!t.is_active());
        assert_eq!(t.get(), Vec3::ONE);
    }

    #[test]
    fn test_zero_duration_lands_immediately() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock, Vec3::ZERO);
        t.set(Vec3::ONE, &TransitionSpec::instant());
        assert!(!t.is_active());
        assert_eq!(t.get(), Vec3::ONE);
    }

    #[test]
    fn test_halt_freezes_present_value() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        t.set(Vec3::splat(8.0), &linear(80));
        clock.advance_ms(20.0);
        t.halt();

        assert!(!t.is_active());
        assert_eq!(t.get(), Vec3::splat(2.0));
        assert_eq!(t.target(), Vec3::splat(2.0));

        clock.advance_ms(100.0);
        assert_eq!(t.get(), Vec3::splat(2.0));
    }

    #[test]
    fn test_retarget_mid_flight_starts_from_present_value() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        t.set(Vec3::splat(10.0), &linear(100));
        clock.advance_ms(50.0);

        t.set(Vec3::ZERO, &linear(100));
        assert_eq!(t.get(), Vec3::splat(5.0));

        clock.advance_ms(50.0);
        assert_eq!(t.get(), Vec3::splat(2.5));
    }

    #[test]
    fn test_bounce_leg_stays_between_endpoints() {
        let clock = ManualClock::new();
        let from = Vec3::ONE;
        let to = Vec3::splat(0.5);
        let mut t = Transitionable::new(clock.clone(), from);
        t.set(to, &TransitionSpec::default());

        for _ in 0..40 {
            clock.advance_ms(16.0);
            assert!(t.get().is_between(from, to, 1e-5), "{:?}", t.get());
        }
        assert!(!t.is_active());
        assert_eq!(t.get(), to);
    }

    #[test]
    fn test_spring_leg_lands_on_target() {
        let clock = ManualClock::new();
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        let spec = TransitionSpec::new(SpringConfig::snappy(), 0);
        t.set(Vec3::ONE, &spec);
        assert!(t.is_active());

        clock.advance_ms(spec.leg_ms() + 1.0);
        assert!(!t.is_active());
        assert_eq!(t.get(), Vec3::ONE);
    }

    #[test]
    fn test_clock_moving_backwards_clamps_to_start() {
        let clock = ManualClock::starting_at(100.0);
        let mut t = Transitionable::new(clock.clone(), Vec3::ZERO);
        t.set(Vec3::ONE, &linear(100));
        clock.set_ms(50.0);
        assert_eq!(t.get(), Vec3::ZERO);
        assert!(t.is_active());
    }
}
