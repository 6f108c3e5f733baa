//! Animated text component
//!
//! [`TextFx`] splits its text into one leaf per character and drives all of
//! them with a single shared pose. The pose is built from four channels
//! (scale, rotate, translate, skew), each oscillating between its `from` and
//! `to` boundary. Every call to [`TextFx::render`]:
//!
//! 1. advances the leg state machine: if the leg is complete the direction
//!    flips and all four channels head for the opposite boundary
//! 2. samples the four channels at the clock's present time
//! 3. composes `scale · translate · rotate · skew`
//! 4. emits `base · composed` for each character, in text order
//!
//! Nothing runs between renders. Motion is a function of clock time only.
//!
//! # Example
//!
//! ```rust
//! use textfx_animation::ManualClock;
//! use textfx_widgets::{TextFx, TextFxOptions};
//!
//! let clock = ManualClock::new();
//! let mut fx = TextFx::with_clock(TextFxOptions::new("AB"), clock.clone());
//!
//! let frame = fx.render();
//! assert_eq!(frame.len(), 2);
//!
//! clock.advance_ms(16.0);
//! let frame = fx.render();
//! assert!(frame[0].transform.is_finite());
//! ```

use textfx_animation::{Clock, SystemClock, TransitionSpec, Transitionable};
use textfx_core::{Mat4, Vec3};
use tracing::{debug, trace, warn};

use crate::node::{CharacterNode, RenderNode, Surface, SurfaceSpec};
use crate::options::{Axis, Direction, LegCompletion, TextFxOptions, TextFxOptionsPatch};

/// Sampled values of the four channels at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelValues {
    pub scale: Vec3,
    pub rotate: Vec3,
    pub translate: Vec3,
    pub skew: Vec3,
}

impl ChannelValues {
    pub fn get(&self, axis: Axis) -> Vec3 {
        match axis {
            Axis::Scale => self.scale,
            Axis::Rotate => self.rotate,
            Axis::Translate => self.translate,
            Axis::Skew => self.skew,
        }
    }

    /// The shared pose: `scale · translate · rotate · skew`
    pub fn compose(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
            .mul(&Mat4::from_translation(self.translate))
            .mul(&Mat4::from_rotation(self.rotate))
            .mul(&Mat4::from_skew(self.skew))
    }
}

/// One character's output for a frame
#[derive(Clone, Debug, PartialEq)]
pub struct RenderEntry<T> {
    /// `base · composed`
    pub transform: Mat4,
    pub target: T,
}

/// Per-character text animation oscillating between two boundary poses
pub struct TextFx<N: RenderNode = Surface, C: Clock + Clone = SystemClock> {
    options: TextFxOptions,
    nodes: Vec<CharacterNode<N>>,
    /// Indexed by [`Axis::index`]
    channels: [Transitionable<C>; 4],
    direction: Direction,
    legs: u64,
}

impl TextFx {
    /// Create a component driven by wall-clock time
    pub fn new(options: TextFxOptions) -> Self {
        Self::with_clock(options, SystemClock::new())
    }
}

impl<C: Clock + Clone> TextFx<Surface, C> {
    /// Create a component driven by `clock`
    pub fn with_clock(options: TextFxOptions, clock: C) -> Self {
        Self::with_parts(options, clock, Surface::factory())
    }
}

impl<N: RenderNode, C: Clock + Clone> TextFx<N, C> {
    /// Create a component with a custom leaf factory.
    ///
    /// `factory` is called once per character, in text order.
    pub fn with_parts(
        options: TextFxOptions,
        clock: C,
        mut factory: impl FnMut(SurfaceSpec) -> N,
    ) -> Self {
        let nodes: Vec<_> = options
            .text
            .chars()
            .enumerate()
            .map(|(index, character)| {
                let spec = SurfaceSpec::centered(character, options.character_size);
                CharacterNode::new(index, character, options.spacing, factory(spec))
            })
            .collect();

        let boundaries = options.animation_boundaries;
        let channels =
            Axis::ALL.map(|axis| Transitionable::new(clock.clone(), boundaries.get(axis).from));

        debug!(
            text = %options.text,
            characters = nodes.len(),
            gate = %options.leg_completion,
            "TextFx created"
        );

        let mut fx = Self {
            options,
            nodes,
            channels,
            direction: Direction::ToTarget,
            legs: 0,
        };
        fx.set_animation(Some(Direction::ToTarget));
        fx
    }

    /// Flip the direction flag and return the new direction.
    ///
    /// Channels are left alone; the next leg picks the new direction up.
    pub fn reverse_direction(&mut self) -> Direction {
        self.direction = self.direction.reversed();
        self.direction
    }

    /// Start a leg toward `direction` with the configured transition.
    ///
    /// `None` continues in the current direction.
    pub fn set_animation(&mut self, direction: Option<Direction>) {
        self.set_animation_with(direction, None);
    }

    /// Start a leg with an explicit transition, falling back to the
    /// configured one.
    ///
    /// Channels in flight are halted where they are, then all four are
    /// retargeted in the same call so they stay in step.
    pub fn set_animation_with(
        &mut self,
        direction: Option<Direction>,
        transition: Option<TransitionSpec>,
    ) {
        let direction = direction.unwrap_or(self.direction);
        let transition = transition.unwrap_or(self.options.transition);
        self.direction = direction;

        for axis in Axis::ALL {
            let channel = &mut self.channels[axis.index()];
            if channel.is_active() {
                channel.halt();
            }
            let target = self.options.animation_boundaries.get(axis).get(direction);
            channel.set(target, &transition);
        }

        self.legs += 1;
        debug!(
            %direction,
            curve = %transition.curve,
            duration_ms = transition.duration_ms,
            leg = self.legs,
            "leg started"
        );
    }

    /// Whether the current leg has finished, according to the gate
    pub fn is_leg_complete(&self) -> bool {
        match self.options.leg_completion {
            LegCompletion::Channel(axis) => !self.channels[axis.index()].is_active(),
            LegCompletion::AllChannels => self.channels.iter().all(|c| !c.is_active()),
        }
    }

    /// Reverse and start the next leg if the current one is complete.
    ///
    /// Returns whether a new leg was started.
    pub fn advance_leg(&mut self) -> bool {
        if !self.is_leg_complete() {
            return false;
        }
        let finished = self.direction;
        let next = self.reverse_direction();
        debug!(%finished, %next, leg = self.legs, "leg complete, reversing");
        self.set_animation(Some(next));
        true
    }

    /// Channel values at the clock's present time
    pub fn channel_values(&self) -> ChannelValues {
        ChannelValues {
            scale: self.channels[Axis::Scale.index()].get(),
            rotate: self.channels[Axis::Rotate.index()].get(),
            translate: self.channels[Axis::Translate.index()].get(),
            skew: self.channels[Axis::Skew.index()].get(),
        }
    }

    /// Produce this frame's entries, one per character in text order.
    ///
    /// Advances the leg state machine first, so a leg that finished since
    /// the last frame is already reversed in the values sampled here.
    pub fn render(&mut self) -> Vec<RenderEntry<N::Target>> {
        self.advance_leg();

        let composed = self.channel_values().compose();
        let entries: Vec<_> = self
            .nodes
            .iter()
            .map(|node| RenderEntry {
                transform: node.base_transform().mul(&composed),
                target: node.render(),
            })
            .collect();

        trace!(entries = entries.len(), direction = %self.direction, "TextFx rendered");
        entries
    }

    /// Merge `patch` into the options used by future legs.
    ///
    /// Channels already in flight are untouched. Text, spacing and
    /// character size are fixed at construction and ignored here.
    pub fn set_options(&mut self, patch: &TextFxOptionsPatch) {
        let mut patch = patch.clone();
        if patch.requires_rebuild() {
            warn!(
                text = patch.text.is_some(),
                spacing = patch.spacing.is_some(),
                character_size = patch.character_size.is_some(),
                "TextFx layout options need a new component; ignoring them"
            );
            patch.text = None;
            patch.spacing = None;
            patch.character_size = None;
        }
        self.options.apply(&patch);
        debug!(
            curve = %self.options.transition.curve,
            duration_ms = self.options.transition.duration_ms,
            "TextFx options updated"
        );
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn text(&self) -> &str {
        &self.options.text
    }

    pub fn options(&self) -> &TextFxOptions {
        &self.options
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn character_nodes(&self) -> &[CharacterNode<N>] {
        &self.nodes
    }

    pub fn channel(&self, axis: Axis) -> &Transitionable<C> {
        &self.channels[axis.index()]
    }

    /// Legs started since construction, the first one included
    pub fn leg_count(&self) -> u64 {
        self.legs
    }
}

impl<N, C> std::fmt::Debug for TextFx<N, C>
where
    N: RenderNode + std::fmt::Debug,
    C: Clock + Clone + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFx")
            .field("text", &self.options.text)
            .field("direction", &self.direction)
            .field("legs", &self.legs)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use textfx_animation::{Easing, ManualClock};

    struct Glyph(String);

    impl RenderNode for Glyph {
        type Target = String;

        fn render(&self) -> String {
            self.0.clone()
        }
    }

    fn linear_options(text: &str, ms: u32) -> TextFxOptions {
        TextFxOptions::new(text).with_transition(TransitionSpec::new(Easing::Linear, ms))
    }

    #[test]
    fn test_construction_starts_first_leg() {
        let clock = ManualClock::new();
        let fx = TextFx::with_clock(TextFxOptions::new("hey"), clock);

        assert_eq!(fx.len(), 3);
        assert_eq!(fx.direction(), Direction::ToTarget);
        assert_eq!(fx.leg_count(), 1);

        let values = fx.channel_values();
        assert_eq!(values.scale, Vec3::ONE);
        assert_eq!(values.translate, Vec3::splat(-10.0));

        assert!(fx.channel(Axis::Scale).is_active());
        assert_eq!(fx.channel(Axis::Rotate).target(), Vec3::splat(FRAC_PI_2));
        // skew boundaries are equal by default, so it never moves
        assert!(!fx.channel(Axis::Skew).is_active());
    }

    #[test]
    fn test_reverse_direction_twice_is_identity() {
        let mut fx = TextFx::with_clock(TextFxOptions::default(), ManualClock::new());
        let before = fx.direction();
        assert_eq!(fx.reverse_direction(), Direction::ToOrigin);
        assert_eq!(fx.reverse_direction(), before);
        assert_eq!(fx.leg_count(), 1);
    }

    #[test]
    fn test_set_animation_without_direction_continues() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_clock(linear_options("a", 100), clock);
        fx.reverse_direction();
        fx.set_animation(None);

        assert_eq!(fx.direction(), Direction::ToOrigin);
        // already at `from`, so nothing moves
        assert!(!fx.channel(Axis::Scale).is_active());
    }

    #[test]
    fn test_set_animation_halts_in_flight_channels() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_clock(linear_options("a", 100), clock.clone());
        clock.advance_ms(40.0);

        fx.set_animation(Some(Direction::ToOrigin));
        let values = fx.channel_values();
        assert!((values.scale.x - 0.8).abs() < 1e-5);
        assert!((values.translate.x - -2.0).abs() < 1e-4);

        clock.advance_ms(50.0);
        let values = fx.channel_values();
        assert!((values.scale.x - 0.9).abs() < 1e-5);
        assert_eq!(fx.channel(Axis::Scale).target(), Vec3::ONE);
    }

    #[test]
    fn test_set_animation_with_explicit_transition() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_clock(TextFxOptions::new("a"), clock.clone());
        fx.set_animation_with(
            Some(Direction::ToOrigin),
            Some(TransitionSpec::new(Easing::Linear, 20)),
        );
        fx.set_animation_with(
            Some(Direction::ToTarget),
            Some(TransitionSpec::new(Easing::Linear, 20)),
        );

        clock.advance_ms(20.0);
        assert!(!fx.channel(Axis::Scale).is_active());
        assert_eq!(fx.channel_values().scale, Vec3::splat(0.5));
        // the configured transition is untouched
        assert_eq!(fx.options().transition, TransitionSpec::default());
    }

    #[test]
    fn test_advance_leg_waits_for_gate() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_clock(linear_options("a", 100), clock.clone());

        assert!(!fx.advance_leg());
        clock.advance_ms(100.0);
        assert!(fx.is_leg_complete());
        assert!(fx.advance_leg());
        assert_eq!(fx.direction(), Direction::ToOrigin);
        assert_eq!(fx.leg_count(), 2);
        assert_eq!(fx.channel(Axis::Translate).target(), Vec3::splat(-10.0));
    }

    #[test]
    fn test_gate_on_idle_channel_flips_every_frame() {
        let clock = ManualClock::new();
        let options = linear_options("a", 100)
            .with_leg_completion(LegCompletion::Channel(Axis::Skew));
        let mut fx = TextFx::with_clock(options, clock);

        fx.render();
        assert_eq!(fx.direction(), Direction::ToOrigin);
        fx.render();
        assert_eq!(fx.direction(), Direction::ToTarget);
    }

    #[test]
    fn test_all_channels_gate_waits_for_slowest() {
        let clock = ManualClock::new();
        let options = linear_options("a", 100)
            .with_leg_completion(LegCompletion::AllChannels)
            .with_skew(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0));
        let mut fx = TextFx::with_clock(options, clock.clone());

        clock.advance_ms(99.0);
        assert!(!fx.is_leg_complete());
        clock.advance_ms(1.0);
        assert!(fx.is_leg_complete());
    }

    #[test]
    fn test_set_options_applies_to_next_leg_only() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_clock(linear_options("ab", 100), clock.clone());

        let patch = TextFxOptionsPatch::new()
            .text("something else")
            .axis(Axis::Scale, Vec3::ONE, Vec3::splat(2.0));
        fx.set_options(&patch);

        assert_eq!(fx.text(), "ab");
        assert_eq!(fx.len(), 2);
        // running leg still heads for the old target
        assert_eq!(fx.channel(Axis::Scale).target(), Vec3::splat(0.5));

        clock.advance_ms(100.0);
        fx.render();
        fx.set_animation(Some(Direction::ToTarget));
        assert_eq!(fx.channel(Axis::Scale).target(), Vec3::splat(2.0));
    }

    #[test]
    fn test_compose_order() {
        let values = ChannelValues {
            scale: Vec3::splat(2.0),
            rotate: Vec3::new(0.0, 0.0, FRAC_PI_2),
            translate: Vec3::new(1.0, 0.0, 0.0),
            skew: Vec3::ZERO,
        };
        let expected = Mat4::scale(2.0, 2.0, 2.0)
            .mul(&Mat4::translation(1.0, 0.0, 0.0))
            .mul(&Mat4::rotation(0.0, 0.0, FRAC_PI_2));
        assert!(values.compose().approx_eq(&expected, 1e-6));

        // translate is scaled, rotation is applied to the point first
        let p = values.compose().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Vec3::new(2.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn test_custom_leaf_factory() {
        let clock = ManualClock::new();
        let mut fx = TextFx::with_parts(TextFxOptions::new("héllo"), clock, |spec| {
            Glyph(spec.content)
        });

        let frame = fx.render();
        let text: String = frame.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(text, "héllo");
        assert_eq!(fx.character_nodes()[1].character(), 'é');
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let mut fx = TextFx::with_clock(TextFxOptions::new(""), ManualClock::new());
        assert!(fx.is_empty());
        assert!(fx.render().is_empty());
    }
}
