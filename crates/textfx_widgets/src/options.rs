//! TextFX configuration
//!
//! [`TextFxOptions`] is the complete, resolved configuration of one
//! component. [`TextFxOptionsPatch`] is the partial form: every field is
//! optional and merging is deep, so a patch that only names
//! `animationBoundaries.scale.to` leaves every other value alone.
//!
//! Textual options (TOML or JSON) are read as a patch over the defaults, so
//! any key left out of a file keeps its default value.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use textfx_animation::TransitionSpec;
use textfx_core::{Size, Vec3};

use crate::error::{OptionsError, Result};

/// Text shown when no text is configured
pub const DEFAULT_TEXT: &str = "the default text";

/// Horizontal distance between consecutive characters
pub const DEFAULT_SPACING: f32 = 15.0;

/// Size of every character leaf
pub const DEFAULT_CHARACTER_SIZE: Size = Size::new(30.0, 30.0);

/// Which boundary the channels are moving toward
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the `to` boundary
    #[default]
    #[serde(rename = "to")]
    ToTarget,
    /// Back toward the `from` boundary
    #[serde(rename = "from")]
    ToOrigin,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::ToTarget => Direction::ToOrigin,
            Direction::ToOrigin => Direction::ToTarget,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ToTarget => "to",
            Direction::ToOrigin => "from",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four animated transform channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Scale,
    Rotate,
    Translate,
    Skew,
}

impl Axis {
    /// All channels, in composition order
    pub const ALL: [Axis; 4] = [Axis::Scale, Axis::Rotate, Axis::Translate, Axis::Skew];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Scale => "scale",
            Axis::Rotate => "rotate",
            Axis::Translate => "translate",
            Axis::Skew => "skew",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `from` and `to` poses of one channel
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBoundary {
    pub from: Vec3,
    pub to: Vec3,
}

impl AxisBoundary {
    pub const fn new(from: Vec3, to: Vec3) -> Self {
        Self { from, to }
    }

    /// A boundary whose poses are equal, so the channel never moves
    pub const fn fixed(value: Vec3) -> Self {
        Self::new(value, value)
    }

    /// The pose a channel heads to when moving in `direction`
    pub fn get(&self, direction: Direction) -> Vec3 {
        match direction {
            Direction::ToTarget => self.to,
            Direction::ToOrigin => self.from,
        }
    }
}

/// Boundary poses for all four channels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationBoundaries {
    pub scale: AxisBoundary,
    pub rotate: AxisBoundary,
    pub translate: AxisBoundary,
    pub skew: AxisBoundary,
}

impl Default for AnimationBoundaries {
    fn default() -> Self {
        Self {
            scale: AxisBoundary::new(Vec3::ONE, Vec3::splat(0.5)),
            rotate: AxisBoundary::new(Vec3::ZERO, Vec3::splat(FRAC_PI_2)),
            translate: AxisBoundary::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
            skew: AxisBoundary::fixed(Vec3::ZERO),
        }
    }
}

impl AnimationBoundaries {
    pub fn get(&self, axis: Axis) -> &AxisBoundary {
        match axis {
            Axis::Scale => &self.scale,
            Axis::Rotate => &self.rotate,
            Axis::Translate => &self.translate,
            Axis::Skew => &self.skew,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut AxisBoundary {
        match axis {
            Axis::Scale => &mut self.scale,
            Axis::Rotate => &mut self.rotate,
            Axis::Translate => &mut self.translate,
            Axis::Skew => &mut self.skew,
        }
    }
}

/// Decides when a leg has finished and the direction should flip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LegCompletion {
    /// The leg ends when this channel stops moving
    Channel(Axis),
    /// The leg ends when every channel has stopped moving
    AllChannels,
}

impl Default for LegCompletion {
    fn default() -> Self {
        LegCompletion::Channel(Axis::Scale)
    }
}

impl FromStr for LegCompletion {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LegCompletion::AllChannels),
            "scale" => Ok(LegCompletion::Channel(Axis::Scale)),
            "rotate" => Ok(LegCompletion::Channel(Axis::Rotate)),
            "translate" => Ok(LegCompletion::Channel(Axis::Translate)),
            "skew" => Ok(LegCompletion::Channel(Axis::Skew)),
            _ => Err(OptionsError::UnknownGate(s.to_string())),
        }
    }
}

impl TryFrom<String> for LegCompletion {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for LegCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegCompletion::Channel(axis) => fmt::Display::fmt(axis, f),
            LegCompletion::AllChannels => f.write_str("all"),
        }
    }
}

impl From<LegCompletion> for String {
    fn from(gate: LegCompletion) -> Self {
        gate.to_string()
    }
}

/// Resolved configuration of a [`TextFx`](crate::TextFx)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TextFxOptionsPatch")]
pub struct TextFxOptions {
    /// Text split into one animated leaf per character
    pub text: String,
    /// Horizontal distance between consecutive characters
    pub spacing: f32,
    /// Size of every character leaf
    pub character_size: Size,
    /// When a leg counts as finished
    pub leg_completion: LegCompletion,
    // tables last so the TOML form stays valid
    /// Curve and duration shared by every channel of a leg
    pub transition: TransitionSpec,
    /// `from`/`to` poses of the four channels
    pub animation_boundaries: AnimationBoundaries,
}

impl Default for TextFxOptions {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            spacing: DEFAULT_SPACING,
            character_size: DEFAULT_CHARACTER_SIZE,
            leg_completion: LegCompletion::default(),
            transition: TransitionSpec::default(),
            animation_boundaries: AnimationBoundaries::default(),
        }
    }
}

impl TextFxOptions {
    /// Default options with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Load options from TOML; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load options from JSON; missing keys keep their defaults
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deep-merge `patch` into these options
    pub fn apply(&mut self, patch: &TextFxOptionsPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(transition) = &patch.transition {
            transition.apply_to(&mut self.transition);
        }
        if let Some(boundaries) = &patch.animation_boundaries {
            boundaries.apply_to(&mut self.animation_boundaries);
        }
        if let Some(spacing) = patch.spacing {
            self.spacing = spacing;
        }
        if let Some(size) = patch.character_size {
            self.character_size = size;
        }
        if let Some(gate) = patch.leg_completion {
            self.leg_completion = gate;
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_boundaries(mut self, boundaries: AnimationBoundaries) -> Self {
        self.animation_boundaries = boundaries;
        self
    }

    /// Set the poses of a single channel
    pub fn with_axis(mut self, axis: Axis, from: Vec3, to: Vec3) -> Self {
        *self.animation_boundaries.get_mut(axis) = AxisBoundary::new(from, to);
        self
    }

    pub fn with_scale(self, from: Vec3, to: Vec3) -> Self {
        self.with_axis(Axis::Scale, from, to)
    }

    pub fn with_rotate(self, from: Vec3, to: Vec3) -> Self {
        self.with_axis(Axis::Rotate, from, to)
    }

    pub fn with_translate(self, from: Vec3, to: Vec3) -> Self {
        self.with_axis(Axis::Translate, from, to)
    }

    pub fn with_skew(self, from: Vec3, to: Vec3) -> Self {
        self.with_axis(Axis::Skew, from, to)
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_character_size(mut self, size: Size) -> Self {
        self.character_size = size;
        self
    }

    pub fn with_leg_completion(mut self, gate: LegCompletion) -> Self {
        self.leg_completion = gate;
        self
    }
}

impl From<TextFxOptionsPatch> for TextFxOptions {
    fn from(patch: TextFxOptionsPatch) -> Self {
        let mut options = TextFxOptions::default();
        options.apply(&patch);
        options
    }
}

/// Partial [`TransitionSpec`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<textfx_animation::Curve>,
    #[serde(default, rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

impl TransitionPatch {
    fn apply_to(&self, spec: &mut TransitionSpec) {
        if let Some(curve) = self.curve {
            spec.curve = curve;
        }
        if let Some(duration_ms) = self.duration_ms {
            spec.duration_ms = duration_ms;
        }
    }
}

impl From<TransitionSpec> for TransitionPatch {
    fn from(spec: TransitionSpec) -> Self {
        Self {
            curve: Some(spec.curve),
            duration_ms: Some(spec.duration_ms),
        }
    }
}

/// Partial [`AxisBoundary`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBoundaryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec3>,
}

impl From<AxisBoundary> for AxisBoundaryPatch {
    fn from(boundary: AxisBoundary) -> Self {
        Self {
            from: Some(boundary.from),
            to: Some(boundary.to),
        }
    }
}

/// Partial [`AnimationBoundaries`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundariesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisBoundaryPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<AxisBoundaryPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<AxisBoundaryPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew: Option<AxisBoundaryPatch>,
}

impl BoundariesPatch {
    fn get(&self, axis: Axis) -> Option<&AxisBoundaryPatch> {
        match axis {
            Axis::Scale => self.scale.as_ref(),
            Axis::Rotate => self.rotate.as_ref(),
            Axis::Translate => self.translate.as_ref(),
            Axis::Skew => self.skew.as_ref(),
        }
    }

    fn apply_to(&self, boundaries: &mut AnimationBoundaries) {
        for axis in Axis::ALL {
            let Some(patch) = self.get(axis) else {
                continue;
            };
            let target = boundaries.get_mut(axis);
            if let Some(from) = patch.from {
                target.from = from;
            }
            if let Some(to) = patch.to {
                target.to = to;
            }
        }
    }
}

impl From<AnimationBoundaries> for BoundariesPatch {
    fn from(b: AnimationBoundaries) -> Self {
        Self {
            scale: Some(b.scale.into()),
            rotate: Some(b.rotate.into()),
            translate: Some(b.translate.into()),
            skew: Some(b.skew.into()),
        }
    }
}

/// Partial [`TextFxOptions`], merged deeply by [`TextFxOptions::apply`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFxOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_boundaries: Option<BoundariesPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_completion: Option<LegCompletion>,
}

impl TextFxOptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Whether the patch touches values fixed at construction
    pub fn requires_rebuild(&self) -> bool {
        self.text.is_some() || self.spacing.is_some() || self.character_size.is_some()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = Some(transition.into());
        self
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.transition.get_or_insert_with(Default::default).duration_ms = Some(duration_ms);
        self
    }

    pub fn curve(mut self, curve: impl Into<textfx_animation::Curve>) -> Self {
        self.transition.get_or_insert_with(Default::default).curve = Some(curve.into());
        self
    }

    /// Replace both poses of one channel
    pub fn axis(mut self, axis: Axis, from: Vec3, to: Vec3) -> Self {
        let boundaries = self.animation_boundaries.get_or_insert_with(Default::default);
        let slot = match axis {
            Axis::Scale => &mut boundaries.scale,
            Axis::Rotate => &mut boundaries.rotate,
            Axis::Translate => &mut boundaries.translate,
            Axis::Skew => &mut boundaries.skew,
        };
        *slot = Some(AxisBoundary::new(from, to).into());
        self
    }

    pub fn leg_completion(mut self, gate: LegCompletion) -> Self {
        self.leg_completion = Some(gate);
        self
    }
}
