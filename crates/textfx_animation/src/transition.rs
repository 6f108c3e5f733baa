//! Transition specs: a curve plus a duration
//!
//! Curves are written as strings in configuration. Easing names resolve
//! through [`Easing`]'s parser; springs use `spring`, `spring:<preset>`
//! (`gentle`, `wobbly`, `stiff`, `snappy`), or
//! `spring(<stiffness>, <damping>, <mass>)` for any other config.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::easing::{normalize_name, parse_args, split_call, Easing};
use crate::error::CurveParseError;
use crate::spring::SpringConfig;

/// How a leg moves from its start value to its target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Curve {
    /// Tweened over the transition's duration
    Easing(Easing),
    /// Runs until the spring settles; the transition's duration is ignored
    Spring(SpringConfig),
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Easing(Easing::EaseOutBounce)
    }
}

impl Curve {
    /// How long a leg with this curve runs, in milliseconds
    pub fn leg_ms(&self, duration_ms: u32) -> f64 {
        match self {
            Curve::Easing(_) => duration_ms as f64,
            Curve::Spring(config) => config.settle_secs() * 1000.0,
        }
    }

    /// Eased progress at `elapsed_ms` into a leg
    pub fn progress(&self, elapsed_ms: f64, duration_ms: u32) -> f32 {
        self.progress_in_leg(elapsed_ms, self.leg_ms(duration_ms))
    }

    /// Eased progress when the leg length is already known
    pub fn progress_in_leg(&self, elapsed_ms: f64, leg_ms: f64) -> f32 {
        if leg_ms <= 0.0 || elapsed_ms >= leg_ms {
            return 1.0;
        }
        let elapsed_ms = elapsed_ms.max(0.0);
        match self {
            Curve::Easing(easing) => easing.apply((elapsed_ms / leg_ms) as f32),
            Curve::Spring(config) => config.progress(elapsed_ms / 1000.0, leg_ms / 1000.0),
        }
    }

    /// Whether sampled values can leave the segment between start and target
    pub fn overshoots(&self) -> bool {
        match self {
            Curve::Easing(easing) => easing.overshoots(),
            Curve::Spring(config) => config.overshoots(),
        }
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        Curve::Easing(easing)
    }
}

impl From<SpringConfig> for Curve {
    fn from(config: SpringConfig) -> Self {
        Curve::Spring(config)
    }
}

impl FromStr for Curve {
    type Err = CurveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((name, args)) = split_call(trimmed) {
            if name == "spring" {
                return parse_spring(args)
                    .map(Curve::Spring)
                    .ok_or_else(|| CurveParseError::InvalidSpring(s.to_string()));
            }
        }
        if let Some(rest) = trimmed.strip_prefix("spring") {
            let preset = match rest.strip_prefix(':') {
                Some(name) => normalize_name(name),
                None if rest.is_empty() => "default".to_string(),
                None => return Err(CurveParseError::UnknownCurve(s.to_string())),
            };
            return SpringConfig::preset(&preset)
                .map(Curve::Spring)
                .ok_or_else(|| CurveParseError::UnknownSpringPreset(preset));
        }
        trimmed.parse::<Easing>().map(Curve::Easing)
    }
}

/// `stiffness, damping[, mass]`, all finite and non-negative
fn parse_spring(args: &str) -> Option<SpringConfig> {
    let values = parse_args(args)?;
    if values.iter().any(|v| *v < 0.0) {
        return None;
    }
    match values.as_slice() {
        [stiffness, damping] => Some(SpringConfig::new(*stiffness, *damping, 1.0)),
        [stiffness, damping, mass] => Some(SpringConfig::new(*stiffness, *damping, *mass)),
        _ => None,
    }
}

impl TryFrom<String> for Curve {
    type Error = CurveParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Easing(easing) => fmt::Display::fmt(easing, f),
            Curve::Spring(config) => match config.preset_name() {
                Some("default") => f.write_str("spring"),
                Some(name) => write!(f, "spring:{name}"),
                None => write!(
                    f,
                    "spring({}, {}, {})",
                    config.stiffness, config.damping, config.mass
                ),
            },
        }
    }
}

impl From<Curve> for String {
    fn from(curve: Curve) -> Self {
        curve.to_string()
    }
}

/// A curve plus a duration, shared by every channel of a leg
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    pub curve: Curve,
    /// Milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u32,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            curve: Curve::default(),
            duration_ms: 500,
        }
    }
}

impl TransitionSpec {
    pub fn new(curve: impl Into<Curve>, duration_ms: u32) -> Self {
        Self {
            curve: curve.into(),
            duration_ms,
        }
    }

    /// A transition that lands on its target immediately
    pub fn instant() -> Self {
        Self::new(Easing::Linear, 0)
    }

    pub fn with_curve(mut self, curve: impl Into<Curve>) -> Self {
        self.curve = curve.into();
        self
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// How long a leg with this spec runs, in milliseconds
    pub fn leg_ms(&self) -> f64 {
        self.curve.leg_ms(self.duration_ms)
    }

    /// Eased progress at `elapsed_ms` into a leg
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        self.curve.progress(elapsed_ms, self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_bounce_500() {
        let spec = TransitionSpec::default();
        assert_eq!(spec.curve, Curve::Easing(Easing::EaseOutBounce));
        assert_eq!(spec.duration_ms, 500);
        assert_eq!(spec.leg_ms(), 500.0);
    }

    #[test]
    fn test_parse_spring_curves() {
        assert_eq!("spring".parse::<Curve>(), Ok(Curve::Spring(SpringConfig::default())));
        assert_eq!("spring:wobbly".parse::<Curve>(), Ok(Curve::Spring(SpringConfig::wobbly())));
        assert_eq!(
            "spring:bouncy".parse::<Curve>(),
            Err(CurveParseError::UnknownSpringPreset("bouncy".to_string()))
        );
        assert!("springy".parse::<Curve>().is_err());
    }

    #[test]
    fn test_curve_display() {
        assert_eq!(Curve::default().to_string(), "easeOutBounce");
        assert_eq!(Curve::Spring(SpringConfig::default()).to_string(), "spring");
        assert_eq!(Curve::Spring(SpringConfig::stiff()).to_string(), "spring:stiff");
        assert_eq!(
            Curve::Spring(SpringConfig::new(300.0, 5.0, 2.0)).to_string(),
            "spring(300, 5, 2)"
        );
    }

    #[test]
    fn test_custom_spring_survives_its_name() {
        let custom = Curve::Spring(SpringConfig::new(300.0, 5.5, 0.75));
        assert_eq!(custom.to_string().parse::<Curve>(), Ok(custom));
        assert_eq!(
            "spring(250, 18)".parse::<Curve>(),
            Ok(Curve::Spring(SpringConfig::new(250.0, 18.0, 1.0)))
        );
        assert!(matches!(
            "spring(250, -1, 1)".parse::<Curve>(),
            Err(CurveParseError::InvalidSpring(_))
        ));
        assert!(matches!(
            "spring(1)".parse::<Curve>(),
            Err(CurveParseError::InvalidSpring(_))
        ));
    }

    #[test]
    fn test_progress_clamps_to_leg() {
        let spec = TransitionSpec::new(Easing::Linear, 200);
        assert_eq!(spec.progress(-10.0), 0.0);
        assert_eq!(spec.progress(50.0), 0.25);
        assert_eq!(spec.progress(200.0), 1.0);
        assert_eq!(spec.progress(1000.0), 1.0);
        assert_eq!(TransitionSpec::instant().progress(0.0), 1.0);
    }

    #[test]
    fn test_spring_leg_ignores_duration() {
        let spec = TransitionSpec::new(SpringConfig::snappy(), 10);
        assert!(spec.leg_ms() > 10.0);
        assert!(spec.progress(5.0) < 1.0);
    }

    #[test]
    fn test_serde_uses_curve_names() {
        let spec: TransitionSpec =
            serde_json::from_str(r#"{"curve": "ease-in-out", "duration": 250}"#).unwrap();
        assert_eq!(spec, TransitionSpec::new(Easing::EaseInOut, 250));

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"curve":"easeInOut","duration":250}"#);

        let err = serde_json::from_str::<TransitionSpec>(r#"{"curve": "wiggle"}"#);
        assert!(err.is_err());
    }
}
