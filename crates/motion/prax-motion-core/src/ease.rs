//! Easing curves.
//!
//! Names follow the tween-library convention used across the site
//! (`power3.out`, `back.out(1.7)`, `elastic.out(1, 0.5)`), so configs can be
//! written as strings. Every curve maps [0, 1] to a value that is exactly 0
//! at t = 0 and exactly 1 at t = 1; overshooting curves may leave [0, 1] in
//! between.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// `none`
    Linear,
    Power1Out,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3Out,
    Power3InOut,
    ExpoOut,
    SineInOut,
    BackOut(f32),
    ElasticOut { amplitude: f32, period: f32 },
    /// `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier([f32; 4]),
    /// Smooth-scroll curve `min(1, 1.001 - 2^(-10t))`.
    ScrollExpo,
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power3Out
    }
}

/// Linear interpolation of scalars, exact at `t = 0` and `t = 1`.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Invert the x bezier via binary search, then evaluate y.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

impl Ease {
    /// Evaluate the curve. Input is clamped to [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Ease::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let s = p / (2.0 * PI) * (1.0 / a).asin();
                a * 2f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / p).sin() + 1.0
            }
            Ease::CubicBezier([x1, y1, x2, y2]) => bezier_ease_t(t, x1, y1, x2, y2),
            Ease::ScrollExpo => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
        }
    }
}

fn parse_args(inner: &str) -> Result<Vec<f32>, MotionError> {
    inner
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .map_err(|_| MotionError::Config(format!("bad ease argument '{s}'")))
        })
        .collect()
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.find('(') {
            Some(open) if s.ends_with(')') => (&s[..open], Some(parse_args(&s[open + 1..s.len() - 1])?)),
            Some(_) => return Err(MotionError::Config(format!("unbalanced ease '{s}'"))),
            None => (s, None),
        };
        let args = args.unwrap_or_default();
        let ease = match name {
            "none" | "linear" => Ease::Linear,
            "power1.out" => Ease::Power1Out,
            "power2.in" => Ease::Power2In,
            "power2.out" => Ease::Power2Out,
            "power2.inOut" => Ease::Power2InOut,
            "power3.out" => Ease::Power3Out,
            "power3.inOut" => Ease::Power3InOut,
            "expo.out" => Ease::ExpoOut,
            "sine.inOut" => Ease::SineInOut,
            "scroll.expo" => Ease::ScrollExpo,
            "back.out" => Ease::BackOut(args.first().copied().unwrap_or(1.7)),
            "elastic.out" => Ease::ElasticOut {
                amplitude: args.first().copied().unwrap_or(1.0),
                period: args.get(1).copied().unwrap_or(0.3),
            },
            "cubic-bezier" => {
                if args.len() != 4 {
                    return Err(MotionError::Config(format!(
                        "cubic-bezier needs 4 arguments, got {}",
                        args.len()
                    )));
                }
                Ease::CubicBezier([args[0], args[1], args[2], args[3]])
            }
            other => return Err(MotionError::Config(format!("unknown ease '{other}'"))),
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => f.write_str("none"),
            Ease::Power1Out => f.write_str("power1.out"),
            Ease::Power2In => f.write_str("power2.in"),
            Ease::Power2Out => f.write_str("power2.out"),
            Ease::Power2InOut => f.write_str("power2.inOut"),
            Ease::Power3Out => f.write_str("power3.out"),
            Ease::Power3InOut => f.write_str("power3.inOut"),
            Ease::ExpoOut => f.write_str("expo.out"),
            Ease::SineInOut => f.write_str("sine.inOut"),
            Ease::ScrollExpo => f.write_str("scroll.expo"),
            Ease::BackOut(s) => write!(f, "back.out({s})"),
            Ease::ElasticOut { amplitude, period } => write!(f, "elastic.out({amplitude}, {period})"),
            Ease::CubicBezier([a, b, c, d]) => write!(f, "cubic-bezier({a}, {b}, {c}, {d})"),
        }
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Ease] = &[
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3Out,
        Ease::Power3InOut,
        Ease::ExpoOut,
        Ease::SineInOut,
        Ease::BackOut(1.7),
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        },
        Ease::CubicBezier([0.25, 0.1, 0.25, 1.0]),
        Ease::ScrollExpo,
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e} at 0");
            assert_eq!(e.apply(1.0), 1.0, "{e} at 1");
            assert_eq!(e.apply(-3.0), 0.0, "{e} clamps below");
            assert_eq!(e.apply(7.0), 1.0, "{e} clamps above");
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        for e in [Ease::Power2Out, Ease::Power3Out, Ease::ExpoOut] {
            assert!(e.apply(0.3) > 0.3, "{e}");
        }
        assert!(Ease::Power2In.apply(0.3) < 0.3);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn in_out_is_symmetric() {
        let e = Ease::Power2InOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.2) + e.apply(0.8) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn names_round_trip_through_strings() {
        for e in ALL {
            let parsed: Ease = e.to_string().parse().unwrap();
            assert_eq!(&parsed, e);
        }
        assert_eq!("back.out".parse::<Ease>().unwrap(), Ease::BackOut(1.7));
        assert!("wobble.in".parse::<Ease>().is_err());
        assert!("cubic-bezier(1, 2)".parse::<Ease>().is_err());
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Ease::Power3Out).unwrap();
        assert_eq!(json, "\"power3.out\"");
        let e: Ease = serde_json::from_str("\"elastic.out(1, 0.5)\"").unwrap();
        assert_eq!(
            e,
            Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5
            }
        );
    }
}
