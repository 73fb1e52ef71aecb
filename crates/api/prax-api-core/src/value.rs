//! Animated properties and their values.

use serde::{Deserialize, Serialize};

/// Style properties the motion layer writes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    /// Horizontal translation in pixels.
    TranslateX,
    /// Vertical translation in pixels.
    TranslateY,
    /// Uniform scale.
    Scale,
    /// Horizontal-only scale (dividers, progress bars).
    ScaleX,
    ClipPath,
    Visibility,
    /// Vertical compensation that keeps a pinned container fixed in the viewport.
    PinOffset,
}

/// Clip inset in percent of the element box, CSS order (top, right, bottom, left).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Inset {
    /// Fully visible.
    pub const OPEN: Inset = Inset {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn lerp(a: Inset, b: Inset, t: f32) -> Inset {
        Inset {
            top: a.top + (b.top - a.top) * t,
            right: a.right + (b.right - a.right) * t,
            bottom: a.bottom + (b.bottom - a.bottom) * t,
            left: a.left + (b.left - a.left) * t,
        }
    }

    pub fn is_open(&self) -> bool {
        *self == Inset::OPEN
    }

    /// CSS `inset(...)` rendering, e.g. `inset(100% 0% 0% 0%)`.
    pub fn to_css(&self) -> String {
        format!(
            "inset({}% {}% {}% {}%)",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Value {
    Float(f32),
    Inset(Inset),
    Bool(bool),
}

impl Value {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_inset(&self) -> Option<Inset> {
        match self {
            Value::Inset(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl Property {
    /// Resting value an element shows when nothing animates it.
    pub fn rest_value(&self) -> Value {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX => Value::Float(1.0),
            Property::TranslateX | Property::TranslateY | Property::PinOffset => Value::Float(0.0),
            Property::ClipPath => Value::Inset(Inset::OPEN),
            Property::Visibility => Value::Bool(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_lerp_and_css() {
        let closed = Inset::new(100.0, 0.0, 0.0, 0.0);
        let mid = Inset::lerp(closed, Inset::OPEN, 0.25);
        assert_eq!(mid.top, 75.0);
        assert_eq!(closed.to_css(), "inset(100% 0% 0% 0%)");
        assert!(Inset::lerp(closed, Inset::OPEN, 1.0).is_open());
    }

    #[test]
    fn value_json_is_tagged() {
        let v = Value::Float(0.5);
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"{"type":"float","data":0.5}"#);
        let back: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn rest_values_are_visible() {
        assert_eq!(Property::Opacity.rest_value(), Value::Float(1.0));
        assert_eq!(Property::TranslateY.rest_value(), Value::Float(0.0));
        assert_eq!(Property::ClipPath.rest_value(), Value::Inset(Inset::OPEN));
    }
}
