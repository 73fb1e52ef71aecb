//! Viewport-intersection triggers.
//!
//! A trigger position is written `"<element-edge> <viewport-edge>"`, e.g.
//! `"top 80%"`: the trigger fires when the element's top reaches 80% of the
//! viewport height. Resolving a position against a layout yields the scroll
//! offset at which that happens, so every later check is a comparison
//! against the eased scroll offset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Rect, Viewport};

use crate::error::MotionError;

/// A point along one axis of an element or of the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// `top` / `left`
    Start,
    Center,
    /// `bottom` / `right`
    End,
    Percent(f32),
    Pixels(f32),
}

impl Anchor {
    /// Distance from the leading edge of a span of `len` pixels.
    #[inline]
    pub fn offset(&self, len: f32) -> f32 {
        match *self {
            Anchor::Start => 0.0,
            Anchor::Center => len * 0.5,
            Anchor::End => len,
            Anchor::Percent(p) => len * p / 100.0,
            Anchor::Pixels(px) => px,
        }
    }

    fn parse(token: &str, input: &str) -> Result<Self, MotionError> {
        let bad = |reason: &str| MotionError::InvalidTrigger {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        match token {
            "top" | "left" => Ok(Anchor::Start),
            "center" => Ok(Anchor::Center),
            "bottom" | "right" => Ok(Anchor::End),
            t if t.ends_with('%') => t[..t.len() - 1]
                .parse::<f32>()
                .map(Anchor::Percent)
                .map_err(|_| bad("bad percentage")),
            t => t
                .trim_end_matches("px")
                .parse::<f32>()
                .map(Anchor::Pixels)
                .map_err(|_| bad("unknown keyword")),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Start => f.write_str("top"),
            Anchor::Center => f.write_str("center"),
            Anchor::End => f.write_str("bottom"),
            Anchor::Percent(p) => write!(f, "{p}%"),
            Anchor::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Element edge paired with a viewport edge.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPoint {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPoint {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// `"top top"`
    pub const TOP_TOP: TriggerPoint = TriggerPoint::new(Anchor::Start, Anchor::Start);
    /// `"top bottom"`: the element starts entering the viewport.
    pub const TOP_BOTTOM: TriggerPoint = TriggerPoint::new(Anchor::Start, Anchor::End);
    /// `"bottom top"`: the element has fully left the viewport.
    pub const BOTTOM_TOP: TriggerPoint = TriggerPoint::new(Anchor::End, Anchor::Start);

    /// `"top <pct>%"`
    pub const fn top_at(pct: f32) -> Self {
        TriggerPoint::new(Anchor::Start, Anchor::Percent(pct))
    }

    pub fn parse(input: &str) -> Result<Self, MotionError> {
        let mut parts = input.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MotionError::InvalidTrigger {
                input: input.to_string(),
                reason: "expected '<element> <viewport>'".into(),
            });
        };
        Ok(TriggerPoint {
            element: Anchor::parse(el, input)?,
            viewport: Anchor::parse(vp, input)?,
        })
    }

    /// Scroll offset at which this point is reached on the vertical axis.
    pub fn resolve_vertical(&self, rect: Rect, viewport: Viewport) -> f32 {
        rect.top() + self.element.offset(rect.height) - self.viewport.offset(viewport.height)
    }

    /// Horizontal screen position (relative to the viewport's left edge)
    /// at which this point is reached, for content translated sideways.
    pub fn resolve_horizontal(&self, viewport: Viewport) -> f32 {
        self.viewport.offset(viewport.width)
    }
}

impl FromStr for TriggerPoint {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriggerPoint::parse(s)
    }
}

impl TryFrom<String> for TriggerPoint {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TriggerPoint::parse(&value)
    }
}

impl From<TriggerPoint> for String {
    fn from(value: TriggerPoint) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// End of a trigger range: another point, or a distance past the start.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerEnd {
    Point(TriggerPoint),
    /// `"+=N"`
    Relative(f32),
}

impl TriggerEnd {
    pub fn resolve(&self, rect: Rect, viewport: Viewport, start: f32) -> f32 {
        match self {
            TriggerEnd::Point(p) => p.resolve_vertical(rect, viewport),
            TriggerEnd::Relative(d) => start + d,
        }
    }
}

impl TryFrom<String> for TriggerEnd {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for TriggerEnd {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Some(rest) = t.strip_prefix("+=") {
            return rest
                .trim_end_matches("px")
                .parse::<f32>()
                .map(TriggerEnd::Relative)
                .map_err(|_| MotionError::InvalidTrigger {
                    input: s.to_string(),
                    reason: "bad relative distance".into(),
                });
        }
        TriggerPoint::parse(t).map(TriggerEnd::Point)
    }
}

impl From<TriggerEnd> for String {
    fn from(value: TriggerEnd) -> Self {
        match value {
            TriggerEnd::Point(p) => p.to_string(),
            TriggerEnd::Relative(d) => format!("+={d}"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    #[default]
    None,
    Play,
    Reverse,
    Restart,
    Reset,
    Complete,
    Pause,
}

/// Actions for the four trigger callbacks, in the order enter, leave,
/// enter-back, leave-back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Play once on enter, never replay.
    pub const ONCE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    /// Play on enter, reverse when scrolled back above the start.
    pub const REVERSIBLE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn action_for(&self, cb: TriggerCallback) -> ToggleAction {
        match cb {
            TriggerCallback::Enter => self.on_enter,
            TriggerCallback::Leave => self.on_leave,
            TriggerCallback::EnterBack => self.on_enter_back,
            TriggerCallback::LeaveBack => self.on_leave_back,
        }
    }

    /// True when nothing can ever run the animation backwards or again.
    pub fn is_one_shot(&self) -> bool {
        [self.on_leave, self.on_enter_back, self.on_leave_back]
            .iter()
            .all(|a| *a == ToggleAction::None)
    }
}

impl Default for ToggleActions {
    fn default() -> Self {
        ToggleActions::ONCE
    }
}

fn parse_action(token: &str) -> Result<ToggleAction, MotionError> {
    Ok(match token {
        "none" => ToggleAction::None,
        "play" => ToggleAction::Play,
        "reverse" => ToggleAction::Reverse,
        "restart" => ToggleAction::Restart,
        "reset" => ToggleAction::Reset,
        "complete" => ToggleAction::Complete,
        "pause" => ToggleAction::Pause,
        other => return Err(MotionError::Config(format!("unknown toggle action '{other}'"))),
    })
}

fn action_name(a: ToggleAction) -> &'static str {
    match a {
        ToggleAction::None => "none",
        ToggleAction::Play => "play",
        ToggleAction::Reverse => "reverse",
        ToggleAction::Restart => "restart",
        ToggleAction::Reset => "reset",
        ToggleAction::Complete => "complete",
        ToggleAction::Pause => "pause",
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(MotionError::Config(format!(
                "toggle actions need 4 entries, got '{value}'"
            )));
        }
        Ok(ToggleActions {
            on_enter: parse_action(tokens[0])?,
            on_leave: parse_action(tokens[1])?,
            on_enter_back: parse_action(tokens[2])?,
            on_leave_back: parse_action(tokens[3])?,
        })
    }
}

impl From<ToggleActions> for String {
    fn from(v: ToggleActions) -> Self {
        format!(
            "{} {} {} {}",
            action_name(v.on_enter),
            action_name(v.on_leave),
            action_name(v.on_enter_back),
            action_name(v.on_leave_back)
        )
    }
}

/// Declarative trigger attached to a tween-like primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Element whose layout defines the range; `None` uses the first target.
    #[serde(default)]
    pub element: Option<ElementId>,
    pub start: TriggerPoint,
    #[serde(default)]
    pub end: Option<TriggerEnd>,
    #[serde(default)]
    pub toggle_actions: ToggleActions,
}

impl TriggerConfig {
    pub fn at(start: TriggerPoint) -> Self {
        Self {
            element: None,
            start,
            end: None,
            toggle_actions: ToggleActions::ONCE,
        }
    }

    pub fn on(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn reversible(mut self) -> Self {
        self.toggle_actions = ToggleActions::REVERSIBLE;
        self
    }

    /// Resolve to scroll offsets. A missing end never ends.
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> ScrollRange {
        let start = self.start.resolve_vertical(rect, viewport);
        let end = match self.end {
            Some(e) => e.resolve(rect, viewport, start).max(start),
            None => f32::INFINITY,
        };
        ScrollRange { start, end }
    }
}

/// Resolved scroll offsets of a trigger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn resolve(start: TriggerPoint, end: TriggerEnd, rect: Rect, viewport: Viewport) -> Self {
        let s = start.resolve_vertical(rect, viewport);
        ScrollRange::new(s, end.resolve(rect, viewport, s))
    }

    /// Linear progress of `y` through the range, clamped to [0, 1].
    /// A zero-length range is a step at `start`.
    pub fn progress(&self, y: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 || !span.is_finite() {
            return if y >= self.start { 1.0 } else { 0.0 };
        }
        ((y - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn zone(&self, y: f32) -> Zone {
        if y < self.start {
            Zone::Before
        } else if y < self.end {
            Zone::Active
        } else {
            Zone::After
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Zone {
    Before,
    Active,
    After,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCallback {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Tracks which zone the scroll offset is in and reports the callbacks that
/// fire as it moves. Callbacks depend only on the zone change, so jittering
/// inside a zone never re-fires anything.
#[derive(Clone, Debug)]
pub struct TriggerObserver {
    pub range: ScrollRange,
    zone: Zone,
}

impl TriggerObserver {
    pub fn new(range: ScrollRange) -> Self {
        Self {
            range,
            zone: Zone::Before,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Swap in a re-measured range without firing callbacks.
    pub fn remeasure(&mut self, range: ScrollRange) {
        self.range = range;
    }

    pub fn update(&mut self, y: f32) -> Vec<TriggerCallback> {
        let next = self.range.zone(y);
        let out = match (self.zone, next) {
            (Zone::Before, Zone::Active) => vec![TriggerCallback::Enter],
            (Zone::Before, Zone::After) => vec![TriggerCallback::Enter, TriggerCallback::Leave],
            (Zone::Active, Zone::After) => vec![TriggerCallback::Leave],
            (Zone::After, Zone::Active) => vec![TriggerCallback::EnterBack],
            (Zone::After, Zone::Before) => {
                vec![TriggerCallback::EnterBack, TriggerCallback::LeaveBack]
            }
            (Zone::Active, Zone::Before) => vec![TriggerCallback::LeaveBack],
            _ => Vec::new(),
        };
        self.zone = next;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport {
            width: 1000.0,
            height: 1000.0,
        }
    }

    #[test]
    fn parses_keywords_percentages_and_pixels() {
        let p: TriggerPoint = "top 80%".parse().unwrap();
        assert_eq!(p, TriggerPoint::top_at(80.0));
        let p = TriggerPoint::parse("60% top").unwrap();
        assert_eq!(p, TriggerPoint::new(Anchor::Percent(60.0), Anchor::Start));
        let p = TriggerPoint::parse("center 120px").unwrap();
        assert_eq!(p, TriggerPoint::new(Anchor::Center, Anchor::Pixels(120.0)));
        assert!(TriggerPoint::parse("top").is_err());
        assert!(TriggerPoint::parse("top eighty%").is_err());
        assert!(TriggerPoint::parse("top 80% extra").is_err());
    }

    #[test]
    fn resolves_against_layout() {
        let rect = Rect::new(0.0, 2000.0, 100.0, 400.0);
        assert_eq!(TriggerPoint::top_at(80.0).resolve_vertical(rect, vp()), 1200.0);
        assert_eq!(TriggerPoint::TOP_TOP.resolve_vertical(rect, vp()), 2000.0);
        assert_eq!(TriggerPoint::BOTTOM_TOP.resolve_vertical(rect, vp()), 2400.0);
        assert_eq!(TriggerPoint::TOP_BOTTOM.resolve_vertical(rect, vp()), 1000.0);
        let end: TriggerEnd = "+=750".parse().unwrap();
        assert_eq!(end.resolve(rect, vp(), 2000.0), 2750.0);
    }

    #[test]
    fn toggle_actions_parse() {
        let t = ToggleActions::try_from("play none none reverse".to_string()).unwrap();
        assert_eq!(t, ToggleActions::REVERSIBLE);
        assert!(!t.is_one_shot());
        assert!(ToggleActions::ONCE.is_one_shot());
        assert!(ToggleActions::try_from("play none".to_string()).is_err());
        assert_eq!(String::from(ToggleActions::ONCE), "play none none none");
    }

    #[test]
    fn observer_reports_zone_changes_only() {
        let mut obs = TriggerObserver::new(ScrollRange::new(100.0, 200.0));
        assert!(obs.update(50.0).is_empty());
        assert_eq!(obs.update(150.0), vec![TriggerCallback::Enter]);
        assert!(obs.update(160.0).is_empty());
        assert_eq!(obs.update(250.0), vec![TriggerCallback::Leave]);
        assert_eq!(
            obs.update(0.0),
            vec![TriggerCallback::EnterBack, TriggerCallback::LeaveBack]
        );
    }

    #[test]
    fn zero_length_range_steps() {
        let r = ScrollRange::new(10.0, 10.0);
        assert_eq!(r.progress(9.9), 0.0);
        assert_eq!(r.progress(10.0), 1.0);
    }
}
