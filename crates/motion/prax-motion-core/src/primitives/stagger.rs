//! Staggered reveals over a group of items.
//!
//! Items start in document order (top to bottom, then left to right) unless
//! another order is requested, each offset from the previous one by `each`
//! seconds, or by an even share of `amount` seconds across the group.

use serde::{Deserialize, Serialize};

use prax_api_core::{ElementId, Rect, Surface};

use crate::binding::BindingHandle;
use crate::config::MotionConfig;
use crate::engine::MotionEngine;
use crate::primitives::reveal::RevealConfig;
use crate::primitives::triggered::bind_track;
use crate::trigger::TriggerConfig;

/// Where the wave starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    #[default]
    Start,
    End,
    Center,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerOrder {
    /// By layout position.
    #[default]
    Document,
    /// In the order the targets were passed.
    AsGiven,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Seconds between consecutive items. Ignored when `amount` is set.
    pub each: f32,
    /// Total spread from first to last start.
    pub amount: Option<f32>,
    pub from: StaggerFrom,
    pub order: StaggerOrder,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            each: 0.1,
            amount: None,
            from: StaggerFrom::Start,
            order: StaggerOrder::Document,
        }
    }
}

impl StaggerConfig {
    pub fn each(each: f32) -> Self {
        Self {
            each,
            ..Self::default()
        }
    }

    pub fn amount(amount: f32) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    fn step(&self, n: usize) -> f32 {
        match self.amount {
            Some(a) if n > 1 => a.max(0.0) / (n - 1) as f32,
            Some(_) => 0.0,
            None => self.each.max(0.0),
        }
    }
}

/// Start offset for each rank `0..n` of an already ordered group.
pub fn offsets(n: usize, cfg: &StaggerConfig) -> Vec<f32> {
    let step = cfg.step(n);
    let last = n.saturating_sub(1) as f32;
    (0..n)
        .map(|i| {
            let i = i as f32;
            let distance = match cfg.from {
                StaggerFrom::Start => i,
                StaggerFrom::End => last - i,
                StaggerFrom::Center => (i - last / 2.0).abs(),
            };
            distance * step
        })
        .collect()
}

/// Ranks of `rects` in reading order: by top edge, then left edge.
pub fn document_ranks(rects: &[Rect]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        let (ra, rb) = (rects[a], rects[b]);
        ra.top()
            .total_cmp(&rb.top())
            .then(ra.left().total_cmp(&rb.left()))
    });
    let mut ranks = vec![0; rects.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank;
    }
    ranks
}

/// Grid-item defaults: up 80px with a 0.6s spread, once the container top
/// passes `media_start`.
pub fn grid_reveal(container: ElementId, tokens: &MotionConfig) -> (RevealConfig, StaggerConfig) {
    let reveal = RevealConfig {
        y: 80.0,
        trigger: Some(TriggerConfig::at(tokens.media_start).on(container)),
        ..RevealConfig::fade_up_with(tokens)
    };
    (reveal, StaggerConfig::amount(0.6))
}

pub fn bind(
    engine: &MotionEngine,
    surface: &dyn Surface,
    items: &[ElementId],
    reveal: &RevealConfig,
    stagger: &StaggerConfig,
) -> BindingHandle {
    let live: Vec<(ElementId, Rect)> = items
        .iter()
        .filter_map(|id| surface.rect(*id).map(|r| (*id, r)))
        .collect();
    let ranks: Vec<usize> = match stagger.order {
        StaggerOrder::Document => {
            let rects: Vec<Rect> = live.iter().map(|(_, r)| *r).collect();
            document_ranks(&rects)
        }
        StaggerOrder::AsGiven => (0..live.len()).collect(),
    };
    let by_rank = offsets(live.len(), stagger);
    let mut spec = reveal.tween_spec(live.iter().map(|(id, _)| *id).collect());
    spec.offsets = ranks.iter().map(|r| by_rank[*r]).collect();
    bind_track(engine, surface, "stagger", spec, reveal.trigger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_spread_across_the_group() {
        let o = offsets(4, &StaggerConfig::amount(0.6));
        assert!((o[3] - 0.6).abs() < 1e-6);
        assert!((o[1] - 0.2).abs() < 1e-6);
        assert_eq!(offsets(1, &StaggerConfig::amount(0.6)), vec![0.0]);
    }

    #[test]
    fn from_center_and_end() {
        let cfg = StaggerConfig {
            from: StaggerFrom::Center,
            ..StaggerConfig::each(0.1)
        };
        let o = offsets(5, &cfg);
        assert_eq!(o[2], 0.0);
        assert!((o[0] - o[4]).abs() < 1e-6);
        let end = StaggerConfig {
            from: StaggerFrom::End,
            ..StaggerConfig::each(0.1)
        };
        assert_eq!(offsets(3, &end)[2], 0.0);
    }

    #[test]
    fn document_order_reads_rows_then_columns() {
        let rects = [
            Rect::new(500.0, 400.0, 10.0, 10.0),
            Rect::new(0.0, 400.0, 10.0, 10.0),
            Rect::new(900.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(document_ranks(&rects), vec![2, 1, 0]);
    }
}
