//! Style writes produced by the motion engine each tick.
//!
//! A `StyleBatch` is an ordered list; when the same element+property appears
//! more than once, the last write wins when the host applies it.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{ElementId, Property, Value};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleWrite {
    pub target: ElementId,
    pub property: Property,
    pub value: Value,
}

impl StyleWrite {
    pub fn new(target: ElementId, property: Property, value: Value) -> Self {
        Self {
            target,
            property,
            value,
        }
    }

    pub fn float(target: ElementId, property: Property, v: f32) -> Self {
        Self::new(target, property, Value::Float(v))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleBatch(Vec<StyleWrite>);

impl StyleBatch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, write: StyleWrite) {
        self.0.push(write);
    }

    pub fn append(&mut self, mut other: StyleBatch) {
        self.0.append(&mut other.0);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleWrite> {
        self.0.iter()
    }

    /// Last value written for `target`/`property` in this batch.
    pub fn latest(&self, target: ElementId, property: Property) -> Option<Value> {
        self.0
            .iter()
            .rev()
            .find(|w| w.target == target && w.property == property)
            .map(|w| w.value)
    }

    /// Convenience for float-valued properties.
    pub fn latest_float(&self, target: ElementId, property: Property) -> Option<f32> {
        self.latest(target, property).and_then(|v| v.as_float())
    }

    /// Keep only the last write per element+property, in the order those
    /// last writes were made. Applying the result gives the same final
    /// styles as applying the whole batch.
    pub fn compact(&mut self) {
        let mut seen: HashSet<(ElementId, Property)> = HashSet::with_capacity(self.0.len());
        let mut kept: Vec<StyleWrite> = self
            .0
            .iter()
            .rev()
            .filter(|w| seen.insert((w.target, w.property)))
            .copied()
            .collect();
        kept.reverse();
        self.0 = kept;
    }
}

impl IntoIterator for StyleBatch {
    type Item = StyleWrite;
    type IntoIter = std::vec::IntoIter<StyleWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<StyleWrite> for StyleBatch {
    fn extend<T: IntoIterator<Item = StyleWrite>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
