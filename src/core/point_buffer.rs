use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;

/// Backing storage grows by this many entries whenever it fills up.
const GROWTH_CHUNK: usize = 100;

/// Append-only `f32` sequence with optional per-entry validity flags.
///
/// Buffers built as "always valid" (the X column, error columns) carry no
/// flags at all and ignore every validity mutation. `min`/`max` are cached by
/// [`PointBuffer::finalize`] and are not refreshed by later validity edits:
/// axis margins depend on the bounds of the data as loaded.
#[derive(Debug, Clone)]
pub struct PointBuffer {
    values: Vec<f32>,
    validity: Option<Vec<bool>>,
    min: f32,
    max: f32,
    finalized: bool,
}

impl PointBuffer {
    #[must_use]
    pub fn new(always_valid: bool) -> Self {
        Self::with_capacity(always_valid, GROWTH_CHUNK)
    }

    #[must_use]
    pub fn with_capacity(always_valid: bool, capacity_hint: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity_hint),
            validity: (!always_valid).then(|| Vec::with_capacity(capacity_hint)),
            min: f32::MAX,
            max: f32::MIN,
            finalized: false,
        }
    }

    /// Builds and finalizes an all-valid buffer from existing values.
    #[must_use]
    pub fn from_values(always_valid: bool, values: &[f32]) -> Self {
        let mut buffer = Self::with_capacity(always_valid, values.len());
        for &value in values {
            buffer.push(value);
        }
        buffer.finalize();
        buffer
    }

    #[must_use]
    pub fn is_always_valid(&self) -> bool {
        self.validity.is_none()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn push(&mut self, value: f32) {
        self.push_entry(value, true);
    }

    /// Appends a placeholder entry; the stored value is NaN.
    pub fn push_invalid(&mut self) {
        self.push_entry(f32::NAN, false);
    }

    fn push_entry(&mut self, value: f32, valid: bool) {
        if self.values.len() == self.values.capacity() {
            self.values.reserve_exact(GROWTH_CHUNK);
            if let Some(validity) = self.validity.as_mut() {
                validity.reserve_exact(GROWTH_CHUNK);
            }
        }
        self.values.push(value);
        if let Some(validity) = self.validity.as_mut() {
            validity.push(valid);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Panics when `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    #[must_use]
    pub fn is_valid(&self, index: usize) -> bool {
        self.validity
            .as_ref()
            .is_none_or(|validity| validity[index])
    }

    pub fn set_valid(&mut self, index: usize, valid: bool) {
        if let Some(validity) = self.validity.as_mut() {
            validity[index] = valid;
        }
    }

    pub fn set_all_valid(&mut self, valid: bool) {
        if let Some(validity) = self.validity.as_mut() {
            validity.fill(valid);
        }
    }

    /// Caches min/max over the entries valid right now.
    ///
    /// With no valid entries the bounds stay at `(f32::MAX, f32::MIN)`.
    pub fn finalize(&mut self) {
        let (min, max) = self
            .values
            .iter()
            .enumerate()
            .filter(|&(index, _)| self.is_valid(index))
            .fold((f32::MAX, f32::MIN), |(min, max), (_, &value)| {
                (min.min(value), max.max(value))
            });
        self.min = min;
        self.max = max;
        self.finalized = true;
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        debug_assert!(self.finalized, "min() queried before finalize()");
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        debug_assert!(self.finalized, "max() queried before finalize()");
        self.max
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        match &self.validity {
            Some(validity) => validity.iter().filter(|&&valid| valid).count(),
            None => self.values.len(),
        }
    }
}

impl PartialEq for PointBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(left, right)| OrderedFloat(*left) == OrderedFloat(*right))
    }
}

impl Eq for PointBuffer {}

impl Hash for PointBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.len().hash(state);
        for &value in &self.values {
            OrderedFloat(value).hash(state);
        }
    }
}
