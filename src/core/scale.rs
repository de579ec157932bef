use serde::{Deserialize, Serialize};

use crate::core::ticks::{nice_domain, tick_step, ticks};

/// Continuous linear mapping from a data domain to a pixel range.
///
/// A degenerate domain (`d0 == d1`) maps every value to the range midpoint.
/// Non-finite domains or inputs produce `NaN` instead of an error: marks with
/// unusable coordinates are dropped at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain_start: f64, domain_end: f64) -> Self {
        self.set_domain(domain_start, domain_end);
        self
    }

    pub fn set_domain(&mut self, domain_start: f64, domain_end: f64) {
        self.domain_start = domain_start;
        self.domain_end = domain_end;
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Rounds the domain outward to tick-friendly values.
    pub fn nice(&mut self, count: usize) {
        let (start, end) = nice_domain(self.domain(), count);
        self.set_domain(start, end);
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }

    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }
}

/// Square-root scale: linear in `sqrt(value)`, used for area-true radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    domain_start: f64,
    domain_end: f64,
    inner: LinearScale,
}

fn signed_sqrt(value: f64) -> f64 {
    value.signum() * value.abs().sqrt()
}

impl SqrtScale {
    #[must_use]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            inner: LinearScale::new(range_start, range_end).with_domain(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain_start: f64, domain_end: f64) -> Self {
        self.set_domain(domain_start, domain_end);
        self
    }

    pub fn set_domain(&mut self, domain_start: f64, domain_end: f64) {
        self.domain_start = domain_start;
        self.domain_end = domain_end;
        self.inner
            .set_domain(signed_sqrt(domain_start), signed_sqrt(domain_end));
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        self.inner.map(signed_sqrt(value))
    }
}

/// Discrete scale dividing a range into equal bands, one per domain entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        let mut scale = Self {
            domain: Vec::new(),
            range_start,
            range_end,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            offset: range_start,
        };
        scale.rescale();
        scale
    }

    #[must_use]
    pub fn with_padding_inner(mut self, padding_inner: f64) -> Self {
        self.padding_inner = padding_inner.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    #[must_use]
    pub fn with_domain<I, S>(mut self, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_domain(domain);
        self
    }

    pub fn set_domain<I, S>(&mut self, domain: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain.clear();
        for key in domain {
            let key = key.into();
            if !self.domain.contains(&key) {
                self.domain.push(key);
            }
        }
        self.rescale();
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (start, stop) = if self.range_end < self.range_start {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };
        self.step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.offset = start + (stop - start - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Start position of the band for `key`, if it is part of the domain.
    #[must_use]
    pub fn map(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|entry| entry == key)?;
        let position = if self.range_end < self.range_start {
            self.offset + self.step * (self.domain.len() - 1 - index) as f64
        } else {
            self.offset + self.step * index as f64
        };
        Some(position)
    }
}

/// Ordinal positions spaced evenly from a fixed offset towards an upper bound.
///
/// With `N` entries the step is `(upper_bound - offset) / N`, and entry `i`
/// sits at `offset + i * step`. The upper bound itself is never occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotScale<K> {
    domain: Vec<K>,
    offset: f64,
    upper_bound: f64,
}

impl<K: PartialEq> SlotScale<K> {
    #[must_use]
    pub fn new(domain: Vec<K>, offset: f64, upper_bound: f64) -> Self {
        Self {
            domain,
            offset,
            upper_bound,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.upper_bound - self.offset) / self.domain.len() as f64
    }

    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        let step = self.step();
        (0..self.domain.len())
            .map(|i| self.offset + i as f64 * step)
            .collect()
    }

    #[must_use]
    pub fn map(&self, key: &K) -> Option<f64> {
        let index = self.domain.iter().position(|entry| entry == key)?;
        Some(self.offset + index as f64 * self.step())
    }
}

/// Discrete mapping from domain keys to output values, cycling through the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale<K, V> {
    domain: Vec<K>,
    range: Vec<V>,
    unknown: Option<V>,
}

impl<K: PartialEq, V> OrdinalScale<K, V> {
    #[must_use]
    pub fn new(domain: Vec<K>, range: Vec<V>) -> Self {
        Self {
            domain,
            range,
            unknown: None,
        }
    }

    /// Value returned for keys outside the domain.
    #[must_use]
    pub fn with_unknown(mut self, unknown: V) -> Self {
        self.unknown = Some(unknown);
        self
    }

    #[must_use]
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    #[must_use]
    pub fn map(&self, key: &K) -> Option<&V> {
        if self.range.is_empty() {
            return self.unknown.as_ref();
        }
        match self.domain.iter().position(|entry| entry == key) {
            Some(index) => self.range.get(index % self.range.len()),
            None => self.unknown.as_ref(),
        }
    }
}
