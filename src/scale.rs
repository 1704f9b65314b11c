//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties. The bubble chart uses
//! them to map the color axis onto either a continuous gradient (numeric
//! columns) or a categorical palette (everything else).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::data::Value;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty or not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale from the extent of the finite values in `data`.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        let (min, max) = extent(data.iter().copied())?;
        Self::new((min, max), range).ok()
    }

    /// Get the domain extent.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Get the range extent.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }
}

/// Min and max of the finite values in an iterator.
#[must_use]
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Continuous color scale interpolating across evenly spaced color stops.
#[derive(Debug, Clone)]
pub struct GradientScale {
    stops: Vec<Rgba>,
    domain: (f64, f64),
    // None when the domain collapses to a single value.
    position: Option<LinearScale>,
}

impl GradientScale {
    /// Create a gradient scale over `domain`.
    ///
    /// A degenerate domain (`min == max`) maps every value to the first stop.
    ///
    /// # Errors
    ///
    /// Returns an error if `stops` is empty.
    pub fn new(stops: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::ScaleDomain("Gradient requires at least one color".to_string()));
        }

        let position = LinearScale::new(domain, (0.0, 1.0)).ok();
        Ok(Self {
            stops,
            domain,
            position,
        })
    }

    /// Input domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// First and last gradient stop.
    #[must_use]
    pub fn endpoints(&self) -> (Rgba, Rgba) {
        (self.stops[0], self.stops[self.stops.len() - 1])
    }
}

impl Scale<f64, Rgba> for GradientScale {
    fn scale(&self, value: f64) -> Rgba {
        let t = match self.position {
            Some(position) if value.is_finite() => position.scale(value).clamp(0.0, 1.0),
            _ => 0.0,
        };

        if self.stops.len() == 1 {
            return self.stops[0];
        }

        let segment_count = self.stops.len() - 1;
        let segment = ((t * segment_count as f64).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f64 - segment as f64;

        self.stops[segment].lerp(self.stops[segment + 1], local_t)
    }
}

/// Discrete color scale assigning palette slots in first-seen order.
///
/// Once the palette is exhausted, slots wrap around (`index % len`).
#[derive(Debug, Clone)]
pub struct CategoricalScale {
    palette: Vec<Rgba>,
    slots: HashMap<Option<String>, usize>,
}

impl CategoricalScale {
    /// Create an empty categorical scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `palette` is empty.
    pub fn new(palette: Vec<Rgba>) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::ScaleDomain("Palette requires at least one color".to_string()));
        }
        Ok(Self {
            palette,
            slots: HashMap::new(),
        })
    }

    /// Register a key, returning its slot index.
    pub fn observe(&mut self, key: Option<String>) -> usize {
        let next = self.slots.len();
        *self.slots.entry(key).or_insert(next)
    }

    /// Number of distinct keys observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no key has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Color for a key. Unobserved keys map to the first palette color.
    #[must_use]
    pub fn color_for(&self, key: &Option<String>) -> Rgba {
        let slot = self.slots.get(key).copied().unwrap_or(0);
        self.palette[slot % self.palette.len()]
    }
}

/// Color scale for the bubble chart's color axis.
#[derive(Debug, Clone)]
pub enum ColorScale {
    /// Numeric color axis.
    Gradient(GradientScale),
    /// Text, date or unbound color axis.
    Categorical(CategoricalScale),
}

impl ColorScale {
    /// Build a gradient scale over `domain`, or over the extent of `values`
    /// when no domain is given.
    ///
    /// # Errors
    ///
    /// Returns an error if `stops` is empty.
    pub fn gradient<'a>(
        stops: &[Rgba],
        domain: Option<(f64, f64)>,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Result<Self> {
        let domain = domain
            .or_else(|| extent(values.into_iter().filter_map(Value::as_number)))
            .unwrap_or((0.0, 0.0));
        Ok(Self::Gradient(GradientScale::new(stops.to_vec(), domain)?))
    }

    /// Build a categorical scale, observing `values` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if `palette` is empty.
    pub fn categorical<'a>(
        palette: &[Rgba],
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Result<Self> {
        let mut scale = CategoricalScale::new(palette.to_vec())?;
        for value in values {
            scale.observe(value.key());
        }
        Ok(Self::Categorical(scale))
    }
}

impl Scale<&Value, Rgba> for ColorScale {
    fn scale(&self, value: &Value) -> Rgba {
        match self {
            Self::Gradient(gradient) => gradient.scale(value.as_number().unwrap_or(f64::NAN)),
            Self::Categorical(categorical) => categorical.color_for(&value.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Rgba; 3] = [Rgba::RED, Rgba::BLUE, Rgba::BLACK];

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_domain_range() {
        let scale =
            LinearScale::new((10.0, 20.0), (100.0, 200.0)).expect("operation should succeed");
        assert_eq!(scale.domain(), (10.0, 20.0));
        assert_eq!(scale.range(), (100.0, 200.0));
    }

    #[test]
    fn test_linear_scale_invalid_domain() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_from_data() {
        let scale = LinearScale::from_data(&[0.0, f64::NAN, 50.0, 100.0], (0.0, 1.0))
            .expect("operation should succeed");
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!(LinearScale::from_data(&[], (0.0, 1.0)).is_none());
        assert!(LinearScale::from_data(&[5.0, 5.0], (0.0, 1.0)).is_none());
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3.0, -1.0, f64::INFINITY, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn test_gradient_endpoints_and_midpoint() {
        let scale = GradientScale::new(vec![Rgba::BLACK, Rgba::WHITE], (1.0, 5.0))
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(1.0), Rgba::BLACK);
        assert_eq!(scale.scale(5.0), Rgba::WHITE);
        assert_eq!(scale.scale(3.0), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn test_gradient_clamps_outside_domain() {
        let scale = GradientScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
        assert_eq!(scale.scale(f64::NAN), Rgba::BLACK);
    }

    #[test]
    fn test_gradient_multi_stop() {
        let scale = GradientScale::new(vec![Rgba::RED, Rgba::WHITE, Rgba::BLUE], (0.0, 2.0))
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(0.0), Rgba::RED);
        assert_eq!(scale.scale(1.0), Rgba::WHITE);
        assert_eq!(scale.scale(2.0), Rgba::BLUE);
        assert_eq!(scale.endpoints(), (Rgba::RED, Rgba::BLUE));
    }

    #[test]
    fn test_gradient_degenerate_domain_uses_first_stop() {
        let scale = GradientScale::new(vec![Rgba::RED, Rgba::BLUE], (3.0, 3.0))
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(3.0), Rgba::RED);
        assert_eq!(scale.domain(), (3.0, 3.0));
    }

    #[test]
    fn test_gradient_single_stop() {
        let scale = GradientScale::new(vec![Rgba::RED], (0.0, 1.0))
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(0.7), Rgba::RED);
    }

    #[test]
    fn test_gradient_empty_stops() {
        assert!(GradientScale::new(vec![], (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_categorical_first_seen_order() {
        let mut scale = CategoricalScale::new(PALETTE.to_vec()).expect("palette is non-empty");
        assert_eq!(scale.observe(Some("b".into())), 0);
        assert_eq!(scale.observe(Some("a".into())), 1);
        assert_eq!(scale.observe(Some("b".into())), 0);
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.color_for(&Some("b".into())), Rgba::RED);
        assert_eq!(scale.color_for(&Some("a".into())), Rgba::BLUE);
    }

    #[test]
    fn test_categorical_wraps_when_exhausted() {
        let mut scale = CategoricalScale::new(PALETTE.to_vec()).expect("palette is non-empty");
        for key in ["a", "b", "c", "d"] {
            scale.observe(Some(key.into()));
        }
        assert_eq!(scale.color_for(&Some("d".into())), scale.color_for(&Some("a".into())));
    }

    #[test]
    fn test_categorical_missing_key_has_own_slot() {
        let mut scale = CategoricalScale::new(PALETTE.to_vec()).expect("palette is non-empty");
        scale.observe(Some("x".into()));
        scale.observe(None);
        assert_eq!(scale.color_for(&None), Rgba::BLUE);
        assert!(!scale.is_empty());
    }

    #[test]
    fn test_categorical_empty_palette() {
        assert!(CategoricalScale::new(vec![]).is_err());
    }

    #[test]
    fn test_color_scale_gradient_from_values() {
        let values = vec![Value::Number(10.0), Value::Missing, Value::Number(20.0)];
        let scale = ColorScale::gradient(&[Rgba::BLACK, Rgba::WHITE], None, &values)
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(&Value::Number(10.0)), Rgba::BLACK);
        assert_eq!(scale.scale(&Value::Number(20.0)), Rgba::WHITE);
        assert_eq!(scale.scale(&Value::Missing), Rgba::BLACK);
    }

    #[test]
    fn test_color_scale_gradient_prefers_declared_domain() {
        let values = vec![Value::Number(10.0)];
        let scale = ColorScale::gradient(&[Rgba::BLACK, Rgba::WHITE], Some((0.0, 20.0)), &values)
            .expect("gradient creation should succeed");
        assert_eq!(scale.scale(&Value::Number(10.0)), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn test_color_scale_categorical_numbers_as_keys() {
        let values = vec![Value::Number(1.0), Value::Number(2.0), Value::Number(1.0)];
        let scale = ColorScale::categorical(&PALETTE, &values).expect("palette is non-empty");
        assert_eq!(scale.scale(&Value::Number(1.0)), Rgba::RED);
        assert_eq!(scale.scale(&Value::Number(2.0)), Rgba::BLUE);
    }
}
