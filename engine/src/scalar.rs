//! Scalar attribute ranges: normalisation for colour mapping and iso-value spacing.

/// Closed scalar interval `[min, max]` of a point attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarRange {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl ScalarRange {
    /// Build a range, swapping the ends when given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Range of the finite values in `values`, or `None` if there are none.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut out: Option<Self> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            out = Some(match out {
                None => Self { min: v, max: v },
                Some(r) => Self { min: r.min.min(v), max: r.max.max(v) },
            });
        }
        out
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `v` in the range as a value in [0,1]; a degenerate range maps to 0.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.span();
        if !(span > 0.0) || !v.is_finite() {
            return 0.0;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }

    /// `k` evenly spaced values from `min` to `max` inclusive.
    ///
    /// `k == 1` returns the midpoint and `k == 0` returns nothing.
    pub fn iso_values(&self, k: usize) -> Vec<f64> {
        match k {
            0 => Vec::new(),
            1 => vec![self.min + 0.5 * self.span()],
            _ => {
                let step = self.span() / (k - 1) as f64;
                (0..k).map(|i| if i == k - 1 { self.max } else { self.min + i as f64 * step }).collect()
            }
        }
    }
}
