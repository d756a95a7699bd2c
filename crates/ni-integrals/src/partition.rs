//! Uniform partitions of an integration interval.

use ni_core::{ensure, Error, Real, Result, Size};

/// The boundaries `begin = x₀ < x₁ < … < xₙ = end` of `n` equal subintervals.
///
/// Boundary `i` is computed as `begin + i·h`, never by repeated addition,
/// and the last boundary is `end` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    points: Vec<Real>,
    h: Real,
}

impl Partition {
    /// Partition `[begin, end]` into `subdivision_n` equal parts.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `subdivision_n == 0`, if either end is not
    /// finite, if `end <= begin`, or if the step is too small to separate
    /// consecutive boundaries in floating point.
    pub fn new(begin: Real, end: Real, subdivision_n: Size) -> Result<Self> {
        ensure!(
            begin.is_finite() && end.is_finite(),
            "interval bounds must be finite, got [{begin}, {end}]"
        );
        ensure!(
            end > begin,
            "interval end must exceed begin, got [{begin}, {end}]"
        );
        ensure!(subdivision_n >= 1, "subdivision_n must be at least 1");

        let h = (end - begin) / subdivision_n as Real;
        ensure!(h.is_finite(), "interval length of [{begin}, {end}] overflows");
        ensure!(
            h > begin.abs().max(end.abs()) * Real::EPSILON,
            "step {h} is below the resolution of [{begin}, {end}]"
        );

        let mut points: Vec<Real> = Vec::new();
        points
            .try_reserve_exact(subdivision_n.saturating_add(1))
            .map_err(|_| {
                Error::InvalidConfiguration(format!(
                    "cannot allocate {subdivision_n} subintervals"
                ))
            })?;
        points.extend((0..=subdivision_n).map(|i| {
            if i == subdivision_n {
                end
            } else {
                begin + i as Real * h
            }
        }));
        ensure!(
            points.windows(2).all(|w| w[0] < w[1]),
            "step {h} is below the resolution of [{begin}, {end}]"
        );
        Ok(Self { points, h })
    }

    /// The `n + 1` boundaries in increasing order.
    pub fn points(&self) -> &[Real] {
        &self.points
    }

    /// Uniform step `h = (end − begin)/n`.
    pub fn step_size(&self) -> Real {
        self.h
    }

    /// Number of subintervals `n`.
    pub fn subdivisions(&self) -> Size {
        self.points.len() - 1
    }

    /// First boundary.
    pub fn begin(&self) -> Real {
        self.points[0]
    }

    /// Last boundary.
    pub fn end(&self) -> Real {
        self.points[self.points.len() - 1]
    }

    /// Consecutive `(a, b)` pairs, left to right.
    pub fn subintervals(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Boundaries of the uniform partition of `[begin, end]` into
/// `subdivision_n` parts.
///
/// # Example
/// ```
/// use ni_integrals::partition::partition;
///
/// let p = partition(0.0, 1.0, 4).unwrap();
/// assert_eq!(p, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert!(partition(0.0, 1.0, 0).is_err());
/// ```
pub fn partition(begin: Real, end: Real, subdivision_n: Size) -> Result<Vec<Real>> {
    Partition::new(begin, end, subdivision_n).map(|p| p.points)
}
