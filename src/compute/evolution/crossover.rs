//! Pairwise recombination operators.
//!
//! Crossover works in place on two parent genomes and reports whether it
//! modified them.

use crate::schema::Bounds;

use super::genome::{BitString, GenomeRng, RealVector};

/// Parents closer than this on a gene are left untouched by [`SafeSbx`].
pub const SBX_GENE_EPSILON: f64 = 1e-10;

/// Cap on the spread factor and its power in [`SafeSbx`].
const SBX_SPREAD_CAP: f64 = 100.0;

/// Recombines two genomes in place.
pub trait Crossover<G> {
    /// Returns `false` when the parents were left unchanged.
    fn crossover(&self, a: &mut G, b: &mut G, rng: &mut GenomeRng) -> bool;
}

/// Swaps every gene from a random cut point to the end.
#[derive(Debug, Clone, Default)]
pub struct SinglePointCrossover;

impl Crossover<BitString> for SinglePointCrossover {
    fn crossover(&self, a: &mut BitString, b: &mut BitString, rng: &mut GenomeRng) -> bool {
        if a.len() != b.len() || a.is_empty() {
            return false;
        }

        let point = rng.index(a.len());
        a.0[point..].swap_with_slice(&mut b.0[point..]);
        true
    }
}

/// Simulated binary crossover hardened against ill-conditioned gene pairs.
///
/// Near-identical genes are skipped. If the spread computation produces a
/// non-finite child the gene falls back to a random linear blend.
#[derive(Debug, Clone)]
pub struct SafeSbx {
    pub eta: f64,
    pub bounds: Bounds,
}

impl SafeSbx {
    pub fn new(eta: f64, bounds: Bounds) -> Self {
        Self { eta, bounds }
    }

    /// Ordered children for an ordered pair `y1 < y2`, or `None` if any
    /// intermediate left the finite range.
    fn children(&self, y1: f64, y2: f64, u: f64) -> Option<(f64, f64)> {
        let exponent = self.eta + 1.0;

        let beta = (1.0 + 2.0 * (y1 - self.bounds.lower) / (y2 - y1)).min(SBX_SPREAD_CAP);
        let alpha = 2.0 - beta.powf(exponent).min(SBX_SPREAD_CAP);

        let beta_q = if u <= 1.0 / alpha {
            (u * alpha).powf(1.0 / exponent)
        } else {
            (1.0 / (2.0 - u * alpha)).powf(1.0 / exponent)
        };

        let c1 = 0.5 * ((y1 + y2) - beta_q * (y2 - y1));
        let c2 = 0.5 * ((y1 + y2) + beta_q * (y2 - y1));

        (c1.is_finite() && c2.is_finite()).then_some((c1, c2))
    }
}

impl Crossover<RealVector> for SafeSbx {
    fn crossover(&self, a: &mut RealVector, b: &mut RealVector, rng: &mut GenomeRng) -> bool {
        for (x, y) in a.0.iter_mut().zip(b.0.iter_mut()) {
            if (*x - *y).abs() < SBX_GENE_EPSILON {
                continue;
            }

            let (y1, y2) = if *x < *y { (*x, *y) } else { (*y, *x) };
            let u = rng.uniform();

            let committed = self.children(y1, y2, u).and_then(|(c1, c2)| {
                let (c1, c2) = (self.bounds.clamp(c1), self.bounds.clamp(c2));
                (self.bounds.contains(c1) && self.bounds.contains(c2)).then_some((c1, c2))
            });

            match committed {
                Some((low, high)) => {
                    // The larger parent keeps the larger child.
                    if *x > *y {
                        *x = high;
                        *y = low;
                    } else {
                        *x = low;
                        *y = high;
                    }
                }
                None => {
                    log::trace!("SBX fallback to linear blend for genes ({}, {})", x, y);
                    let w = rng.uniform();
                    let (px, py) = (*x, *y);
                    *x = self.bounds.clamp(w * px + (1.0 - w) * py);
                    *y = self.bounds.clamp((1.0 - w) * px + w * py);
                }
            }
        }
        true
    }
}

/// Simulated binary crossover with a plain two-branch spread and clamping.
#[derive(Debug, Clone)]
pub struct BoundedSbx {
    pub eta: f64,
    pub bounds: Bounds,
}

impl BoundedSbx {
    pub fn new(eta: f64, bounds: Bounds) -> Self {
        Self { eta, bounds }
    }
}

impl Crossover<RealVector> for BoundedSbx {
    fn crossover(&self, a: &mut RealVector, b: &mut RealVector, rng: &mut GenomeRng) -> bool {
        let exponent = 1.0 / (self.eta + 1.0);

        for (x, y) in a.0.iter_mut().zip(b.0.iter_mut()) {
            let u = rng.uniform();
            let beta = if u <= 0.5 {
                (2.0 * u).powf(exponent)
            } else {
                (1.0 / (2.0 * (1.0 - u))).powf(exponent)
            };

            let c1 = 0.5 * ((1.0 + beta) * *x + (1.0 - beta) * *y);
            let c2 = 0.5 * ((1.0 - beta) * *x + (1.0 + beta) * *y);
            *x = self.bounds.clamp(c1);
            *y = self.bounds.clamp(c2);
        }
        true
    }
}
