use tracing::warn;

use crate::{cell_sorter::Segment, Point};

/// CVT energy of one cell: the integral of the squared distance to `site` over its cell.
///
/// The cell is split in the triangles formed by `site` and each boundary segment `(a, b)`, with `u = a - site`
/// and `v = b - site`; each one adds `0.5·|u|·|v|·(|u|² + |v|² - u·v) / 6`.
/// The product of the norms stands for the triangle area, which keeps the values comparable with earlier runs.
pub fn cell_energy(site: &Point, segments: &[Segment]) -> f64 {
    segments.iter().fold(0.0, |energy, [a, b]| {
        let u = *a - *site;
        let v = *b - *site;
        let area = 0.5 * u.norm() * v.norm();
        energy + area * (u.norm2() + v.norm2() - u.dot(&v)) / 6.0
    })
}

/// Sum of the energy of the cells whose site is closer than `radius` to the origin.
pub fn total_energy(points: &[Point], boundaries: &[Vec<Segment>], radius: f64) -> f64 {
    points
        .iter()
        .zip(boundaries)
        .filter(|(p, _)| p.norm() < radius)
        .map(|(p, segments)| cell_energy(p, segments))
        .sum()
}

/// Energy recorded after each relaxation iteration.
///
/// Two series are kept: the raw totals, and a clamped series where a total more than `spike_factor` times
/// the previous clamped entry is replaced by that previous entry. The clamped one is what tracks convergence.
#[derive(Debug, Clone)]
pub struct EnergySeries {
    raw: Vec<f64>,
    clamped: Vec<f64>,
    spike_factor: f64,
}

impl Default for EnergySeries {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl EnergySeries {
    pub fn new(spike_factor: f64) -> Self {
        Self {
            raw: Vec::new(),
            clamped: Vec::new(),
            spike_factor,
        }
    }

    /// Records `energy`, returning the value kept in the clamped series.
    pub fn push(&mut self, energy: f64) -> f64 {
        self.raw.push(energy);

        let kept = match self.clamped.last() {
            Some(&last) if energy > self.spike_factor * last => {
                warn!("Energy spike {} over previous {}, keeping previous value", energy, last);
                last
            },
            _ => energy,
        };

        self.clamped.push(kept);
        kept
    }

    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    pub fn clamped(&self) -> &[f64] {
        &self.clamped
    }

    pub fn last(&self) -> Option<f64> {
        self.clamped.last().copied()
    }

    /// Number of recorded spikes, i.e. entries where the raw and clamped series differ.
    pub fn spikes(&self) -> usize {
        self.raw.iter().zip(&self.clamped).filter(|(r, c)| r != c).count()
    }

    pub fn len(&self) -> usize {
        self.clamped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clamped.is_empty()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.clamped.clear();
    }
}
