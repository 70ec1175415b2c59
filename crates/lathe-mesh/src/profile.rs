//! Profile grid: remaining stock radius per (spoke, axial sample).
//!
//! The grid is stored spoke-major in one flat buffer whose size is fixed at
//! construction. Radii only ever decrease.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};
use std::ops::Range;

use lathe_core::traits::Validate;
use lathe_core::{CrossSectionKind, LatheConfig, Result, Tolerance};

/// Radius scale of a cross-section at `angle`, relative to the base radius.
///
/// `Square` scales by `sqrt(1 + t^2) / sqrt(2)` with `t = |tan(angle)|` folded
/// into `[0, 1]`, which touches the base circle on the diagonals.
pub fn cross_section_factor(kind: CrossSectionKind, angle: f64) -> f64 {
    match kind {
        CrossSectionKind::Circle => 1.0,
        CrossSectionKind::Square => {
            let mut t = angle.tan().abs();
            if t > 1.0 {
                t = 1.0 / t;
            }
            (1.0 + t * t).sqrt() * FRAC_1_SQRT_2
        }
    }
}

/// Neighbourhood of grid cells touched by one carve.
///
/// Covers `[index - reach, index + reach]` on both axes. The angular range wraps
/// around the circumference; the axial range is clipped to the stock ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveRegion {
    pub angle_index: usize,
    pub angle_reach: usize,
    /// Nearest axial sample; may lie beyond either end of the stock.
    pub axial_index: i64,
    pub axial_reach: usize,
}

impl CarveRegion {
    /// A region covering exactly one cell.
    pub fn cell(angle_index: usize, axial_index: i64) -> Self {
        Self {
            angle_index,
            angle_reach: 0,
            axial_index,
            axial_reach: 0,
        }
    }

    /// Spoke indices covered, each visited once even if the reach exceeds half the ring.
    pub fn spokes(&self, radial_segments: usize) -> impl Iterator<Item = usize> {
        let n = radial_segments as i64;
        let reach = self.angle_reach.min(radial_segments) as i64;
        let count = (2 * reach + 1).min(n);
        let start = self.angle_index as i64 - reach;
        (0..count).map(move |k| (start + k).rem_euclid(n) as usize)
    }

    /// Axial sample indices covered, clipped to `[0, axial_segments]`.
    pub fn samples(&self, axial_segments: usize) -> Range<usize> {
        let reach = self.axial_reach.min(axial_segments + 1) as i64;
        let lo = self.axial_index.saturating_sub(reach).max(0);
        let hi = self
            .axial_index
            .saturating_add(reach)
            .min(axial_segments as i64);
        if lo > hi {
            0..0
        } else {
            lo as usize..hi as usize + 1
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileGrid {
    radial_segments: usize,
    axial_segments: usize,
    /// `radial_segments * (axial_segments + 1)` radii, spoke-major.
    radii: Vec<f64>,
    /// Uncut radius of each spoke.
    initial: Vec<f64>,
    tolerance: Tolerance,
}

impl ProfileGrid {
    /// Build a prism-shaped profile: every sample of spoke `i` gets
    /// `cross_section(i * 2pi / radial_segments) * base_radius`.
    pub fn new<F>(
        radial_segments: usize,
        axial_segments: usize,
        cross_section: F,
        base_radius: f64,
    ) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        LatheConfig {
            radial_segments,
            axial_segments,
            base_radius,
            ..Default::default()
        }
        .validate()?;

        let tolerance = Tolerance::default();
        let samples = axial_segments + 1;
        let angle_step = TAU / radial_segments as f64;

        let initial: Vec<f64> = (0..radial_segments)
            .map(|i| tolerance.floor_radius(cross_section(i as f64 * angle_step) * base_radius))
            .collect();
        let radii = initial
            .iter()
            .flat_map(|&r| std::iter::repeat(r).take(samples))
            .collect();

        Ok(Self {
            radial_segments,
            axial_segments,
            radii,
            initial,
            tolerance,
        })
    }

    pub fn from_config(config: &LatheConfig) -> Result<Self> {
        config.validate()?;
        let kind = config.cross_section;
        Self::new(
            config.radial_segments,
            config.axial_segments,
            |angle| cross_section_factor(kind, angle),
            config.base_radius,
        )
    }

    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    pub fn axial_segments(&self) -> usize {
        self.axial_segments
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn offset(&self, spoke: usize, sample: usize) -> usize {
        spoke * (self.axial_segments + 1) + sample
    }

    /// Remaining radius at a cell, or `None` if `sample > axial_segments`.
    /// `spoke` wraps around the circumference.
    pub fn radius(&self, spoke: usize, sample: usize) -> Option<f64> {
        if sample > self.axial_segments {
            return None;
        }
        self.radii
            .get(self.offset(spoke % self.radial_segments, sample))
            .copied()
    }

    /// All samples of one spoke, from the bottom end to the top end.
    pub fn spoke(&self, spoke: usize) -> &[f64] {
        let start = self.offset(spoke % self.radial_segments, 0);
        &self.radii[start..start + self.axial_segments + 1]
    }

    /// Lower every cell in `region` to at most `candidate`.
    ///
    /// `candidate` is floored to the minimum radius. Returns whether any cell changed.
    pub fn apply_carve(&mut self, region: &CarveRegion, candidate: f64) -> bool {
        let candidate = self.tolerance.floor_radius(candidate);
        let samples = region.samples(self.axial_segments);
        if samples.is_empty() {
            return false;
        }

        let mut changed = false;
        for spoke in region.spokes(self.radial_segments) {
            for sample in samples.clone() {
                let offset = self.offset(spoke, sample);
                let r = &mut self.radii[offset];
                if candidate < *r {
                    *r = candidate;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Smallest remaining radius anywhere on the stock.
    pub fn min_radius(&self) -> f64 {
        self.radii.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Number of cells that have lost material.
    pub fn carved_cell_count(&self) -> usize {
        let samples = self.axial_segments + 1;
        self.radii
            .chunks_exact(samples)
            .zip(&self.initial)
            .map(|(spoke, &r0)| spoke.iter().filter(|&&r| r < r0).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn round_grid() -> ProfileGrid {
        ProfileGrid::new(8, 4, |_| 1.0, 0.1).unwrap()
    }

    #[test]
    fn test_new_fills_prism() {
        let grid = round_grid();
        for spoke in 0..8 {
            assert_eq!(grid.spoke(spoke).len(), 5);
            for sample in 0..=4 {
                assert_eq!(grid.radius(spoke, sample).unwrap(), 0.1);
            }
        }
        assert_eq!(grid.carved_cell_count(), 0);
    }

    #[test]
    fn test_new_rejects_small_counts() {
        assert!(ProfileGrid::new(3, 4, |_| 1.0, 0.1).is_err());
        assert!(ProfileGrid::new(8, 0, |_| 1.0, 0.1).is_err());
        assert!(ProfileGrid::new(8, 4, |_| 1.0, 0.0).is_err());
    }

    #[test]
    fn test_cross_section_evaluated_per_spoke() {
        let grid = ProfileGrid::new(4, 2, |angle| 1.0 + angle, 1.0).unwrap();
        for spoke in 0..4 {
            let expected = 1.0 + spoke as f64 * FRAC_PI_2;
            let r = grid.radius(spoke, 1).unwrap();
            assert_relative_eq!(r, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_square_cross_section() {
        let kind = CrossSectionKind::Square;
        assert_relative_eq!(cross_section_factor(kind, 0.0), FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(cross_section_factor(kind, FRAC_PI_4), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cross_section_factor(kind, FRAC_PI_2), FRAC_1_SQRT_2, epsilon = 1e-9);
        for i in 0..64 {
            let f = cross_section_factor(kind, i as f64 * TAU / 64.0);
            assert!(f <= 1.0 + 1e-12 && f >= FRAC_1_SQRT_2 - 1e-12);
        }
    }

    #[test]
    fn test_region_spokes_wrap() {
        let region = CarveRegion {
            angle_index: 0,
            angle_reach: 1,
            axial_index: 0,
            axial_reach: 0,
        };
        let spokes: Vec<_> = region.spokes(8).collect();
        assert_eq!(spokes, vec![7, 0, 1]);
    }

    #[test]
    fn test_region_spokes_saturate() {
        let region = CarveRegion {
            angle_index: 5,
            angle_reach: 100,
            axial_index: 0,
            axial_reach: 0,
        };
        let mut spokes: Vec<_> = region.spokes(8).collect();
        spokes.sort_unstable();
        assert_eq!(spokes, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_region_samples_clip() {
        let mut region = CarveRegion::cell(0, 0);
        region.axial_reach = 2;
        assert_eq!(region.samples(4), 0..3);

        region.axial_index = 4;
        assert_eq!(region.samples(4), 2..5);

        region.axial_index = -5;
        assert!(region.samples(4).is_empty());

        region.axial_index = 9;
        assert!(region.samples(4).is_empty());
    }

    #[test]
    fn test_region_samples_at_index_limits() {
        let mut region = CarveRegion::cell(0, i64::MAX);
        region.axial_reach = 3;
        assert!(region.samples(4).is_empty());

        region.axial_index = i64::MIN;
        assert!(region.samples(4).is_empty());

        region.axial_index = 2;
        region.axial_reach = usize::MAX;
        assert_eq!(region.samples(4), 0..5);
    }

    #[test]
    fn test_radius_out_of_range_is_none() {
        let grid = round_grid();
        assert_eq!(grid.radius(0, 4), Some(0.1));
        assert_eq!(grid.radius(9, 0), Some(0.1));
        assert_eq!(grid.radius(0, 5), None);
        assert_eq!(grid.radius(3, usize::MAX), None);
    }

    #[test]
    fn test_apply_carve_single_cell() {
        let mut grid = round_grid();
        assert!(grid.apply_carve(&CarveRegion::cell(3, 2), 0.04));
        assert_eq!(grid.radius(3, 2).unwrap(), 0.04);
        assert_eq!(grid.carved_cell_count(), 1);
        assert_eq!(grid.min_radius(), 0.04);
    }

    #[test]
    fn test_apply_carve_never_grows() {
        let mut grid = round_grid();
        assert!(grid.apply_carve(&CarveRegion::cell(0, 0), 0.05));
        assert!(!grid.apply_carve(&CarveRegion::cell(0, 0), 0.07));
        assert!(!grid.apply_carve(&CarveRegion::cell(0, 0), 0.05));
        assert_eq!(grid.radius(0, 0).unwrap(), 0.05);
    }

    #[test]
    fn test_apply_carve_floors_candidate() {
        let mut grid = round_grid();
        assert!(grid.apply_carve(&CarveRegion::cell(1, 1), -3.0));
        assert_eq!(grid.radius(1, 1).unwrap(), Tolerance::DEFAULT_MIN_RADIUS);
        assert!(grid.radius(1, 1).unwrap() > 0.0);
    }

    #[test]
    fn test_apply_carve_out_of_range_is_noop() {
        let mut grid = round_grid();
        let before = grid.clone();
        assert!(!grid.apply_carve(&CarveRegion::cell(0, -2), 0.01));
        assert!(!grid.apply_carve(&CarveRegion::cell(0, 6), 0.01));
        assert_eq!(grid, before);
    }
}
