pub mod timing;

/// Numerical tolerances of the local eikonal update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceTolerances {
    /// Negative discriminants down to `-discriminant_rel_eps * cross² * dsq`
    /// are treated as round-off and clamped to zero.
    pub discriminant_rel_eps: f64,
    /// Neighbor centres closer than this are considered coincident.
    pub min_distance: f64,
}

impl Default for DistanceTolerances {
    fn default() -> Self {
        Self {
            discriminant_rel_eps: 1e-12,
            min_distance: 1e-14,
        }
    }
}

impl DistanceTolerances {
    /// Scale the distance tolerance to the mesh spacing.
    pub fn calibrated(min_spacing: f64) -> Self {
        Self {
            min_distance: (min_spacing * 1e-10).max(1e-14),
            ..Self::default()
        }
    }
}
