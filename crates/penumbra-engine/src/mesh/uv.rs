/// Plane positions are projected onto when generating planar UVs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum UvPlane {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl UvPlane {
    #[inline]
    fn axes(self) -> (usize, usize) {
        match self {
            UvPlane::Xy => (0, 1),
            UvPlane::Xz => (0, 2),
            UvPlane::Yz => (1, 2),
        }
    }
}

/// Planar-projected texture coordinates remapped to `[0, 1]` over the mesh extent.
///
/// An axis whose extent is zero (e.g. Y of a flat grid) maps to `0.0`.
pub fn compute_projected_plane_uvs(positions: &[[f32; 3]], plane: UvPlane) -> Vec<[f32; 2]> {
    let (a, b) = plane.axes();

    let mut min = [f32::INFINITY; 2];
    let mut max = [f32::NEG_INFINITY; 2];
    for p in positions {
        for (k, axis) in [a, b].into_iter().enumerate() {
            min[k] = min[k].min(p[axis]);
            max[k] = max[k].max(p[axis]);
        }
    }

    let remap = |v: f32, k: usize| {
        let extent = max[k] - min[k];
        if extent > 0.0 { (v - min[k]) / extent } else { 0.0 }
    };

    positions
        .iter()
        .map(|p| [remap(p[a], 0), remap(p[b], 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xy_projection_spans_unit_square() {
        let positions = [[-2.0, 1.0, 9.0], [2.0, 3.0, -9.0], [0.0, 2.0, 0.0]];
        let uvs = compute_projected_plane_uvs(&positions, UvPlane::Xy);
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 1.0], [0.5, 0.5]]);
    }

    #[test]
    fn xz_projection_ignores_height() {
        let positions = [[0.0, 5.0, 0.0], [10.0, -5.0, 20.0], [5.0, 0.0, 5.0]];
        let uvs = compute_projected_plane_uvs(&positions, UvPlane::Xz);
        assert_eq!(uvs[2], [0.5, 0.25]);
    }

    #[test]
    fn zero_extent_axis_maps_to_zero() {
        let positions = [[0.0, 0.0, 0.0], [4.0, 0.0, 1.0]];
        let uvs = compute_projected_plane_uvs(&positions, UvPlane::Xy);
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0]]);
        assert!(uvs.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_input_yields_no_uvs() {
        assert!(compute_projected_plane_uvs(&[], UvPlane::Yz).is_empty());
    }
}
