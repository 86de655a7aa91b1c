use glam::Vec3;

/// Computes smooth per-vertex normals for an indexed triangle list.
///
/// Each triangle contributes the cross product of its two (normalized) edges
/// leaving the first vertex to all three of its vertices; the sums are then
/// normalized. Counter-clockwise triangles produce outward normals.
///
/// Vertices that end up with a zero sum get +Y.
pub fn compute_surface_normals(positions: &[[f32; 3]], triangles: &[[u32; 3]]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];

    for &[i0, i1, i2] in triangles {
        let (Some(&p0), Some(&p1), Some(&p2)) = (
            positions.get(i0 as usize),
            positions.get(i1 as usize),
            positions.get(i2 as usize),
        ) else {
            log::warn!("skipping triangle [{i0}, {i1}, {i2}] with out-of-range index");
            continue;
        };

        let p0 = Vec3::from_array(p0);
        let e0 = (Vec3::from_array(p1) - p0).normalize_or_zero();
        let e1 = (Vec3::from_array(p2) - p0).normalize_or_zero();
        let face = e0.cross(e1);

        acc[i0 as usize] += face;
        acc[i1 as usize] += face;
        acc[i2 as usize] += face;
    }

    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            let n = if n == Vec3::ZERO { Vec3::Y } else { n };
            n.to_array()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn ccw_triangle_in_xz_plane_faces_up() {
        let positions = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let n = compute_surface_normals(&positions, &[[0, 1, 2]]);
        for v in n {
            assert!(approx(v, [0.0, 1.0, 0.0]), "{v:?}");
        }
    }

    #[test]
    fn reversed_winding_faces_down() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let n = compute_surface_normals(&positions, &[[0, 1, 2]]);
        assert!(approx(n[0], [0.0, -1.0, 0.0]));
    }

    #[test]
    fn shared_edge_averages_face_normals() {
        // Two faces meeting at a right angle along the Z axis: +Y and +X.
        let positions = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ];
        let n = compute_surface_normals(&positions, &[[0, 1, 2], [0, 1, 3]]);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx(n[0], [s, s, 0.0]), "{:?}", n[0]);
        assert!(approx(n[2], [0.0, 1.0, 0.0]));
        assert!(approx(n[3], [1.0, 0.0, 0.0]));
    }

    #[test]
    fn unused_and_degenerate_vertices_default_to_up() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [5.0, 5.0, 5.0]];
        let n = compute_surface_normals(&positions, &[[0, 1, 2]]);
        assert_eq!(n.len(), 4);
        assert!(n.iter().all(|&v| approx(v, [0.0, 1.0, 0.0])));
    }

    #[test]
    fn out_of_range_triangle_is_skipped() {
        let positions = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let n = compute_surface_normals(&positions, &[[0, 1, 7], [0, 1, 2]]);
        assert!(approx(n[0], [0.0, 1.0, 0.0]));
    }
}
