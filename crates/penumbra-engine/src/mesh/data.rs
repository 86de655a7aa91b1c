use anyhow::{ensure, Result};
use glam::Vec3;

use super::Vertex;

/// Indexed triangle mesh in CPU memory.
///
/// Attribute arrays are parallel: `normals[i]` and `uvs[i]` belong to `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Interleaves positions, normals and uvs.
    ///
    /// Missing normals default to +Y and missing uvs to zero.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                uv: self.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }

    /// Flattens triangles into an index list.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.positions.iter().map(|&p| Vec3::from_array(p));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Like `validate`, and also requires at least one triangle.
    ///
    /// GPU buffers cannot be created from (or bound as) empty slices.
    pub fn validate_drawable(&self) -> Result<()> {
        ensure!(
            !self.positions.is_empty() && !self.triangles.is_empty(),
            "mesh has no triangles"
        );
        self.validate()
    }

    /// Checks attribute lengths and index ranges.
    pub fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        ensure!(
            self.normals.len() == n,
            "normal count {} does not match position count {n}",
            self.normals.len()
        );
        ensure!(
            self.uvs.len() == n,
            "uv count {} does not match position count {n}",
            self.uvs.len()
        );
        if let Some((t, tri)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&i| i as usize >= n))
        {
            anyhow::bail!("triangle {t} {tri:?} references a vertex outside 0..{n}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 2.0, 0.0], [0.0, -1.0, 3.0]],
            triangles: vec![[0, 1, 2]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            uvs: vec![[0.5, 0.5]; 3],
        }
    }

    #[test]
    fn bounds_cover_all_positions() {
        let (lo, hi) = triangle().bounds().unwrap();
        assert_eq!(lo, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(hi, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn bounds_of_empty_mesh_is_none() {
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn indices_flatten_in_order() {
        let mut m = triangle();
        m.triangles.push([2, 1, 0]);
        assert_eq!(m.indices(), vec![0, 1, 2, 2, 1, 0]);
        assert_eq!(m.index_count(), 6);
    }

    #[test]
    fn vertices_fill_missing_attributes() {
        let mut m = triangle();
        m.normals.clear();
        m.uvs.clear();
        let v = m.vertices();
        assert_eq!(v.len(), 3);
        assert_eq!(v[1].position, [1.0, 2.0, 0.0]);
        assert_eq!(v[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(v[1].uv, [0.0, 0.0]);
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut m = triangle();
        m.triangles.push([0, 1, 3]);
        assert!(m.validate().is_err());
    }

    #[test]
    fn empty_mesh_is_not_drawable() {
        assert!(MeshData::default().validate().is_ok());
        assert!(MeshData::default().validate_drawable().is_err());

        let mut points_only = triangle();
        points_only.triangles.clear();
        assert!(points_only.validate_drawable().is_err());

        assert!(triangle().validate_drawable().is_ok());
    }

    #[test]
    fn validate_rejects_attribute_mismatch() {
        let mut m = triangle();
        m.uvs.pop();
        assert!(m.validate().is_err());
        assert!(triangle().validate().is_ok());
    }
}
