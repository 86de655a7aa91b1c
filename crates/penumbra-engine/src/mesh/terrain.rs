//! Procedural terrain grid.
//!
//! The grid spans `[0, size]` on X and Z. Vertices are emitted with X in the
//! outer loop and Z in the inner loop, so the vertex at grid cell `(ix, iz)`
//! has index `ix * vertices_per_row + iz`.

use anyhow::{ensure, Result};

use super::{compute_projected_plane_uvs, compute_surface_normals, MeshData, UvPlane};

/// Terrain grid parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TerrainDesc {
    /// Physical side length of the (square) terrain.
    pub size: f32,
    /// Distance between neighbouring vertices.
    pub spacing: f32,
}

impl Default for TerrainDesc {
    fn default() -> Self {
        Self {
            size: 100.0,
            spacing: 1.0,
        }
    }
}

impl TerrainDesc {
    #[inline]
    pub fn cells_per_row(&self) -> u32 {
        (self.size / self.spacing).round() as u32
    }

    #[inline]
    pub fn vertices_per_row(&self) -> u32 {
        self.cells_per_row().saturating_add(1)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.size.is_finite() && self.size > 0.0,
            "terrain size must be positive, got {}",
            self.size
        );
        ensure!(
            self.spacing.is_finite() && self.spacing > 0.0,
            "terrain spacing must be positive, got {}",
            self.spacing
        );
        ensure!(
            self.spacing <= self.size,
            "terrain spacing {} exceeds size {}",
            self.spacing,
            self.size
        );

        // Checked in f64 so huge ratios are rejected before any integer cast.
        let vpr = (f64::from(self.size) / f64::from(self.spacing)).round() + 1.0;
        ensure!(
            vpr * vpr <= f64::from(u32::MAX),
            "terrain grid of {vpr}x{vpr} vertices does not fit 32-bit indices"
        );
        Ok(())
    }
}

/// Generates a flat terrain grid at `y = 0`.
pub fn generate_terrain(desc: TerrainDesc) -> Result<MeshData> {
    generate_terrain_with(desc, |_, _| 0.0)
}

/// Generates a terrain grid whose vertex heights are `height(x, z)`.
pub fn generate_terrain_with<F>(desc: TerrainDesc, height: F) -> Result<MeshData>
where
    F: Fn(f32, f32) -> f32,
{
    desc.validate()?;

    let cells = desc.cells_per_row();
    let vpr = desc.vertices_per_row();

    let mut positions = Vec::with_capacity(vpr as usize * vpr as usize);
    for ix in 0..vpr {
        for iz in 0..vpr {
            let x = ix as f32 * desc.spacing;
            let z = iz as f32 * desc.spacing;
            positions.push([x, height(x, z), z]);
        }
    }

    let mut triangles = Vec::with_capacity(cells as usize * cells as usize * 2);
    for ix in 0..cells {
        for iz in 0..cells {
            let top_left = ix * vpr + iz;
            let top_right = top_left + 1;
            let bottom_left = top_left + vpr;
            let bottom_right = bottom_left + 1;

            // Both halves wind CCW seen from +Y.
            triangles.push([top_left, top_right, bottom_left]);
            triangles.push([top_right, bottom_right, bottom_left]);
        }
    }

    let normals = compute_surface_normals(&positions, &triangles);
    let uvs = compute_projected_plane_uvs(&positions, UvPlane::Xz);

    log::debug!(
        "terrain: {} vertices, {} triangles (size {}, spacing {})",
        positions.len(),
        triangles.len(),
        desc.size,
        desc.spacing
    );

    Ok(MeshData {
        positions,
        triangles,
        normals,
        uvs,
    })
}
