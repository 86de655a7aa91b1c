//! Wavefront OBJ loading (geometry only, materials are ignored).

use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use glam::{Mat4, Vec3};

use super::{compute_projected_plane_uvs, compute_surface_normals, MeshData, UvPlane};

/// Loads and merges every model in an OBJ file.
pub fn load_obj(path: &Path) -> Result<MeshData> {
    let bytes = std::fs::read(path).with_context(|| format!("read OBJ: {}", path.display()))?;
    parse_obj(&bytes).with_context(|| format!("parse OBJ: {}", path.display()))
}

/// Parses OBJ source into a single triangulated mesh.
///
/// Normals are taken from the file when every model provides them and
/// recomputed otherwise. UVs are planar-projected on XY.
pub fn parse_obj(bytes: &[u8]) -> Result<MeshData> {
    let opts = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(&mut &bytes[..], &opts, |_| {
        Ok((Vec::new(), Default::default()))
    })
    .context("invalid OBJ data")?;

    if models.is_empty() {
        bail!("no meshes in OBJ");
    }

    let mut mesh = MeshData::default();
    let mut file_normals = true;

    for model in models {
        let m = model.mesh;
        let base = u32::try_from(mesh.positions.len()).context("OBJ vertex count exceeds u32")?;
        let count = m.positions.len() / 3;

        mesh.positions
            .extend(m.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));

        if m.normals.len() == m.positions.len() {
            mesh.normals
                .extend(m.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        } else {
            file_normals = false;
        }

        if m.indices.is_empty() {
            // Unindexed: consecutive vertex triples.
            for t in 0..(count / 3) as u32 {
                mesh.triangles
                    .push([base + 3 * t, base + 3 * t + 1, base + 3 * t + 2]);
            }
        } else {
            for tri in m.indices.chunks_exact(3) {
                mesh.triangles.push([base + tri[0], base + tri[1], base + tri[2]]);
            }
        }

        log::debug!("OBJ model '{}': {} vertices", model.name, count);
    }

    ensure!(!mesh.triangles.is_empty(), "no triangles in OBJ");

    if !file_normals {
        mesh.normals = compute_surface_normals(&mesh.positions, &mesh.triangles);
    }
    mesh.uvs = compute_projected_plane_uvs(&mesh.positions, UvPlane::Xy);

    mesh.validate()?;
    Ok(mesh)
}

/// Model matrix that scales `mesh` to `target_height`, centers it on the XZ
/// origin and rests its lowest point on `y = 0`.
///
/// Meshes without height keep their scale.
pub fn fit_to_ground(mesh: &MeshData, target_height: f32) -> Mat4 {
    let Some((lo, hi)) = mesh.bounds() else {
        return Mat4::IDENTITY;
    };

    let height = hi.y - lo.y;
    let scale = if height > 0.0 && target_height > 0.0 {
        target_height / height
    } else {
        1.0
    };

    let center = (lo + hi) * 0.5;
    Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(Vec3::new(-center.x, -lo.y, -center.z))
}
