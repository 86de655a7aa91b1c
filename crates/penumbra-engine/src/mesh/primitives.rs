use glam::Vec3;

use super::MeshData;

/// Axis-aligned box centered at the origin with flat-shaded faces.
///
/// Each face has its own four vertices so normals stay per-face.
pub fn cuboid(half_extents: [f32; 3]) -> MeshData {
    let h = Vec3::from_array(half_extents);

    // (normal, u, v) with u x v == normal so the quads wind CCW from outside.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.positions.len() as u32;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (su, sv) in corners {
            let p = (n + u * su + v * sv) * h;
            mesh.positions.push(p.to_array());
            mesh.normals.push(n.to_array());
            mesh.uvs.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }
        mesh.triangles.push([base, base + 1, base + 2]);
        mesh.triangles.push([base, base + 2, base + 3]);
    }
    mesh
}
