//! Shadow-mapped forward renderer.
//!
//! Two passes per frame:
//! 1. depth-only pass from the light into a square `Depth32Float` shadow map
//! 2. shaded pass from the camera that samples the shadow map with a
//!    comparison sampler (3x3 PCF)
//!
//! Every uploaded mesh owns a model uniform; the scene uniform (light and
//! camera matrices, light position) is shared.

mod config;
mod light;
mod renderer;
mod uniforms;

pub use config::ShadowConfig;
pub use light::LightRig;
pub use renderer::{GpuMesh, ShadowRenderer};
pub use uniforms::{ModelUniform, SceneUniform};

/// Format of the light's depth map.
pub const SHADOW_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Format of the camera pass depth/stencil attachment.
pub const MAIN_DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

pub(crate) const VERTEX_SHADOW_WGSL: &str = include_str!("shaders/vertex_shadow.wgsl");
pub(crate) const VERTEX_WGSL: &str = include_str!("shaders/vertex.wgsl");
pub(crate) const FRAGMENT_WGSL: &str = include_str!("shaders/fragment.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate(src: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(src).expect("wgsl parses");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .expect("wgsl validates");
        module
    }

    fn struct_span(module: &naga::Module, name: &str) -> u32 {
        module
            .types
            .iter()
            .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
                (Some(n), naga::TypeInner::Struct { span, .. }) if n == name => Some(*span),
                _ => None,
            })
            .expect("struct present")
    }

    fn has_entry(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> bool {
        module
            .entry_points
            .iter()
            .any(|ep| ep.name == name && ep.stage == stage)
    }

    fn vertex_locations(module: &naga::Module) -> Vec<u32> {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == naga::ShaderStage::Vertex)
            .expect("vertex entry point");
        let mut locs: Vec<u32> = ep
            .function
            .arguments
            .iter()
            .filter_map(|arg| match arg.binding {
                Some(naga::Binding::Location { location, .. }) => Some(location),
                _ => None,
            })
            .collect();
        locs.sort_unstable();
        locs
    }

    // ── shader sources ─────────────────────────────────────────────────────

    #[test]
    fn shadow_vertex_shader_is_valid() {
        let m = parse_and_validate(VERTEX_SHADOW_WGSL);
        assert!(has_entry(&m, "vs_main", naga::ShaderStage::Vertex));
        assert_eq!(vertex_locations(&m), vec![0]);
    }

    #[test]
    fn vertex_shader_is_valid() {
        let m = parse_and_validate(VERTEX_WGSL);
        assert!(has_entry(&m, "vs_main", naga::ShaderStage::Vertex));
        assert_eq!(vertex_locations(&m), vec![0, 1]);
    }

    #[test]
    fn fragment_shader_is_valid_and_overridable() {
        let m = parse_and_validate(FRAGMENT_WGSL);
        assert!(has_entry(&m, "fs_main", naga::ShaderStage::Fragment));
        assert!(m
            .overrides
            .iter()
            .any(|(_, o)| o.name.as_deref() == Some("shadowDepthTextureSize")));
    }

    // ── uniform layout ─────────────────────────────────────────────────────

    #[test]
    fn scene_struct_matches_rust_uniform() {
        for src in [VERTEX_SHADOW_WGSL, VERTEX_WGSL, FRAGMENT_WGSL] {
            let m = parse_and_validate(src);
            assert_eq!(struct_span(&m, "Scene") as usize, std::mem::size_of::<SceneUniform>());
        }
    }

    #[test]
    fn model_struct_matches_rust_uniform() {
        for src in [VERTEX_SHADOW_WGSL, VERTEX_WGSL] {
            let m = parse_and_validate(src);
            assert_eq!(struct_span(&m, "Model") as usize, std::mem::size_of::<ModelUniform>());
        }
    }
}
