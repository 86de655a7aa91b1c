use std::path::Path;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use penumbra_engine::camera::{CameraInput, Projection, WasdCamera};
use penumbra_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use penumbra_engine::input::Key;
use penumbra_engine::mesh::{cuboid, fit_to_ground, generate_terrain, load_obj, MeshData, TerrainDesc};
use penumbra_engine::render::shadow::{GpuMesh, ShadowConfig, ShadowRenderer};
use penumbra_engine::render::RenderCtx;

pub const TITLE: &str = "penumbra: shadow mapping";

/// Height the model is scaled to, in world units.
const MODEL_HEIGHT: f32 = 20.0;

/// Shadow-mapping sample: a model standing on a terrain plane under one light.
pub struct ShadowSample {
    model: MeshData,
    model_matrix: Mat4,
    terrain: MeshData,
    terrain_matrix: Mat4,

    camera: WasdCamera,
    projection: Projection,
    stats: FrameStats,

    scene: Option<Scene>,
}

struct Scene {
    renderer: ShadowRenderer,
    model: GpuMesh,
    terrain: GpuMesh,
}

impl ShadowSample {
    /// Builds the CPU-side meshes. `model` is an OBJ file; a box stands in without one.
    pub fn new(model: Option<&Path>) -> Result<Self> {
        let model = match model {
            Some(path) => {
                log::info!("loading model {}", path.display());
                load_obj(path).with_context(|| format!("failed to load model {}", path.display()))?
            }
            None => cuboid([4.0, 10.0, 4.0]),
        };
        let model_matrix = fit_to_ground(&model, MODEL_HEIGHT);

        let desc = TerrainDesc::default();
        let terrain = generate_terrain(desc).context("failed to generate terrain")?;
        // Grid starts at the origin; center it under the model.
        let half = desc.size * 0.5;
        let terrain_matrix = Mat4::from_translation(Vec3::new(-half, 0.0, -half));

        log::info!(
            "scene: model {} vertices, terrain {} vertices",
            model.vertex_count(),
            terrain.vertex_count()
        );

        Ok(Self {
            model,
            model_matrix,
            terrain,
            terrain_matrix,
            camera: WasdCamera::default(),
            projection: Projection::default(),
            stats: FrameStats::default(),
            scene: None,
        })
    }
}

impl App for ShadowSample {
    fn on_start(&mut self, _window: &WindowCtx<'_>, ctx: &RenderCtx<'_>) -> Result<()> {
        let renderer = ShadowRenderer::new(ctx, ShadowConfig::default())?;

        let model = renderer.upload_mesh(ctx, "model", &self.model)?;
        let terrain = renderer.upload_mesh(ctx, "terrain", &self.terrain)?;
        renderer.set_model_matrix(ctx.queue, &model, self.model_matrix);
        renderer.set_model_matrix(ctx.queue, &terrain, self.terrain_matrix);

        self.projection.set_viewport(ctx.width, ctx.height);
        self.scene = Some(Scene {
            renderer,
            model,
            terrain,
        });
        Ok(())
    }

    fn on_resize(&mut self, ctx: &RenderCtx<'_>) {
        self.projection.set_viewport(ctx.width, ctx.height);
        if let Some(scene) = self.scene.as_mut() {
            scene.renderer.resize(ctx.device, ctx.width, ctx.height);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            ctx.runtime.exit();
            return AppControl::Continue;
        }
        if ctx.input_frame.key_pressed(Key::R) {
            log::debug!("camera reset");
            self.camera = WasdCamera::default();
        }

        let input = CameraInput::from_input(ctx.input, ctx.input_frame);
        let view = self.camera.update(ctx.time.dt, &input);
        let view_proj = self.projection.matrix() * view;

        if let Some(fps) = self.stats.tick(ctx.time.elapsed) {
            ctx.window.set_title(&format!("{TITLE} ({fps:.0} fps)"));
        }

        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        ctx.render(|rctx, target| {
            scene.renderer.set_camera(rctx.queue, view_proj);
            scene
                .renderer
                .render(rctx, target, &[&scene.model, &scene.terrain]);
        })
    }
}

/// Frames-per-second over roughly one-second windows.
#[derive(Debug, Default)]
struct FrameStats {
    window_start: f32,
    frames: u32,
}

impl FrameStats {
    const WINDOW: f32 = 1.0;

    /// Counts a frame; returns the rate once a window has elapsed.
    fn tick(&mut self, elapsed: f32) -> Option<f32> {
        self.frames += 1;
        let span = elapsed - self.window_start;
        if span < Self::WINDOW {
            return None;
        }
        let fps = self.frames as f32 / span;
        self.window_start = elapsed;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_stats_report_once_per_window() {
        let mut s = FrameStats::default();
        for i in 1..60 {
            assert_eq!(s.tick(i as f32 / 60.0), None);
        }
        let fps = s.tick(1.0).expect("window elapsed");
        assert!((fps - 60.0).abs() < 1e-3);
        assert_eq!(s.tick(1.01), None);
    }

    #[test]
    fn default_scene_builds_without_a_model_file() {
        let sample = ShadowSample::new(None).expect("builds");
        assert_eq!(sample.terrain.vertex_count(), 101 * 101);
        // Terrain is centered on the origin.
        let corner = sample.terrain_matrix.transform_point3(Vec3::ZERO);
        assert_eq!(corner, Vec3::new(-50.0, 0.0, -50.0));
        // Model rests on the ground.
        let (lo, _) = sample.model.bounds().expect("non-empty");
        assert!(sample.model_matrix.transform_point3(lo).y.abs() < 1e-4);
    }

    #[test]
    fn missing_model_file_is_an_error() {
        assert!(ShadowSample::new(Some(Path::new("/nonexistent/model.obj"))).is_err());
    }
}
