//! Per-frame orchestration: depth capture, then composite.
//!
//! Each frame renders the scene twice. The first pass hides the water and
//! writes the scene depth into an off-screen capture target; the second
//! pass draws everything to the window while the water shader compares
//! its own depth with the captured one to place shoreline foam.
//!
//! # Invariants
//! - The capture render is issued before the water uniforms are uploaded
//!   and before the final render, every frame.
//! - The water is invisible only while the capture render runs.
//! - The depth binding is marked refreshed from the uniform upload until
//!   the composite render returns.
//! - Size-dependent resources are recreated before the capture pass of
//!   the first frame that sees a new viewport size, and only then.

use tracing::{debug, trace};

use crate::scene::Scene;

/// Viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Minimized windows report a zero-sized viewport
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where a render submission is directed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Off-screen target whose depth attachment the water samples
    DepthCapture,
    /// The window surface
    Surface,
}

/// Rendering backend seen by the orchestrator
pub trait SceneRenderer {
    type Error;

    /// Recreate size-dependent resources (depth capture target, surface)
    fn resize(&mut self, viewport: Viewport);

    /// Upload `scene.water.state` to the water shader
    fn upload_water(&mut self, scene: &Scene);

    /// Render every visible node of `scene` into `target`
    fn render(&mut self, scene: &Scene, target: RenderTarget) -> Result<(), Self::Error>;
}

/// What happened to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// Nothing to draw into (zero-sized viewport)
    Skipped,
}

/// Drives the two-pass frame. Owns no scheduling policy: the caller
/// invokes [`FrameOrchestrator::run_frame`] once per display refresh.
#[derive(Debug, Default)]
pub struct FrameOrchestrator {
    viewport: Option<Viewport>,
    depth_epoch: u64,
    elapsed_s: f32,
    frames: u64,
}

impl FrameOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last viewport size resources were built for
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn depth_epoch(&self) -> u64 {
        self.depth_epoch
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Recreate size-dependent state if `viewport` differs from the last
    /// size seen. Returns true when anything was rebuilt.
    pub fn handle_resize<R>(
        &mut self,
        scene: &mut Scene,
        renderer: &mut R,
        viewport: Viewport,
    ) -> bool
    where
        R: SceneRenderer + ?Sized,
    {
        if viewport.is_empty() || self.viewport == Some(viewport) {
            return false;
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport changed, recreating depth capture target"
        );

        renderer.resize(viewport);
        scene.camera.set_viewport(viewport.width, viewport.height);
        self.viewport = Some(viewport);
        self.depth_epoch += 1;
        true
    }

    /// Run one frame: resize check, depth capture, uniform update, final render.
    ///
    /// `elapsed_s` is the caller's clock; the value handed to the shader
    /// never decreases.
    pub fn run_frame<R>(
        &mut self,
        scene: &mut Scene,
        renderer: &mut R,
        viewport: Viewport,
        elapsed_s: f32,
    ) -> Result<FrameOutcome, R::Error>
    where
        R: SceneRenderer + ?Sized,
    {
        if viewport.is_empty() {
            trace!("zero-sized viewport, skipping frame");
            return Ok(FrameOutcome::Skipped);
        }

        self.handle_resize(scene, renderer, viewport);

        self.capture_depth(scene, renderer)?;
        self.update_water_uniforms(scene, viewport, elapsed_s);
        renderer.upload_water(scene);

        let composite = renderer.render(scene, RenderTarget::Surface);
        scene.water.state.depth.refreshed = false;
        composite?;

        self.frames += 1;
        Ok(FrameOutcome::Rendered)
    }

    /// Render the scene without water into the capture target
    fn capture_depth<R>(&mut self, scene: &mut Scene, renderer: &mut R) -> Result<(), R::Error>
    where
        R: SceneRenderer + ?Sized,
    {
        scene.water.visible = false;
        let result = renderer.render(scene, RenderTarget::DepthCapture);
        scene.water.visible = true;
        result
    }

    fn update_water_uniforms(&mut self, scene: &mut Scene, viewport: Viewport, elapsed_s: f32) {
        if elapsed_s.is_finite() {
            self.elapsed_s = self.elapsed_s.max(elapsed_s);
        }

        let state = &mut scene.water.state;
        state.elapsed_time = self.elapsed_s;
        state.depth.epoch = self.depth_epoch;
        state.depth.refreshed = true;
        state.resolution = [viewport.width as f32, viewport.height as f32];
        state.camera_near = scene.camera.near();
        state.camera_far = scene.camera.far();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SceneConfig;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Resize(Viewport),
        Render {
            target: RenderTarget,
            water_visible: bool,
        },
        UploadWater {
            elapsed: f32,
            epoch: u64,
            refreshed: bool,
            resolution: [f32; 2],
            near: f32,
            far: f32,
        },
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
        fail_capture: bool,
        fail_composite: bool,
        refreshed_at_composite: Vec<bool>,
    }

    impl SceneRenderer for RecordingRenderer {
        type Error = &'static str;

        fn resize(&mut self, viewport: Viewport) {
            self.calls.push(Call::Resize(viewport));
        }

        fn upload_water(&mut self, scene: &Scene) {
            let state = &scene.water.state;
            self.calls.push(Call::UploadWater {
                elapsed: state.elapsed_time,
                epoch: state.depth.epoch,
                refreshed: state.depth.refreshed,
                resolution: state.resolution,
                near: state.camera_near,
                far: state.camera_far,
            });
        }

        fn render(&mut self, scene: &Scene, target: RenderTarget) -> Result<(), Self::Error> {
            self.calls.push(Call::Render {
                target,
                water_visible: scene.water.visible,
            });
            if self.fail_capture && target == RenderTarget::DepthCapture {
                return Err("capture failed");
            }
            if target == RenderTarget::Surface {
                self.refreshed_at_composite.push(scene.water.state.depth.refreshed);
                if self.fail_composite {
                    return Err("composite failed");
                }
            }
            Ok(())
        }
    }

    fn small_scene() -> Scene {
        let mut config = SceneConfig::lagoon();
        config.terrain.segments_x = 8;
        config.terrain.segments_y = 8;
        config.water.segments = 4;
        Scene::build(&config, &|x: f32, y: f32| (x * 0.1).sin() * (y * 0.1).cos()).unwrap()
    }

    #[test]
    fn test_depth_capture_precedes_composite_every_frame() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();
        let viewport = Viewport::new(800, 600);

        for i in 0..3 {
            renderer.calls.clear();
            let outcome = frames
                .run_frame(&mut scene, &mut renderer, viewport, i as f32 * 0.016)
                .unwrap();
            assert_eq!(outcome, FrameOutcome::Rendered);

            let calls: Vec<_> = renderer
                .calls
                .iter()
                .filter(|c| !matches!(c, Call::Resize(_)))
                .cloned()
                .collect();
            assert_eq!(calls.len(), 3, "frame {}: {:?}", i, calls);
            assert_eq!(
                calls[0],
                Call::Render {
                    target: RenderTarget::DepthCapture,
                    water_visible: false,
                }
            );
            assert!(matches!(calls[1], Call::UploadWater { refreshed: true, .. }));
            assert_eq!(
                calls[2],
                Call::Render {
                    target: RenderTarget::Surface,
                    water_visible: true,
                }
            );
        }
        assert_eq!(frames.frames_rendered(), 3);
        assert!(scene.water.visible);
    }

    #[test]
    fn test_resize_happens_before_capture() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();

        frames
            .run_frame(&mut scene, &mut renderer, Viewport::new(640, 480), 0.0)
            .unwrap();
        assert_eq!(renderer.calls[0], Call::Resize(Viewport::new(640, 480)));

        renderer.calls.clear();
        frames
            .run_frame(&mut scene, &mut renderer, Viewport::new(1024, 512), 0.1)
            .unwrap();
        assert_eq!(renderer.calls[0], Call::Resize(Viewport::new(1024, 512)));
        assert_eq!(scene.camera.aspect(), 2.0);
        assert!(matches!(
            renderer.calls[2],
            Call::UploadWater {
                epoch: 2,
                resolution: [1024.0, 512.0],
                ..
            }
        ));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();
        let viewport = Viewport::new(1280, 720);

        assert!(frames.handle_resize(&mut scene, &mut renderer, viewport));
        let aspect = scene.camera.aspect();
        let epoch = frames.depth_epoch();

        assert!(!frames.handle_resize(&mut scene, &mut renderer, viewport));
        frames
            .run_frame(&mut scene, &mut renderer, viewport, 0.0)
            .unwrap();

        let resizes = renderer
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Resize(_)))
            .count();
        assert_eq!(resizes, 1);
        assert_eq!(scene.camera.aspect(), aspect);
        assert_eq!(frames.depth_epoch(), epoch);
    }

    #[test]
    fn test_uniforms_carry_camera_planes_and_monotonic_time() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();
        let viewport = Viewport::new(800, 600);

        frames
            .run_frame(&mut scene, &mut renderer, viewport, 2.0)
            .unwrap();
        frames
            .run_frame(&mut scene, &mut renderer, viewport, 1.5)
            .unwrap();
        frames
            .run_frame(&mut scene, &mut renderer, viewport, f32::NAN)
            .unwrap();

        let uploads: Vec<_> = renderer
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::UploadWater {
                    elapsed, near, far, ..
                } => Some((*elapsed, *near, *far)),
                _ => None,
            })
            .collect();

        assert_eq!(uploads.len(), 3);
        for (elapsed, near, far) in uploads {
            assert_eq!(elapsed, 2.0);
            assert_eq!(near, scene.camera.near());
            assert_eq!(far, scene.camera.far());
        }
    }

    #[test]
    fn test_empty_viewport_skips_frame() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();

        let outcome = frames
            .run_frame(&mut scene, &mut renderer, Viewport::new(0, 720), 1.0)
            .unwrap();

        assert_eq!(outcome, FrameOutcome::Skipped);
        assert!(renderer.calls.is_empty());
        assert_eq!(frames.viewport(), None);
    }

    #[test]
    fn test_failed_capture_restores_water_visibility() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer {
            fail_capture: true,
            ..Default::default()
        };
        let mut frames = FrameOrchestrator::new();

        let result = frames.run_frame(&mut scene, &mut renderer, Viewport::new(800, 600), 0.0);

        assert_eq!(result, Err("capture failed"));
        assert!(scene.water.visible);
        assert!(!renderer
            .calls
            .iter()
            .any(|c| matches!(c, Call::UploadWater { .. })));
        assert_eq!(frames.frames_rendered(), 0);
    }

    #[test]
    fn test_depth_refresh_is_consumed_by_composite() {
        let mut scene = small_scene();
        let mut renderer = RecordingRenderer::default();
        let mut frames = FrameOrchestrator::new();
        let viewport = Viewport::new(800, 600);

        assert!(!scene.water.state.depth.refreshed);
        for i in 0..2 {
            frames
                .run_frame(&mut scene, &mut renderer, viewport, i as f32)
                .unwrap();
            assert!(!scene.water.state.depth.refreshed);
        }
        assert_eq!(renderer.refreshed_at_composite, vec![true, true]);

        renderer.fail_composite = true;
        let result = frames.run_frame(&mut scene, &mut renderer, viewport, 2.0);
        assert_eq!(result, Err("composite failed"));
        assert!(!scene.water.state.depth.refreshed);
        assert_eq!(frames.frames_rendered(), 2);
    }
}
