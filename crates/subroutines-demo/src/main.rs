use anyhow::Result;
use glam::{Mat4, Vec3};

use subroutines_engine::camera::Camera;
use subroutines_engine::core::{App, AppControl, FrameCtx};
use subroutines_engine::device::GpuInit;
use subroutines_engine::input::Key;
use subroutines_engine::lighting::{Light, LightingModel, Material};
use subroutines_engine::logging::{LoggingConfig, init_logging};
use subroutines_engine::mesh::{GpuMesh, Mesh};
use subroutines_engine::render::{DrawItem, SubroutineRenderer};
use subroutines_engine::window::{Runtime, RuntimeConfig};

/// Scene parameters for the two-sphere demo.
#[derive(Debug, Clone)]
struct SceneConfig {
    sphere_radius: f32,
    sphere_segments: u32,
    sphere_rings: u32,
    sphere_color: [f32; 4],
    /// Distance of each sphere from the origin along X.
    spacing: f32,
    /// Radians per second around Y.
    rotation_speed: f32,
    /// Radians per second while an arrow key is held.
    orbit_speed: f32,
    clear_color: wgpu::Color,
    camera: Camera,
    light: Light,
    material: Material,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 1.0,
            sphere_segments: 48,
            sphere_rings: 24,
            sphere_color: [0.9, 0.5, 0.3, 1.0],
            spacing: 1.4,
            rotation_speed: 0.6,
            orbit_speed: 1.2,
            clear_color: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 1.0,
            },
            camera: Camera {
                eye: Vec3::new(0.0, 1.0, 6.0),
                ..Camera::default()
            },
            light: Light::default(),
            material: Material::default(),
        }
    }
}

/// Which lighting function each sphere runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Assignment {
    left: LightingModel,
    right: LightingModel,
}

impl Default for Assignment {
    fn default() -> Self {
        Self {
            left: LightingModel::Phong,
            right: LightingModel::DiffuseOnly,
        }
    }
}

impl Assignment {
    fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    fn both(model: LightingModel) -> Self {
        Self {
            left: model,
            right: model,
        }
    }

    fn title(&self) -> String {
        format!("Shader Subroutines | left: {} | right: {}", self.left, self.right)
    }
}

struct SubroutinesApp {
    config: SceneConfig,
    camera: Camera,
    assignment: Assignment,
    title_dirty: bool,

    mesh: Option<GpuMesh>,
    renderer: SubroutineRenderer,
}

impl SubroutinesApp {
    fn new(config: SceneConfig) -> Self {
        Self {
            camera: config.camera,
            config,
            assignment: Assignment::default(),
            title_dirty: true,
            mesh: None,
            renderer: SubroutineRenderer::new(),
        }
    }

    /// Applies this frame's key presses. Returns `Exit` on Escape.
    fn handle_keys(&mut self, pressed: impl Fn(Key) -> bool) -> AppControl {
        if pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let next = if pressed(Key::Space) {
            self.assignment.swapped()
        } else if pressed(Key::Digit1) {
            Assignment::both(LightingModel::Phong)
        } else if pressed(Key::Digit2) {
            Assignment::both(LightingModel::DiffuseOnly)
        } else {
            self.assignment
        };

        if next != self.assignment {
            log::info!("lighting: left={} right={}", next.left, next.right);
            self.assignment = next;
            self.title_dirty = true;
        }

        AppControl::Continue
    }

    fn orbit(&mut self, left_held: bool, right_held: bool, dt: f32) {
        let dir = match (left_held, right_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => return,
        };
        self.camera.orbit(dir * self.config.orbit_speed * dt);
    }

    fn model_matrices(&self, elapsed: f32) -> [Mat4; 2] {
        let spin = Mat4::from_rotation_y(elapsed * self.config.rotation_speed);
        let offset = Vec3::X * self.config.spacing;
        [
            Mat4::from_translation(-offset) * spin,
            Mat4::from_translation(offset) * spin,
        ]
    }
}

impl App for SubroutinesApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_keys(|k| ctx.input_frame.pressed(k)).is_exit() {
            return AppControl::Exit;
        }

        self.orbit(
            ctx.input.key_down(Key::ArrowLeft),
            ctx.input.key_down(Key::ArrowRight),
            ctx.time.dt,
        );

        if self.title_dirty {
            ctx.runtime.set_title(self.assignment.title());
            self.title_dirty = false;
        }

        if self.mesh.is_none() {
            let cfg = &self.config;
            let sphere = Mesh::sphere(
                cfg.sphere_radius,
                cfg.sphere_segments,
                cfg.sphere_rings,
                cfg.sphere_color,
            );
            self.mesh = Some(GpuMesh::upload(ctx.gpu.device(), &sphere, "sphere"));
        }

        let [left_model, right_model] = self.model_matrices(ctx.time.elapsed);
        let Some(mesh) = self.mesh.as_ref() else {
            return AppControl::Continue;
        };

        let items = [
            DrawItem {
                mesh,
                model: left_model,
                material: self.config.material,
                lighting: self.assignment.left,
            },
            DrawItem {
                mesh,
                model: right_model,
                material: self.config.material,
                lighting: self.assignment.right,
            },
        ];

        let renderer = &mut self.renderer;
        let camera = &self.camera;
        let light = &self.config.light;

        ctx.render(self.config.clear_color, |rctx, target| {
            renderer.render(rctx, target, camera, light, &items);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig::default();
    log::info!(
        "starting: sphere r={} {}x{}, spacing={}",
        config.sphere_radius,
        config.sphere_segments,
        config.sphere_rings,
        config.spacing
    );

    let runtime_config = RuntimeConfig {
        title: Assignment::default().title(),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime_config, GpuInit::default(), SubroutinesApp::new(config))
}
