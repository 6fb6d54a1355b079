use std::path::Path;

use coaster_core::{CoasterError, Result};
use coaster_geometry::HermitePath;
use coaster_math::{Point2, Transform, Vector3};
use coaster_mesh::{cuboid, track_mesh, TrackStyle, TriangleMesh};
use coaster_render::{plan_frame, Camera, FrameParams, FramePlan, Keyframes, Scene, Skybox};

use crate::config::{AssetConfig, DemoConfig};
use crate::input::InputState;
use crate::ride::Ride;

pub const TRACK_MESH: &str = "track";
pub const CAR_MESH: &str = "car";

const TRACK_COLOR: [f32; 3] = [0.8, 0.1, 0.1];
const CAR_COLOR: [f32; 3] = [0.9, 0.9, 0.2];

/// Frames per second of the keyframes written by [`App::export_html`].
const EXPORT_FPS: f64 = 30.0;
const MAX_EXPORT_KEYFRAMES: usize = 3600;

/// Supplies the demo's meshes and skybox.
pub trait AssetLoader {
    fn track_mesh(&self, path: &HermitePath, assets: &AssetConfig) -> Result<TriangleMesh>;
    fn car_mesh(&self, assets: &AssetConfig) -> Result<TriangleMesh>;
    fn skybox(&self, assets: &AssetConfig) -> Option<Skybox>;
}

/// Generates the track and car instead of reading model files.
#[derive(Debug, Clone)]
pub struct ProceduralAssets {
    pub track: TrackStyle,
    /// Half extents of the car body.
    pub car_size: Vector3,
}

impl ProceduralAssets {
    pub fn new() -> Self {
        Self {
            track: TrackStyle::default(),
            car_size: Vector3::new(0.2, 0.1, 0.3),
        }
    }
}

impl Default for ProceduralAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader for ProceduralAssets {
    fn track_mesh(&self, path: &HermitePath, _assets: &AssetConfig) -> Result<TriangleMesh> {
        track_mesh(path, &self.track)
    }

    fn car_mesh(&self, _assets: &AssetConfig) -> Result<TriangleMesh> {
        // Lift the body so it sits on the rails.
        let body = cuboid(self.car_size);
        let lift = Transform::from_translation(Vector3::new(0.0, self.car_size.y, 0.0));
        Ok(body.transformed(&lift))
    }

    fn skybox(&self, assets: &AssetConfig) -> Option<Skybox> {
        skybox_from_config(assets)
    }
}

/// Meshes already decoded by an external importer, as interleaved vertex data.
#[derive(Debug, Clone, Default)]
pub struct ImportedMeshes {
    pub track_vertices: Vec<f32>,
    pub track_indices: Vec<u32>,
    pub car_vertices: Vec<f32>,
    pub car_indices: Vec<u32>,
}

impl AssetLoader for ImportedMeshes {
    fn track_mesh(&self, _path: &HermitePath, assets: &AssetConfig) -> Result<TriangleMesh> {
        TriangleMesh::from_interleaved(&self.track_vertices, &self.track_indices)
            .map_err(|e| with_asset(e, &assets.track_model))
    }

    fn car_mesh(&self, assets: &AssetConfig) -> Result<TriangleMesh> {
        TriangleMesh::from_interleaved(&self.car_vertices, &self.car_indices)
            .map_err(|e| with_asset(e, &assets.car_model))
    }

    fn skybox(&self, assets: &AssetConfig) -> Option<Skybox> {
        skybox_from_config(assets)
    }
}

fn with_asset(err: CoasterError, asset: &Path) -> CoasterError {
    match err {
        CoasterError::InvalidInput(msg) => {
            CoasterError::InvalidInput(format!("{}: {msg}", asset.display()))
        }
        other => other,
    }
}

/// Missing faces are reported and left for the renderer to show as blank.
fn skybox_from_config(assets: &AssetConfig) -> Option<Skybox> {
    let faces = assets.skybox.as_ref()?;
    let ordered = faces.ordered();
    for path in ordered.iter().filter(|p| !p.exists()) {
        log::warn!("cubemap face {} not found", path.display());
    }
    Some(Skybox {
        faces: ordered.map(|p| p.to_string_lossy().into_owned()),
    })
}

/// The running demo: scene, camera, and the car's ride.
#[derive(Debug)]
pub struct App {
    config: DemoConfig,
    scene: Scene,
    camera: Camera,
    ride: Ride,
    time: f64,
    cursor_request: Option<Point2>,
}

impl App {
    pub fn new(config: DemoConfig, loader: &dyn AssetLoader) -> Result<Self> {
        let path = HermitePath::new(config.ride.control_points.clone(), config.ride.path_options())?;
        let ride = Ride::new(path, config.ride.speed, config.ride.arc_samples_per_segment)?;

        let mut scene = Scene::new();
        scene.add_mesh(
            TRACK_MESH,
            loader.track_mesh(ride.path(), &config.assets)?,
            TRACK_COLOR,
        );
        scene.add_mesh(CAR_MESH, loader.car_mesh(&config.assets)?, CAR_COLOR);
        if let Some(skybox) = loader.skybox(&config.assets) {
            scene.set_skybox(skybox);
        }

        let camera = config.camera();
        let mut app = Self {
            config,
            scene,
            camera,
            ride,
            time: 0.0,
            cursor_request: None,
        };
        app.place_car()?;

        log::info!(
            "demo ready: {} track segments, {:.2} units, {} triangles",
            app.ride.path().segment_count(),
            app.ride.length(),
            app.scene.total_triangles()
        );
        Ok(app)
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ride(&self) -> &Ride {
        &self.ride
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Where the window should hold the hidden cursor during mouse-look, if anywhere.
    pub fn cursor_request(&self) -> Option<Point2> {
        self.cursor_request
    }

    fn place_car(&mut self) -> Result<()> {
        let frame = self.ride.frame(Vector3::Y)?;
        self.scene.set_transform(CAR_MESH, frame.to_transform())?;
        if self.config.camera.follow_car {
            self.camera.follow(&frame, self.config.camera.follow_height);
        }
        Ok(())
    }

    /// Advance the demo by `dt` seconds and plan the frame to draw.
    pub fn step(&mut self, dt: f64, input: &InputState) -> Result<FramePlan> {
        self.ride.advance(dt)?;
        self.time += dt;

        self.cursor_request = self.camera.apply_input(&input.camera_input());
        self.place_car()?;

        let params = FrameParams {
            time: self.time,
            show_skybox: input.show_skybox(),
        };
        Ok(plan_frame(&self.scene, &self.camera, &params))
    }

    /// Car transforms over one lap, or until an open ride stops.
    pub fn car_keyframes(&self) -> Result<Keyframes> {
        let mut ride = self.ride.clone();
        ride.reset();
        let dt = 1.0 / EXPORT_FPS;
        let count = ((ride.lap_time() * EXPORT_FPS).ceil() as usize + 1).clamp(2, MAX_EXPORT_KEYFRAMES);

        let mut times = Vec::with_capacity(count);
        let mut transforms = Vec::with_capacity(count);
        for i in 0..count {
            times.push(i as f64 * dt);
            transforms.push(ride.frame(Vector3::Y)?.to_transform());
            ride.advance(dt)?;
        }
        Ok(Keyframes {
            target: CAR_MESH.to_string(),
            times,
            transforms,
        })
    }

    /// Write a standalone viewer with the car riding the track.
    pub fn export_html(&self, out: &Path) -> Result<()> {
        let mut scene = self.scene.clone();
        scene.set_animation(self.car_keyframes()?)?;
        scene.export_html(out)?;
        Ok(())
    }
}
