//! Demo configuration, read from a JSON file.
//!
//! Every section has defaults, so `{}` is a complete configuration that
//! reproduces the stock demo.

use std::path::{Path, PathBuf};

use coaster_core::{CoasterError, Result, Validate};
use coaster_geometry::{EndpointTangent, PathMode, PathOptions};
use coaster_math::Point3;
use coaster_render::{Camera, CubemapFace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub ride: RideConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Rollercoaster".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Point3,
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub speed: f64,
    pub fast_speed: f64,
    pub sensitivity: f64,
    /// Ride along with the car instead of flying freely.
    pub follow_car: bool,
    /// Eye height above the track while following the car.
    pub follow_height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
            speed: 0.1,
            fast_speed: 0.4,
            sensitivity: 100.0,
            follow_car: false,
            follow_height: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideConfig {
    pub control_points: Vec<Point3>,
    pub mode: PathMode,
    pub endpoint_tangent: EndpointTangent,
    /// Car speed along the track, in units per second.
    pub speed: f64,
    /// Arc-length table resolution.
    pub arc_samples_per_segment: usize,
}

impl Default for RideConfig {
    fn default() -> Self {
        Self {
            control_points: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.5, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(3.0, 0.5, 0.0),
                Point3::new(4.0, 0.0, 0.0),
            ],
            mode: PathMode::Open,
            endpoint_tangent: EndpointTangent::OneSided,
            speed: 1.0,
            arc_samples_per_segment: 64,
        }
    }
}

impl RideConfig {
    pub fn path_options(&self) -> PathOptions {
        PathOptions {
            mode: self.mode,
            endpoint_tangent: self.endpoint_tangent,
            ..PathOptions::default()
        }
    }
}

/// Cubemap images, one per face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubemapFaces {
    pub right: PathBuf,
    pub left: PathBuf,
    pub top: PathBuf,
    pub bottom: PathBuf,
    pub front: PathBuf,
    pub back: PathBuf,
}

impl CubemapFaces {
    pub fn get(&self, face: CubemapFace) -> &Path {
        match face {
            CubemapFace::Right => &self.right,
            CubemapFace::Left => &self.left,
            CubemapFace::Top => &self.top,
            CubemapFace::Bottom => &self.bottom,
            CubemapFace::Front => &self.front,
            CubemapFace::Back => &self.back,
        }
    }

    /// Face paths in texture upload order.
    pub fn ordered(&self) -> [&Path; 6] {
        CubemapFace::ALL.map(|face| self.get(face))
    }

    fn map(&self, f: impl Fn(&Path) -> PathBuf) -> Self {
        Self {
            right: f(&self.right),
            left: f(&self.left),
            top: f(&self.top),
            bottom: f(&self.bottom),
            front: f(&self.front),
            back: f(&self.back),
        }
    }
}

impl Default for CubemapFaces {
    fn default() -> Self {
        Self {
            right: "right.jpg".into(),
            left: "left.jpg".into(),
            top: "top.jpg".into(),
            bottom: "bottom.jpg".into(),
            front: "front.jpg".into(),
            back: "back.jpg".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub model_vertex: PathBuf,
    pub model_fragment: PathBuf,
    pub skybox_vertex: PathBuf,
    pub skybox_fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            model_vertex: "roller.vert".into(),
            model_fragment: "roller.frag".into(),
            skybox_vertex: "skybox.vert".into(),
            skybox_fragment: "skybox.frag".into(),
        }
    }
}

/// Files the demo reads at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub track_model: PathBuf,
    pub car_model: PathBuf,
    pub track_texture: PathBuf,
    /// `null` runs without a skybox.
    pub skybox: Option<CubemapFaces>,
    pub shaders: ShaderPaths,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            track_model: "rollerOBJ.obj".into(),
            car_model: "rollerCar.obj".into(),
            track_texture: "RED.png".into(),
            skybox: Some(CubemapFaces::default()),
            shaders: ShaderPaths::default(),
        }
    }
}

impl AssetConfig {
    /// Join every relative path onto `base`.
    pub fn resolve(&self, base: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        Self {
            track_model: join(&self.track_model),
            car_model: join(&self.car_model),
            track_texture: join(&self.track_texture),
            skybox: self.skybox.as_ref().map(|faces| faces.map(join)),
            shaders: ShaderPaths {
                model_vertex: join(&self.shaders.model_vertex),
                model_fragment: join(&self.shaders.model_fragment),
                skybox_vertex: join(&self.shaders.skybox_vertex),
                skybox_fragment: join(&self.shaders.skybox_fragment),
            },
        }
    }
}

impl DemoConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: DemoConfig =
            serde_json::from_str(text).map_err(|e| CoasterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; asset paths become relative to its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&text).map_err(|e| match e {
            CoasterError::Config(msg) => CoasterError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.assets = config.assets.resolve(base);
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Camera at its configured start pose.
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(self.window.width, self.window.height, self.camera.position);
        camera.fov_deg = self.camera.fov_deg;
        camera.near = self.camera.near;
        camera.far = self.camera.far;
        camera.speed = self.camera.speed;
        camera.normal_speed = self.camera.speed;
        camera.fast_speed = self.camera.fast_speed;
        camera.sensitivity = self.camera.sensitivity;
        camera
    }
}

/// Upper bound on `ride.arc_samples_per_segment`.
pub const MAX_ARC_SAMPLES_PER_SEGMENT: usize = 4096;

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoasterError::Config(format!("{name} must be positive, got {value}")))
    }
}

impl Validate for DemoConfig {
    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(CoasterError::Config(format!(
                "window size {}x{} is empty",
                self.window.width, self.window.height
            )));
        }

        let cam = &self.camera;
        if !cam.position.is_finite() {
            return Err(CoasterError::Config("camera position is not finite".into()));
        }
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(CoasterError::Config(format!(
                "field of view must be between 0 and 180 degrees, got {}",
                cam.fov_deg
            )));
        }
        positive("camera.near", cam.near)?;
        if !(cam.far > cam.near) {
            return Err(CoasterError::Config(format!(
                "far plane {} is not beyond near plane {}",
                cam.far, cam.near
            )));
        }
        positive("camera.speed", cam.speed)?;
        positive("camera.fast_speed", cam.fast_speed)?;
        positive("camera.sensitivity", cam.sensitivity)?;
        if !cam.follow_height.is_finite() {
            return Err(CoasterError::Config("camera.follow_height is not finite".into()));
        }

        let ride = &self.ride;
        if ride.control_points.len() < 2 {
            return Err(CoasterError::Config(format!(
                "ride needs at least 2 control points, got {}",
                ride.control_points.len()
            )));
        }
        if ride.control_points.iter().any(|p| !p.is_finite()) {
            return Err(CoasterError::Config("ride control points must be finite".into()));
        }
        positive("ride.speed", ride.speed)?;
        if !(1..=MAX_ARC_SAMPLES_PER_SEGMENT).contains(&ride.arc_samples_per_segment) {
            return Err(CoasterError::Config(format!(
                "ride.arc_samples_per_segment must be between 1 and {MAX_ARC_SAMPLES_PER_SEGMENT}, got {}",
                ride.arc_samples_per_segment
            )));
        }
        Ok(())
    }
}
