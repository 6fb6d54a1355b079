//! First-person fly camera.

use coaster_geometry::Frame;
use coaster_math::{Aabb3, DMat3, DMat4, DQuat, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Mouse-look may not bring the view closer than this to straight up or down.
const MIN_ANGLE_TO_UP_DEG: f64 = 5.0;

/// One frame of camera controls, as polled from the window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Move at the fast speed while held.
    pub fast: bool,
    /// Cursor position in window pixels while the look button is held.
    pub look: Option<Point2>,
}

/// A perspective camera moved by keyboard and aimed by mouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3,
    /// Unit view direction.
    pub orientation: Vector3,
    pub up: Vector3,
    pub width: u32,
    pub height: u32,
    /// Distance moved per frame.
    pub speed: f64,
    pub normal_speed: f64,
    pub fast_speed: f64,
    /// Degrees turned when the cursor travels a full window width/height.
    pub sensitivity: f64,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    #[serde(skip, default = "first_click_default")]
    first_click: bool,
}

fn first_click_default() -> bool {
    true
}

impl Camera {
    /// Camera at `position` looking down -Z, with a 45 degree field of view.
    pub fn new(width: u32, height: u32, position: Point3) -> Self {
        Self {
            position,
            orientation: -Vector3::Z,
            up: Vector3::Y,
            width,
            height,
            speed: 0.1,
            normal_speed: 0.1,
            fast_speed: 0.4,
            sensitivity: 100.0,
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
            first_click: true,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.position + self.orientation, self.up)
    }

    /// OpenGL-style projection (clip z in [-1, 1]).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect(), self.near, self.far)
    }

    /// Combined `projection * view`.
    pub fn matrix(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View matrix with the translation removed, so the skybox stays centred on the eye.
    pub fn skybox_view(&self) -> DMat4 {
        DMat4::from_mat3(DMat3::from_mat4(self.view_matrix()))
    }

    fn right_vector(&self) -> Vector3 {
        self.orientation.cross(self.up).normalize_or_zero()
    }

    /// Apply one frame of input.
    ///
    /// Returns the window-centre position the cursor should be hidden and warped
    /// to while looking around, or `None` when the cursor should be released.
    pub fn apply_input(&mut self, input: &CameraInput) -> Option<Point2> {
        let right = self.right_vector();
        let mut step = Vector3::ZERO;
        if input.forward {
            step += self.orientation;
        }
        if input.back {
            step -= self.orientation;
        }
        if input.left {
            step -= right;
        }
        if input.right {
            step += right;
        }
        if input.up {
            step += self.up;
        }
        if input.down {
            step -= self.up;
        }

        self.speed = if input.fast {
            self.fast_speed
        } else {
            self.normal_speed
        };
        self.position += step * self.speed;

        let Some(cursor) = input.look else {
            self.first_click = true;
            return None;
        };

        let center = Point2::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        if self.first_click {
            // The cursor jumps to the centre first so the view does not snap.
            self.first_click = false;
            return Some(center);
        }

        let rot_x = self.sensitivity * (cursor.y - center.y) / self.height.max(1) as f64;
        let rot_y = self.sensitivity * (cursor.x - center.x) / self.width.max(1) as f64;
        self.look(rot_x, rot_y);
        Some(center)
    }

    /// Pitch by `pitch_deg` (positive looks down) and yaw by `yaw_deg` (positive turns right).
    ///
    /// A pitch that would tilt the view within 5 degrees of `up` is ignored.
    pub fn look(&mut self, pitch_deg: f64, yaw_deg: f64) {
        let right = self.right_vector();
        if right != Vector3::ZERO {
            let pitched = DQuat::from_axis_angle(right, (-pitch_deg).to_radians()) * self.orientation;
            let off_horizon = (pitched.angle_between(self.up) - 90f64.to_radians()).abs();
            if off_horizon <= (90.0 - MIN_ANGLE_TO_UP_DEG).to_radians() {
                self.orientation = pitched;
            }
        }
        self.orientation = (DQuat::from_axis_angle(self.up.normalize(), (-yaw_deg).to_radians())
            * self.orientation)
            .normalize();
    }

    /// Sit on a path frame, `height` above the track, looking along it.
    ///
    /// The camera takes the frame's up vector as well, so the view stays
    /// well defined where the track runs parallel to world up.
    pub fn follow(&mut self, frame: &Frame, height: f64) {
        self.position = frame.position + frame.up * height;
        self.orientation = frame.forward;
        self.up = frame.up;
    }

    /// Step back along the view direction until the whole box is in view.
    pub fn fit_to_aabb(&mut self, aabb: &Aabb3) {
        let center = aabb.center();
        let size = aabb.extents();
        let max_dim = size.x.max(size.y).max(size.z);

        let distance = max_dim / (2.0 * (self.fov_deg.to_radians() / 2.0).tan());
        self.position = center - self.orientation * distance * 1.5;
    }
}

impl Default for Camera {
    /// The demo window: 800x800, eye at (0, 0, 5).
    fn default() -> Self {
        Self::new(800, 800, Point3::new(0.0, 0.0, 5.0))
    }
}
