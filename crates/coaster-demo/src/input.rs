use std::collections::HashSet;

use coaster_math::Point2;
use coaster_render::CameraInput;

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    LeftControl,
    LeftShift,
    N,
}

/// Flips the skybox once per press of its key, however long the key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyboxToggle {
    show: bool,
    held: bool,
}

impl SkyboxToggle {
    pub fn new(show: bool) -> Self {
        Self { show, held: false }
    }

    /// Feed the current key state. Returns true when this call flipped the flag.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.held;
        if pressed {
            self.show = !self.show;
        }
        self.held = down;
        pressed
    }

    pub fn show_skybox(&self) -> bool {
        self.show
    }
}

impl Default for SkyboxToggle {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Keyboard and mouse state as reported by the window.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    cursor: Point2,
    look_held: bool,
    skybox: SkyboxToggle,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key as down or up. May be called every frame with the polled state.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
        if key == Key::N {
            self.skybox.update(down);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn set_cursor(&mut self, position: Point2) {
        self.cursor = position;
    }

    /// Mouse-look is active while the left button is held.
    pub fn set_look_button(&mut self, down: bool) {
        self.look_held = down;
    }

    pub fn show_skybox(&self) -> bool {
        self.skybox.show_skybox()
    }

    /// Snapshot for the camera.
    pub fn camera_input(&self) -> CameraInput {
        CameraInput {
            forward: self.is_pressed(Key::W),
            back: self.is_pressed(Key::S),
            left: self.is_pressed(Key::A),
            right: self.is_pressed(Key::D),
            up: self.is_pressed(Key::Space),
            down: self.is_pressed(Key::LeftControl),
            fast: self.is_pressed(Key::LeftShift),
            look: self.look_held.then_some(self.cursor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_edge_triggered() {
        let mut toggle = SkyboxToggle::default();
        assert!(toggle.show_skybox());

        assert!(toggle.update(true));
        assert!(!toggle.show_skybox());
        // Holding the key does nothing more.
        for _ in 0..10 {
            assert!(!toggle.update(true));
        }
        assert!(!toggle.show_skybox());

        assert!(!toggle.update(false));
        assert!(toggle.update(true));
        assert!(toggle.show_skybox());
    }

    #[test]
    fn test_n_key_drives_toggle() {
        let mut input = InputState::new();
        assert!(input.show_skybox());
        input.set_key(Key::N, true);
        input.set_key(Key::N, true);
        assert!(!input.show_skybox());
        input.set_key(Key::N, false);
        input.set_key(Key::N, true);
        assert!(input.show_skybox());
    }

    #[test]
    fn test_camera_input_mapping() {
        let mut input = InputState::new();
        input.set_key(Key::W, true);
        input.set_key(Key::LeftShift, true);
        input.set_key(Key::LeftControl, true);
        let cam = input.camera_input();
        assert!(cam.forward && cam.fast && cam.down);
        assert!(!cam.back && !cam.left && !cam.right && !cam.up);
        assert_eq!(cam.look, None);

        input.set_key(Key::W, false);
        input.set_cursor(Point2::new(10.0, 20.0));
        input.set_look_button(true);
        let cam = input.camera_input();
        assert!(!cam.forward);
        assert_eq!(cam.look, Some(Point2::new(10.0, 20.0)));
    }
}
