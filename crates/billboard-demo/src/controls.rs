use billboard_engine::input::Key;

use crate::camera::OrbitCamera;

/// What a key press does to the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    ToggleAutoRotate,
    ToggleGround,
}

impl Action {
    pub fn from_key(key: Key) -> Option<Action> {
        let action = match key {
            Key::W => Action::Forward,
            Key::S => Action::Backward,
            Key::A | Key::ArrowLeft => Action::Left,
            Key::D | Key::ArrowRight => Action::Right,
            Key::ArrowUp => Action::Up,
            Key::ArrowDown => Action::Down,
            Key::Space => Action::ToggleAutoRotate,
            Key::G => Action::ToggleGround,
            _ => return None,
        };
        Some(action)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Action::Forward => "move camera forward",
            Action::Backward => "move camera backward",
            Action::Left => "move camera left",
            Action::Right => "move camera right",
            Action::Up => "move camera up",
            Action::Down => "move camera down",
            Action::ToggleAutoRotate => "toggle automatic rotation",
            Action::ToggleGround => "toggle drawing of ground",
        }
    }

    pub fn apply(self, camera: &mut OrbitCamera, show_ground: &mut bool) {
        match self {
            Action::Forward => camera.move_forward(),
            Action::Backward => camera.move_backward(),
            Action::Left => camera.orbit_left(),
            Action::Right => camera.orbit_right(),
            Action::Up => camera.raise(),
            Action::Down => camera.lower(),
            Action::ToggleAutoRotate => {
                camera.toggle_auto_rotate();
            }
            Action::ToggleGround => *show_ground = !*show_ground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(Action::from_key(Key::W), Some(Action::Forward));
        assert_eq!(Action::from_key(Key::S), Some(Action::Backward));
        assert_eq!(Action::from_key(Key::A), Some(Action::Left));
        assert_eq!(Action::from_key(Key::ArrowLeft), Some(Action::Left));
        assert_eq!(Action::from_key(Key::D), Some(Action::Right));
        assert_eq!(Action::from_key(Key::ArrowRight), Some(Action::Right));
        assert_eq!(Action::from_key(Key::ArrowUp), Some(Action::Up));
        assert_eq!(Action::from_key(Key::ArrowDown), Some(Action::Down));
        assert_eq!(Action::from_key(Key::Space), Some(Action::ToggleAutoRotate));
        assert_eq!(Action::from_key(Key::G), Some(Action::ToggleGround));
        assert_eq!(Action::from_key(Key::Q), None);
        assert_eq!(Action::from_key(Key::Unknown(7)), None);
    }

    #[test]
    fn ground_toggle_twice_is_identity() {
        let mut camera = OrbitCamera::default();
        let mut show_ground = true;

        Action::ToggleGround.apply(&mut camera, &mut show_ground);
        assert!(!show_ground);
        Action::ToggleGround.apply(&mut camera, &mut show_ground);
        assert!(show_ground);
    }

    #[test]
    fn left_and_right_cancel() {
        let mut camera = OrbitCamera::default();
        let mut show_ground = true;

        Action::Left.apply(&mut camera, &mut show_ground);
        assert!((camera.alpha() - (90.0 + camera.interval())).abs() < 1e-5);
        Action::Right.apply(&mut camera, &mut show_ground);
        assert!((camera.alpha() - 90.0).abs() < 1e-5);
    }

    #[test]
    fn space_toggles_auto_rotation() {
        let mut camera = OrbitCamera::default();
        let mut show_ground = true;

        Action::ToggleAutoRotate.apply(&mut camera, &mut show_ground);
        assert!(camera.auto_rotate());
        Action::ToggleAutoRotate.apply(&mut camera, &mut show_ground);
        assert!(!camera.auto_rotate());
        assert!(show_ground);
    }
}
