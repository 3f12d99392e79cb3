use glam::{DMat3, DQuat, DVec3};

/// The minimal surface the animator needs from a rendered object.
pub trait Transform {
    fn position(&self) -> DVec3;
    fn rotation(&self) -> DQuat;
    fn set_position(&mut self, position: DVec3);
    fn set_rotation(&mut self, rotation: DQuat);

    /// Orient so the local -Z axis points at `target`, +Y up.
    fn look_at(&mut self, target: DVec3) {
        let rotation = look_rotation(self.position(), target, DVec3::Y);
        self.set_rotation(rotation);
    }
}

/// A camera-facing text label.
pub trait Billboard: Transform {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

/// Right-handed look rotation: -Z towards `target`, +Y as close to `up` as
/// possible. When the view direction is parallel to `up` a different up
/// axis is used so the basis stays well defined.
pub fn look_rotation(eye: DVec3, target: DVec3, up: DVec3) -> DQuat {
    let forward = (target - eye).normalize_or_zero();
    if forward == DVec3::ZERO {
        return DQuat::IDENTITY;
    }

    let mut right = forward.cross(up);
    if right.length_squared() < 1e-12 {
        let fallback = if up.z.abs() < 0.9 { DVec3::NEG_Z } else { DVec3::X };
        right = forward.cross(fallback);
    }
    let right = right.normalize();
    let up = right.cross(forward);

    DQuat::from_mat3(&DMat3::from_cols(right, up, -forward)).normalize()
}
