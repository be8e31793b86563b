use math::{
    transform,
    Conventions, Handedness, Mat4, Quat, Vec2, Vec3,
};

/// Forward may not get closer to `world_up` than this cosine.
const MAX_PITCH_COS: f32 = 0.99;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Backward
}

pub struct Camera {
    pub conventions: Conventions,

    pub position: Vec3,

    pub right: Vec3,
    pub forward: Vec3,
    pub up: Vec3,

    pub world_up: Vec3,

    pub near: f32,
    pub far: f32,

    pub fov: f32,
    pub aspect_ratio: f32,

    pub move_speed: f32,
    pub rotate_speed: f32,
}

impl Camera {
    pub fn new(conventions: Conventions, position: Vec3, target: Vec3, world_up: Vec3,
            fov: f32, aspect_ratio: f32, near: f32, far: f32,
            move_speed: f32, rotate_speed: f32) -> Camera {
        let mut c = Self {
            conventions,
            position,
            forward: (target - position).normalized(),
            up: Vec3::ZERO,
            right: Vec3::ZERO,
            world_up,
            near,
            far,
            fov,
            aspect_ratio,
            move_speed,
            rotate_speed
        };
        c.update_up_right();
        c
    }

    pub fn view(&self) -> Mat4 {
        transform::look_at(
            self.conventions.handedness,
            self.position,
            self.position + self.forward,
            self.world_up
        )
    }

    pub fn projection(&self) -> Mat4 {
        transform::perspective(
            self.conventions, self.fov, self.aspect_ratio, self.near, self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn move_in_direction(&mut self, dir: Direction, dt: f32) {
        let delta = dt * self.move_speed;
        match dir {
            Direction::Right    => self.position += self.right     * delta,
            Direction::Left     => self.position -= self.right     * delta,
            Direction::Up       => self.position += self.world_up  * delta,
            Direction::Down     => self.position -= self.world_up  * delta,
            Direction::Forward  => self.position += self.forward   * delta,
            Direction::Backward => self.position -= self.forward   * delta,
        }
    }

    fn update_up_right(&mut self) {
        self.right = match self.conventions.handedness {
            Handedness::Left => self.world_up.cross(self.forward),
            Handedness::Right => self.forward.cross(self.world_up),
        }.normalized();
        self.up = match self.conventions.handedness {
            Handedness::Left => self.forward.cross(self.right),
            Handedness::Right => self.right.cross(self.forward),
        };
    }

    /// Turns the camera by a mouse offset in pixels: x yaws about the world
    /// up axis, y pitches about the camera right axis.
    pub fn drag(&mut self, offset: Vec2) {
        let yaw = Quat::angle_axis(-offset.x * self.rotate_speed, self.world_up);
        let pitch = Quat::angle_axis(-offset.y * self.rotate_speed, self.right);

        let forward = (yaw * pitch * self.forward).normalized();
        self.forward = if forward.dot(self.world_up).abs() < MAX_PITCH_COS {
            forward
        } else {
            (yaw * self.forward).normalized()
        };
        self.update_up_right();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::FRAC_PI_2;

    fn camera(conventions: Conventions) -> Camera {
        Camera::new(conventions, Vec3::new(0., 0., 5.), Vec3::ZERO, Vec3::Y,
                    FRAC_PI_2, 1.0, 0.1, 100.0, 2.0, 0.01)
    }

    #[test]
    fn basis_is_orthonormal() {
        for conventions in [Conventions::OPENGL, Conventions::DIRECT3D] {
            let c = camera(conventions);
            assert_abs_diff_eq!(c.forward, Vec3::new(0., 0., -1.), epsilon = 1e-6);
            assert_abs_diff_eq!(c.up, Vec3::Y, epsilon = 1e-6);
            assert_abs_diff_eq!(c.right.dot(c.forward), 0.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(camera(Conventions::OPENGL).right, Vec3::X, epsilon = 1e-6);
        assert_abs_diff_eq!(camera(Conventions::DIRECT3D).right, -Vec3::X, epsilon = 1e-6);
    }

    #[test]
    fn target_projects_to_screen_center() {
        for conventions in [Conventions::OPENGL, Conventions::DIRECT3D] {
            let c = camera(conventions);
            let ndc = c.view_projection().transform_point(Vec3::ZERO);
            assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-6);
            assert!(ndc.z > 0.0 && ndc.z < 1.0);
        }
    }

    #[test]
    fn moves_along_basis() {
        let mut c = camera(Conventions::OPENGL);
        c.move_in_direction(Direction::Forward, 0.5);
        assert_abs_diff_eq!(c.position, Vec3::new(0., 0., 4.), epsilon = 1e-6);
        c.move_in_direction(Direction::Up, 1.0);
        assert_abs_diff_eq!(c.position, Vec3::new(0., 2., 4.), epsilon = 1e-6);
    }

    #[test]
    fn drag_turns_and_clamps_pitch() {
        let mut c = camera(Conventions::OPENGL);
        c.drag(Vec2::new(0., -157.0796));
        assert_abs_diff_eq!(c.forward, Vec3::new(0., 0., -1.), epsilon = 1e-5);

        c.drag(Vec2::new(0., -20.));
        assert!(c.forward.y > 0.19);
        assert!(c.forward.dot(c.world_up).abs() < MAX_PITCH_COS);
        assert_abs_diff_eq!(c.forward.length(), 1.0, epsilon = 1e-5);

        let mut c = camera(Conventions::OPENGL);
        c.drag(Vec2::new(157.0796, 0.));
        assert_abs_diff_eq!(c.forward, Vec3::X, epsilon = 1e-5);
        assert_abs_diff_eq!(c.right, Vec3::Z, epsilon = 1e-5);
    }
}
