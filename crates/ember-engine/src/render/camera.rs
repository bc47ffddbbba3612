use crate::coords::Vec2;

/// 2D camera applied around the Entity partition.
///
/// The world point `target` is shown at screen point `offset`; the view is
/// rotated by `rotation` degrees around it and scaled by `zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera2D {
    pub target: Vec2,
    pub offset: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            target: Vec2::zero(),
            offset: Vec2::zero(),
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera2D {
    /// Camera centering `target` in a viewport of `size`.
    pub fn centered_on(target: Vec2, size: Vec2) -> Self {
        Self { target, offset: size * 0.5, ..Self::default() }
    }

    #[inline]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        self.transform().apply(p)
    }

    #[inline]
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        let zoom = if self.zoom == 0.0 { 1.0 } else { self.zoom };
        ((p - self.offset) / zoom).rotated(-self.rotation) + self.target
    }

    /// Precomputed world → screen mapping.
    pub fn transform(&self) -> Affine2 {
        let (s, c) = self.rotation.to_radians().sin_cos();
        let (a, b) = (c * self.zoom, s * self.zoom);
        // p' = R * zoom * (p - target) + offset
        let tx = self.offset.x - (a * self.target.x - b * self.target.y);
        let ty = self.offset.y - (b * self.target.x + a * self.target.y);
        Affine2 { m: [[a, -b, tx], [b, a, ty]] }
    }
}

/// Row-major 2x3 affine transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub m: [[f32; 3]; 2],
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2 { m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] };

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let [r0, r1] = self.m;
        Vec2::new(r0[0] * p.x + r0[1] * p.y + r0[2], r1[0] * p.x + r1[1] * p.y + r1[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn target_maps_to_offset() {
        let cam = Camera2D {
            target: Vec2::new(100.0, 50.0),
            offset: Vec2::new(400.0, 300.0),
            rotation: 30.0,
            zoom: 2.0,
        };
        assert!(close(cam.world_to_screen(cam.target), cam.offset));
    }

    #[test]
    fn zoom_scales_distance_from_target() {
        let cam = Camera2D { zoom: 2.0, ..Camera2D::default() };
        assert!(close(cam.world_to_screen(Vec2::new(3.0, 4.0)), Vec2::new(6.0, 8.0)));
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let cam = Camera2D {
            target: Vec2::new(-20.0, 8.0),
            offset: Vec2::new(320.0, 240.0),
            rotation: -45.0,
            zoom: 0.5,
        };
        let p = Vec2::new(13.0, 77.0);
        assert!(close(cam.screen_to_world(cam.world_to_screen(p)), p));
    }

    #[test]
    fn default_camera_is_identity() {
        assert_eq!(Camera2D::default().transform(), Affine2::IDENTITY);
    }
}
