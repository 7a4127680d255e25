use glam::Vec2;

/// Combined view-projection matrix uploaded to the GPU.
///
/// Layout (column-major, matching WGSL `mat4x4<f32>`):
/// ```text
/// col0: [sx,  0,   0,  0]
/// col1: [0,   sy,  0,  0]
/// col2: [0,   0,   1,  0]
/// col3: [tx,  ty,  0,  1]
/// ```
/// where `sx = 2/w`, `sy = 2/h`, `tx = -sx*px - 1`, `ty = -sy*py - 1`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Column-major 4×4 view-projection matrix sent to the vertex shader.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Orthographic projection with the viewport's bottom-left corner at `origin`.
    pub fn ortho(origin: Vec2, width: f32, height: f32) -> Self {
        let sx = 2.0 / width.max(1.0);
        let sy = 2.0 / height.max(1.0);
        Self {
            view_proj: [
                [sx,  0.0, 0.0, 0.0], // col0
                [0.0, sy,  0.0, 0.0], // col1
                [0.0, 0.0, 1.0, 0.0], // col2
                [-sx * origin.x - 1.0, -sy * origin.y - 1.0, 0.0, 1.0], // col3
            ],
        }
    }

    /// Plain projection with no camera transform: pixel `(0, 0)` is the
    /// bottom-left corner of the window.
    pub fn screen_ortho(width: f32, height: f32) -> Self {
        Self::ortho(Vec2::ZERO, width, height)
    }

    /// Apply the matrix to a 2D point, returning normalised device coordinates.
    pub fn transform(&self, p: Vec2) -> Vec2 {
        let m = &self.view_proj;
        Vec2::new(m[0][0] * p.x + m[3][0], m[1][1] * p.y + m[3][1])
    }
}

/// 2D camera that pans smoothly toward a goal.
///
/// `position` is the world coordinate of the viewport's bottom-left corner.
/// Each [`Camera::update`] moves it a fixed fraction of the remaining
/// distance toward `goal`, so large jumps ease out instead of cutting.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec2,
    pub goal: Vec2,
    /// Fraction of the remaining distance covered per update, in `[0, 1]`.
    pub move_speed: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            goal: Vec2::ZERO,
            move_speed: 1.0,
            viewport_width,
            viewport_height,
        }
    }

    /// Set a new pan goal.  `speed` 1.0 snaps on the next update, 0.0 freezes.
    pub fn move_to(&mut self, goal: Vec2, speed: f32) {
        self.goal = goal;
        self.move_speed = speed.clamp(0.0, 1.0);
    }

    /// Advance one interpolation step toward the goal.
    pub fn update(&mut self) {
        self.position += (self.goal - self.position) * self.move_speed;
    }

    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
    }

    /// Build the GPU-ready `CameraUniform` for the current position.
    pub fn build_view_proj(&self) -> CameraUniform {
        CameraUniform::ortho(self.position, self.viewport_width, self.viewport_height)
    }
}

/// Camera origin that keeps `player_center` a third of the way into the
/// viewport from its bottom-left corner, never scrolling past the map's
/// left or bottom edge.
pub fn user_centered_target(player_center: Vec2, viewport_width: f32, viewport_height: f32) -> Vec2 {
    Vec2::new(
        (player_center.x - viewport_width / 3.0).max(0.0),
        (player_center.y - viewport_height / 3.0).max(0.0),
    )
}
