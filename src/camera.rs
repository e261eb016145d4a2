use cgmath::{Deg, Matrix4, One, Point3, Rad, Vector3, Vector4};

/// Radians the displayed cloud turns about the vertical axis each tick
pub const SPIN_PER_TICK: f32 = 0.005;

#[derive(Copy, Clone, Debug)]
pub struct Camera {
    screen_x: u32,            // Horizontal size of screen
    screen_y: u32,            // Vertical size of screen
    fov: Deg<f32>,            // Vertical field of view
    worldup: Vector3<f32>,    // The normalized vector that the camera percieves to be up
    loc: Point3<f32>,         // The camera's location in 3d space
    spin: Rad<f32>,           // Rotation of the model about the vertical axis
    projection: Matrix4<f32>, // Projection Matrix
    model: Matrix4<f32>,      // Model Matrix
    view: Matrix4<f32>,       // View Matrix
}

impl Camera {
    pub fn new(location: Point3<f32>, screen_x: u32, screen_y: u32) -> Camera {
        let mut cam = Camera {
            screen_x: screen_x.max(1),
            screen_y: screen_y.max(1),
            fov: Deg(75.0),
            worldup: Vector3::new(0.0, 1.0, 0.0),
            loc: location,
            spin: Rad(0.0),
            projection: Matrix4::one(),
            model: Matrix4::one(),
            view: Matrix4::one(),
        };
        cam.genmodel();
        cam.genview();
        cam.genprojection();
        cam
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        self.projection * self.view * self.model
    }

    pub fn screen(&self) -> (u32, u32) {
        (self.screen_x, self.screen_y)
    }

    /// Called on resize. Only the projection changes.
    pub fn setscreen(&mut self, screen_x: u32, screen_y: u32) {
        self.screen_x = screen_x.max(1);
        self.screen_y = screen_y.max(1);
        self.genprojection();
    }

    /// Turns the model about the vertical axis
    pub fn spin(&mut self, delta: Rad<f32>) {
        self.spin = Rad((self.spin.0 + delta.0) % std::f32::consts::TAU);
        self.genmodel();
    }

    pub fn spin_angle(&self) -> Rad<f32> {
        self.spin
    }

    /// Projects a model-space point to pixel coordinates plus view depth.
    /// Returns None for points behind the camera or outside the clip volume.
    pub fn project(&self, loc: [f32; 3]) -> Option<(f32, f32, f32)> {
        let clip = self.mvp() * Vector4::new(loc[0], loc[1], loc[2], 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }
        let x = (ndc.x + 1.0) * 0.5 * self.screen_x as f32;
        // screen y grows downwards
        let y = (1.0 - ndc.y) * 0.5 * self.screen_y as f32;
        Some((x, y, clip.w))
    }

    /// Pixel length of a world-space size seen at view depth `depth`
    pub fn pixels_at(&self, size: f32, depth: f32) -> f32 {
        let half_fov: Rad<f32> = (self.fov / 2.0).into();
        let focal = 1.0 / half_fov.0.tan();
        size * focal / depth * (self.screen_y as f32 / 2.0)
    }

    fn genview(&mut self) {
        // Look at the origin, where every stage cloud is centered
        self.view = Matrix4::look_at_rh(self.loc, Point3::new(0.0, 0.0, 0.0), self.worldup);
    }

    fn genmodel(&mut self) {
        self.model = Matrix4::from_angle_y(self.spin)
    }

    fn genprojection(&mut self) {
        let aspect_ratio = self.screen_x as f32 / self.screen_y as f32;
        self.projection = cgmath::perspective(self.fov, aspect_ratio, 0.1, 1000.0);
    }
}
