use std::f64::consts::PI;

/// Width of the drawing surface in pixels
pub const SURFACE_WIDTH: f64 = 960.0;
/// Height of the drawing surface in pixels
pub const SURFACE_HEIGHT: f64 = 600.0;

/// Kavrayskiy VII projection from geographic to surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    scale: f64,
    translate: (f64, f64),
    precision: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(170.0, (SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0), 0.1)
    }
}

impl Projection {
    /// `precision` is the maximum distance in pixels between a resampled
    /// line and the true projected curve.
    pub fn new(scale: f64, translate: (f64, f64), precision: f64) -> Self {
        Self {
            scale,
            translate,
            precision,
        }
    }

    /// Projects `(longitude, latitude)` in degrees to surface pixels.
    ///
    /// The surface y axis grows downwards.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let lambda = wrap_longitude(longitude).to_radians();
        let phi = latitude.clamp(-90.0, 90.0).to_radians();

        let x = 3.0 * lambda / (2.0 * PI) * (PI * PI / 3.0 - phi * phi).sqrt();
        let y = phi;

        (
            self.translate.0 + self.scale * x,
            self.translate.1 - self.scale * y,
        )
    }

    /// Projects a geographic polyline, inserting intermediate points until
    /// every projected segment is within the precision tolerance of the curve.
    pub fn project_line(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        const MAX_DEPTH: u32 = 16;

        let mut projected = Vec::new();
        let Some(&(lon, lat)) = points.first() else {
            return projected;
        };
        projected.push(self.project(lon, lat));
        for window in points.windows(2) {
            self.resample(window[0], window[1], MAX_DEPTH, &mut projected);
        }
        projected
    }

    fn resample(&self, a: (f64, f64), b: (f64, f64), depth: u32, out: &mut Vec<(f64, f64)>) {
        let pa = self.project(a.0, a.1);
        let pb = self.project(b.0, b.1);
        let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
        let pm = self.project(mid.0, mid.1);

        if depth > 0 && distance_to_segment(pm, pa, pb) > self.precision {
            self.resample(a, mid, depth - 1, out);
            self.resample(mid, b, depth - 1, out);
        } else {
            out.push(pb);
        }
    }

    /// Returns the sphere outline and a 30° graticule as projected polylines.
    pub fn graticule(&self) -> Vec<Vec<(f64, f64)>> {
        const STEP: i32 = 30;
        const SAMPLE: i32 = 10;

        let mut lines = Vec::new();

        for lon in (-180..=180).step_by(STEP as usize) {
            // Nudge the bounding meridians inside so they do not wrap.
            let lon = (lon as f64).clamp(-179.999, 179.999);
            let points: Vec<_> = (-90..=90)
                .step_by(SAMPLE as usize)
                .map(|lat| (lon, lat as f64))
                .collect();
            lines.push(self.project_line(&points));
        }

        for lat in (-90 + STEP..90).step_by(STEP as usize) {
            let points: Vec<_> = (-180..=180)
                .step_by(SAMPLE as usize)
                .map(|lon| ((lon as f64).clamp(-179.999, 179.999), lat as f64))
                .collect();
            lines.push(self.project_line(&points));
        }

        lines
    }
}

/// Wraps a longitude into [-180, 180].
fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_squared = dx * dx + dy * dy;
    if length_squared == 0.0 {
        return ((p.0 - a.0).powi(2) + (p.1 - a.1).powi(2)).sqrt();
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_squared).clamp(0.0, 1.0);
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn origin_maps_to_surface_center() {
        assert_close(Projection::default().project(0.0, 0.0), (480.0, 300.0));
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let projection = Projection::default();
        let (x, y) = projection.project(20.0, 10.0);
        assert!(x > 480.0);
        assert!(y < 300.0);

        let (x, y) = projection.project(-20.0, -10.0);
        assert!(x < 480.0);
        assert!(y > 300.0);
    }

    #[test]
    fn equator_and_pole() {
        let projection = Projection::default();
        // x = 3/2 * pi / sqrt(3) at the antimeridian
        let edge = 1.5 * PI / 3f64.sqrt() * 170.0;
        assert_close(projection.project(180.0, 0.0), (480.0 + edge, 300.0));
        assert_close(projection.project(0.0, 90.0), (480.0, 300.0 - 170.0 * PI / 2.0));
    }

    #[test]
    fn whole_globe_fits_the_surface() {
        let projection = Projection::default();
        for line in projection.graticule() {
            for (x, y) in line {
                assert!((0.0..=SURFACE_WIDTH).contains(&x), "x = {x}");
                assert!((0.0..=SURFACE_HEIGHT).contains(&y), "y = {y}");
            }
        }
    }

    #[test]
    fn longitude_wraps() {
        let projection = Projection::default();
        assert_close(projection.project(200.0, 5.0), projection.project(-160.0, 5.0));
    }

    #[test]
    fn resampling_refines_curved_meridians() {
        let projection = Projection::default();
        let coarse = projection.project_line(&[(150.0, -80.0), (150.0, 80.0)]);
        assert!(coarse.len() > 2);
        assert_close(coarse[0], projection.project(150.0, -80.0));
        assert_close(*coarse.last().unwrap(), projection.project(150.0, 80.0));

        let loose = Projection::new(170.0, (480.0, 300.0), 50.0)
            .project_line(&[(150.0, -80.0), (150.0, 80.0)]);
        assert!(loose.len() < coarse.len());
    }
}
