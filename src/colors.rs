use crate::algebra::{Matrix3, Vec3};

/// Denominator used for every reconstructed image.
pub const OUTPUT_DENOMINATOR: u16 = 255;

/// An integer pixel as read from a PPM: each channel is at most the image's
/// denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    pub fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }
}

/// A pixel with each channel normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl FloatRgb {
    pub fn from_scaled(rgb: Rgb, denominator: u16) -> Self {
        assert!(denominator > 0);
        assert!(rgb.r <= denominator && rgb.g <= denominator && rgb.b <= denominator);

        let denominator = denominator as f32;
        Self {
            r: rgb.r as f32 / denominator,
            g: rgb.g as f32 / denominator,
            b: rgb.b as f32 / denominator,
        }
    }

    /// Scales channels (assumed already clamped to [0, 1]) back to integer
    /// samples under `denominator`.
    pub fn to_scaled(self, denominator: u16) -> Rgb {
        let denominator = denominator as f32;
        Rgb {
            r: (self.r * denominator).round() as u16,
            g: (self.g * denominator).round() as u16,
            b: (self.b * denominator).round() as u16,
        }
    }
}

impl From<FloatRgb> for Vec3 {
    fn from(val: FloatRgb) -> Self {
        Vec3([val.r, val.g, val.b])
    }
}

impl From<Vec3> for FloatRgb {
    fn from(value: Vec3) -> Self {
        FloatRgb {
            r: value.0[0],
            g: value.0[1],
            b: value.0[2],
        }
    }
}

/// A pixel in component-video space: luma `y` in [0, 1], chroma `pb`/`pr`
/// in [-0.5, 0.5].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct YPbPr {
    pub y: f32,
    pub pb: f32,
    pub pr: f32,
}

impl YPbPr {
    pub fn new(y: f32, pb: f32, pr: f32) -> Self {
        Self { y, pb, pr }
    }
}

impl From<YPbPr> for Vec3 {
    fn from(val: YPbPr) -> Self {
        Vec3([val.y, val.pb, val.pr])
    }
}

impl From<Vec3> for YPbPr {
    fn from(value: Vec3) -> Self {
        YPbPr {
            y: value.0[0],
            pb: value.0[1],
            pr: value.0[2],
        }
    }
}

const RGB_TO_YPBPR_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [0.299, -0.168736, 0.5],
    [0.587, -0.331264, -0.418688],
    [0.114, 0.5, -0.081312],
);

const YPBPR_TO_RGB_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [1., 1., 1.],
    [0., -0.344136, 1.772],
    [1.402, -0.714136, 0.],
);

impl From<FloatRgb> for YPbPr {
    fn from(rgb: FloatRgb) -> Self {
        let rgb_vec: Vec3 = rgb.into();

        Self::from(rgb_vec * RGB_TO_YPBPR_CONVERSION_TABLE)
    }
}

impl From<YPbPr> for FloatRgb {
    fn from(ypbpr: YPbPr) -> Self {
        let vec: Vec3 = ypbpr.into();

        // Quantization loss can push reconstructed channels outside [0, 1].
        FloatRgb::from((vec * YPBPR_TO_RGB_CONVERSION_TABLE).clamped(0., 1.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn assert_rgb_close(actual: FloatRgb, expected: FloatRgb) {
        assert!(
            (actual.r - expected.r).abs() < TOLERANCE
                && (actual.g - expected.g).abs() < TOLERANCE
                && (actual.b - expected.b).abs() < TOLERANCE,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn normalization_divides_by_denominator() {
        let float = FloatRgb::from_scaled(Rgb::new(128, 0, 255), 255);
        assert_rgb_close(
            float,
            FloatRgb {
                r: 128. / 255.,
                g: 0.,
                b: 1.,
            },
        );
        assert_eq!(float.to_scaled(255), Rgb::new(128, 0, 255));
    }

    #[test]
    fn gray_has_no_chroma() {
        let gray = YPbPr::from(FloatRgb {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        });
        assert!((gray.y - 0.5).abs() < TOLERANCE);
        assert!(gray.pb.abs() < TOLERANCE);
        assert!(gray.pr.abs() < TOLERANCE);
    }

    #[test]
    fn inverse_transform_is_near_identity() {
        let samples = [
            (0.2, 0.4, 0.6),
            (0.9, 0.1, 0.3),
            (0.05, 0.95, 0.5),
            (0.31, 0.31, 0.32),
            (0.77, 0.42, 0.113),
        ];

        for (r, g, b) in samples {
            let rgb = FloatRgb { r, g, b };
            assert_rgb_close(FloatRgb::from(YPbPr::from(rgb)), rgb);
        }
    }

    #[test]
    fn out_of_range_reconstruction_is_clamped() {
        // maximal positive pr pushes red past 1
        let loud = YPbPr::new(1., 0., 0.5);
        let rgb = FloatRgb::from(loud);
        assert_eq!(rgb.r, 1.);
    }

    #[test]
    #[should_panic]
    fn channel_above_denominator_panics() {
        FloatRgb::from_scaled(Rgb::new(300, 0, 0), 255);
    }
}
