/// Below this encoded value the sRGB decode curve is linear.
pub const SRGB_DECODE_THRESHOLD: f32 = 0.04045;

/// Below this linear value the sRGB encode curve is linear.
pub const SRGB_ENCODE_THRESHOLD: f32 = 0.003_130_8;

/// sRGB-encoded channel -> linear channel (piecewise IEC 61966-2-1 curve).
#[inline]
pub fn linearize(c: f32) -> f32 {
    if c < SRGB_DECODE_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear channel -> sRGB-encoded channel (inverse of [`linearize`]).
#[inline]
pub fn delinearize(c: f32) -> f32 {
    if c < SRGB_ENCODE_THRESHOLD {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Power segment of the decode curve applied over the whole range.
///
/// Values below [`SRGB_DECODE_THRESHOLD`] come out darker than [`linearize`];
/// mesh passes rely on exactly this output.
#[inline]
pub fn approx_linearize(c: f32) -> f32 {
    ((c + 0.055) / 1.055).powf(2.4)
}

/// [`approx_linearize`] of `c / 255`.
///
/// Mesh colors are already normalized, so the extra division pushes every
/// input to near zero. This almost certainly started life as a 0-255 code
/// path; it is reproduced as-is so captured output stays comparable.
#[inline]
pub fn approx_linearize_255(c: f32) -> f32 {
    approx_linearize(c / 255.0)
}

/// Fragment-stage color transform, selected per pipeline.
///
/// The discriminant doubles as the value of the `COLOR_TRANSFORM` pipeline
/// override in `color_space.wgsl`; keep both in sync.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColorTransform {
    #[default]
    Identity,
    Linearize,
    Delinearize,
    ApproxLinearize,
    ApproxLinearize255,
}

impl ColorTransform {
    pub const ALL: [ColorTransform; 5] = [
        ColorTransform::Identity,
        ColorTransform::Linearize,
        ColorTransform::Delinearize,
        ColorTransform::ApproxLinearize,
        ColorTransform::ApproxLinearize255,
    ];

    /// Value written to the `COLOR_TRANSFORM` override constant.
    #[inline]
    pub const fn shader_id(self) -> u32 {
        match self {
            ColorTransform::Identity => 0,
            ColorTransform::Linearize => 1,
            ColorTransform::Delinearize => 2,
            ColorTransform::ApproxLinearize => 3,
            ColorTransform::ApproxLinearize255 => 4,
        }
    }

    #[inline]
    pub fn apply(self, c: f32) -> f32 {
        match self {
            ColorTransform::Identity => c,
            ColorTransform::Linearize => linearize(c),
            ColorTransform::Delinearize => delinearize(c),
            ColorTransform::ApproxLinearize => approx_linearize(c),
            ColorTransform::ApproxLinearize255 => approx_linearize_255(c),
        }
    }

    /// Applies the transform to each channel independently.
    #[inline]
    pub fn apply_rgb(self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|c| self.apply(c))
    }

    /// Applies the transform to RGB; alpha is passed through.
    #[inline]
    pub fn apply_rgba(self, rgba: [f32; 4]) -> [f32; 4] {
        let [r, g, b] = self.apply_rgb([rgba[0], rgba[1], rgba[2]]);
        [r, g, b, rgba[3]]
    }

    /// Conditional selection used by the present and textured-quad passes.
    ///
    /// `srgb_surface == 0.0` means the target does not encode on write, so the
    /// transform runs; any other value passes the sample through.
    #[inline]
    pub fn when_linear(self, srgb_surface: f32) -> ColorTransform {
        if srgb_surface == 0.0 { self } else { ColorTransform::Identity }
    }
}

/// Typed form of the `srgb_surface` uniform flag.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SurfaceEncoding {
    /// Target stores values as written (flag `0.0`).
    Linear,
    /// Target performs the sRGB encode itself (flag `1.0`).
    Srgb,
}

impl SurfaceEncoding {
    #[inline]
    pub fn from_format(format: wgpu::TextureFormat) -> Self {
        if format.is_srgb() { SurfaceEncoding::Srgb } else { SurfaceEncoding::Linear }
    }

    /// Decodes the flag: exactly `0.0` is linear, anything else is sRGB.
    #[inline]
    pub fn from_flag(flag: f32) -> Self {
        if flag == 0.0 { SurfaceEncoding::Linear } else { SurfaceEncoding::Srgb }
    }

    #[inline]
    pub fn to_flag(self) -> f32 {
        match self {
            SurfaceEncoding::Linear => 0.0,
            SurfaceEncoding::Srgb => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    // ── standard pair ─────────────────────────────────────────────────────

    #[test]
    fn linearize_half_gray() {
        assert!(close(linearize(0.5), 0.214_041, 1e-4));
    }

    #[test]
    fn linearize_endpoints() {
        assert_eq!(linearize(0.0), 0.0);
        assert!(close(linearize(1.0), 1.0, EPS));
        assert_eq!(delinearize(0.0), 0.0);
        assert!(close(delinearize(1.0), 1.0, EPS));
    }

    #[test]
    fn round_trip_over_unit_range() {
        for i in 0..=1000 {
            let c = i as f32 / 1000.0;
            let back = delinearize(linearize(c));
            assert!(close(back, c, EPS), "c = {c}, back = {back}");
        }
    }

    #[test]
    fn round_trip_rgb() {
        let rgb = [0.02, 0.5, 0.93];
        let back = ColorTransform::Delinearize.apply_rgb(ColorTransform::Linearize.apply_rgb(rgb));
        for (a, b) in back.iter().zip(rgb) {
            assert!(close(*a, b, EPS));
        }
    }

    #[test]
    fn linearize_continuous_at_threshold() {
        let t = SRGB_DECODE_THRESHOLD;
        let low = t / 12.92;
        let high = ((t + 0.055) / 1.055).powf(2.4);
        assert!(close(low, high, 1e-4));
        assert!(close(linearize(t - 1e-6), linearize(t), 1e-4));
    }

    #[test]
    fn delinearize_continuous_at_threshold() {
        let t = SRGB_ENCODE_THRESHOLD;
        let low = t * 12.92;
        let high = 1.055 * t.powf(1.0 / 2.4) - 0.055;
        assert!(close(low, high, 1e-4));
        assert!(close(delinearize(t - 1e-7), delinearize(t), 1e-4));
    }

    // ── approximate variants ──────────────────────────────────────────────

    #[test]
    fn approx_skips_linear_segment() {
        // Below the threshold the approximation diverges from the true curve.
        let c = 0.01;
        assert!(close(linearize(c), c / 12.92, EPS));
        assert!(close(approx_linearize(c), ((c + 0.055) / 1.055).powf(2.4), EPS));
        assert!(!close(approx_linearize(c), linearize(c), 1e-4));
        assert!(approx_linearize(0.0) > 0.0);
    }

    #[test]
    fn approx_matches_standard_above_threshold() {
        for c in [0.05, 0.2, 0.5, 0.8, 1.0] {
            assert!(close(approx_linearize(c), linearize(c), EPS));
        }
    }

    #[test]
    fn approx_255_divides_first() {
        let c = 0.6;
        assert!(close(approx_linearize_255(c), approx_linearize(c / 255.0), EPS));
        // Normalized input collapses to almost black.
        assert!(approx_linearize_255(1.0) < 0.01);
    }

    // ── ColorTransform ────────────────────────────────────────────────────

    #[test]
    fn alpha_is_untouched() {
        for t in ColorTransform::ALL {
            assert_eq!(t.apply_rgba([0.3, 0.3, 0.3, 0.25])[3], 0.25);
        }
    }

    #[test]
    fn shader_ids_are_distinct_and_ordered() {
        for (i, t) in ColorTransform::ALL.iter().enumerate() {
            assert_eq!(t.shader_id(), i as u32);
        }
    }

    #[test]
    fn when_linear_selects_on_exact_zero() {
        let t = ColorTransform::Linearize;
        assert_eq!(t.when_linear(0.0), ColorTransform::Linearize);
        assert_eq!(t.when_linear(1.0), ColorTransform::Identity);
        assert_eq!(t.when_linear(0.5), ColorTransform::Identity);
        assert_eq!(t.when_linear(-1.0), ColorTransform::Identity);
    }

    // ── SurfaceEncoding ───────────────────────────────────────────────────

    #[test]
    fn surface_encoding_flag_encoding() {
        assert_eq!(SurfaceEncoding::Linear.to_flag(), 0.0);
        assert_eq!(SurfaceEncoding::Srgb.to_flag(), 1.0);
        assert_eq!(SurfaceEncoding::from_flag(0.0), SurfaceEncoding::Linear);
        assert_eq!(SurfaceEncoding::from_flag(2.0), SurfaceEncoding::Srgb);
    }

    #[test]
    fn surface_encoding_from_format() {
        assert_eq!(
            SurfaceEncoding::from_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            SurfaceEncoding::Srgb
        );
        assert_eq!(
            SurfaceEncoding::from_format(wgpu::TextureFormat::Bgra8Unorm),
            SurfaceEncoding::Linear
        );
        assert_eq!(
            SurfaceEncoding::from_format(wgpu::TextureFormat::Rgba16Float),
            SurfaceEncoding::Linear
        );
    }
}
