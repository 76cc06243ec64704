/// How the depth visualization pass derives its texture coordinate.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DepthAddressing {
    /// `clip.xy / clip.w`, used directly as the texture coordinate. Needs no uniform.
    #[default]
    PerspectiveDivide,
    /// Fragment position in pixels divided by the uniform resolution.
    Resolution,
}

impl DepthAddressing {
    #[inline]
    pub fn needs_uniform(self) -> bool {
        matches!(self, DepthAddressing::Resolution)
    }
}

/// Perspective divide of an interpolated clip-space position.
///
/// The result is in NDC (`[-1, 1]`) and is fed to the sampler unchanged.
#[inline]
pub fn perspective_texcoord(clip: [f32; 4]) -> [f32; 2] {
    [clip[0] / clip[3], clip[1] / clip[3]]
}

/// Pixel-space fragment position mapped to `[0, 1]` by the target resolution.
///
/// `resolution` must be nonzero in both components.
#[inline]
pub fn resolution_texcoord(frag_coord: [f32; 2], resolution: [f32; 2]) -> [f32; 2] {
    [frag_coord[0] / resolution[0], frag_coord[1] / resolution[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_divides_by_w() {
        assert_eq!(perspective_texcoord([1.0, -2.0, 0.5, 2.0]), [0.5, -1.0]);
        assert_eq!(perspective_texcoord([0.25, 0.75, 0.0, 1.0]), [0.25, 0.75]);
    }

    #[test]
    fn resolution_maps_pixels_to_unit_range() {
        let res = [800.0, 600.0];
        assert_eq!(resolution_texcoord([0.0, 0.0], res), [0.0, 0.0]);
        assert_eq!(resolution_texcoord([400.0, 150.0], res), [0.5, 0.25]);
        assert_eq!(resolution_texcoord([800.0, 600.0], res), [1.0, 1.0]);
    }

    #[test]
    fn only_resolution_mode_needs_uniform() {
        assert!(!DepthAddressing::PerspectiveDivide.needs_uniform());
        assert!(DepthAddressing::Resolution.needs_uniform());
    }
}
