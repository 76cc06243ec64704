/// CPU stand-in for a bound texture + sampler pair.
pub trait Texel2d {
    /// Returns RGBA at `uv`. Depth textures report their value in `r`.
    fn sample(&self, uv: [f32; 2]) -> [f32; 4];
}

/// Texture whose every texel holds the same value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidTexture(pub [f32; 4]);

impl SolidTexture {
    /// Single-channel depth texture filled with `depth`.
    #[inline]
    pub fn depth(depth: f32) -> Self {
        Self([depth, 0.0, 0.0, 1.0])
    }
}

impl Texel2d for SolidTexture {
    #[inline]
    fn sample(&self, _uv: [f32; 2]) -> [f32; 4] {
        self.0
    }
}

/// Row-major RGBA texture sampled with nearest filtering and clamp-to-edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    texels: Vec<[f32; 4]>,
}

impl CpuTexture {
    /// Returns `None` when `texels` does not hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, texels: Vec<[f32; 4]>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, texels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel_index(&self, uv: [f32; 2]) -> usize {
        let clamp = |t: f32, n: u32| -> usize {
            let i = (t.clamp(0.0, 1.0) * n as f32).floor() as u32;
            i.min(n - 1) as usize
        };
        let x = clamp(uv[0], self.width);
        let y = clamp(uv[1], self.height);
        y * self.width as usize + x
    }
}

impl Texel2d for CpuTexture {
    fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        self.texels[self.texel_index(uv)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> CpuTexture {
        CpuTexture::new(
            2,
            2,
            vec![
                [0.0, 0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_mismatched_texel_count() {
        assert!(CpuTexture::new(2, 2, vec![[0.0; 4]; 3]).is_none());
        assert!(CpuTexture::new(0, 1, vec![]).is_none());
    }

    #[test]
    fn nearest_picks_quadrant() {
        let t = quad();
        assert_eq!(t.sample([0.25, 0.25]), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.sample([0.75, 0.25]), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.sample([0.25, 0.75]), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(t.sample([0.75, 0.75]), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn clamps_outside_unit_square() {
        let t = quad();
        assert_eq!(t.sample([-3.0, -0.5]), t.sample([0.0, 0.0]));
        assert_eq!(t.sample([1.0, 1.0]), t.sample([0.99, 0.99]));
        assert_eq!(t.sample([7.0, 2.0]), t.sample([0.99, 0.99]));
    }

    #[test]
    fn solid_ignores_uv() {
        let t = SolidTexture::depth(0.7);
        assert_eq!(t.sample([0.0, 0.0]), t.sample([-1.0, 5.0]));
        assert_eq!(t.sample([0.3, 0.3])[0], 0.7);
    }
}
