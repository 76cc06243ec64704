/// Vertices emitted per fullscreen draw (two triangles, no index buffer).
pub const FULLSCREEN_VERTEX_COUNT: u32 = 6;

const BOTTOM_LEFT: [f32; 2] = [-1.0, -1.0];
const TOP_LEFT: [f32; 2] = [-1.0, 1.0];
const TOP_RIGHT: [f32; 2] = [1.0, 1.0];
const BOTTOM_RIGHT: [f32; 2] = [1.0, -1.0];

/// Triangle ordering of the generated fullscreen quad.
///
/// Both orderings cover the clip square exactly; they differ only in which
/// face the rasterizer sees, so the pipeline's `front_face` must match.
/// The discriminant is the `QUAD_WINDING` override in `fullscreen.wgsl`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum QuadWinding {
    /// BL, TL, TR + BL, TR, BR.
    #[default]
    Clockwise,
    /// BL, BR, TR + BL, TR, TL.
    CounterClockwise,
}

impl QuadWinding {
    pub const ALL: [QuadWinding; 2] = [QuadWinding::Clockwise, QuadWinding::CounterClockwise];

    #[inline]
    pub const fn shader_id(self) -> u32 {
        match self {
            QuadWinding::Clockwise => 0,
            QuadWinding::CounterClockwise => 1,
        }
    }

    /// All six clip-space corners in draw order.
    pub const fn corners(self) -> [[f32; 2]; 6] {
        match self {
            QuadWinding::Clockwise => {
                [BOTTOM_LEFT, TOP_LEFT, TOP_RIGHT, BOTTOM_LEFT, TOP_RIGHT, BOTTOM_RIGHT]
            }
            QuadWinding::CounterClockwise => {
                [BOTTOM_LEFT, BOTTOM_RIGHT, TOP_RIGHT, BOTTOM_LEFT, TOP_RIGHT, TOP_LEFT]
            }
        }
    }

    /// Clip-space position for `vertex_index`.
    ///
    /// The draw call fixes the index to `0..6`; anything else is a caller bug.
    #[inline]
    pub fn corner(self, vertex_index: u32) -> [f32; 2] {
        debug_assert!(vertex_index < FULLSCREEN_VERTEX_COUNT);
        self.corners()[vertex_index as usize]
    }

    #[inline]
    pub fn front_face(self) -> wgpu::FrontFace {
        match self {
            QuadWinding::Clockwise => wgpu::FrontFace::Cw,
            QuadWinding::CounterClockwise => wgpu::FrontFace::Ccw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Twice the signed area; positive means counter-clockwise with +Y up.
    fn signed_area2(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    fn triangles(w: QuadWinding) -> [[[f32; 2]; 3]; 2] {
        let c = w.corners();
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]]]
    }

    #[test]
    fn every_index_is_a_clip_corner() {
        for w in QuadWinding::ALL {
            for i in 0..FULLSCREEN_VERTEX_COUNT {
                let [x, y] = w.corner(i);
                assert!(x == -1.0 || x == 1.0);
                assert!(y == -1.0 || y == 1.0);
            }
        }
    }

    #[test]
    fn both_windings_use_all_four_corners() {
        for w in QuadWinding::ALL {
            let mut seen = w.corners().to_vec();
            seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
            seen.dedup();
            assert_eq!(seen, vec![BOTTOM_LEFT, TOP_LEFT, BOTTOM_RIGHT, TOP_RIGHT]);
        }
    }

    #[test]
    fn triangles_cover_square_without_overlap() {
        // Two triangles of area 2 each tile the 2x2 clip square when they share
        // the BL-TR diagonal and sit on opposite sides of it.
        for w in QuadWinding::ALL {
            let [t0, t1] = triangles(w);
            assert_eq!(signed_area2(t0[0], t0[1], t0[2]).abs(), 4.0);
            assert_eq!(signed_area2(t1[0], t1[1], t1[2]).abs(), 4.0);

            let apex0 = t0.iter().find(|p| **p != BOTTOM_LEFT && **p != TOP_RIGHT).unwrap();
            let apex1 = t1.iter().find(|p| **p != BOTTOM_LEFT && **p != TOP_RIGHT).unwrap();
            let side0 = signed_area2(BOTTOM_LEFT, TOP_RIGHT, *apex0);
            let side1 = signed_area2(BOTTOM_LEFT, TOP_RIGHT, *apex1);
            assert!(side0 * side1 < 0.0);
        }
    }

    #[test]
    fn clockwise_variant_winds_clockwise() {
        for t in triangles(QuadWinding::Clockwise) {
            assert!(signed_area2(t[0], t[1], t[2]) < 0.0);
        }
        assert_eq!(QuadWinding::Clockwise.front_face(), wgpu::FrontFace::Cw);
    }

    #[test]
    fn counter_clockwise_variant_winds_counter_clockwise() {
        for t in triangles(QuadWinding::CounterClockwise) {
            assert!(signed_area2(t[0], t[1], t[2]) > 0.0);
        }
        assert_eq!(QuadWinding::CounterClockwise.front_face(), wgpu::FrontFace::Ccw);
    }

    #[test]
    fn orderings_differ() {
        assert_ne!(QuadWinding::Clockwise.corners(), QuadWinding::CounterClockwise.corners());
    }
}
