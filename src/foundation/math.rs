/// Row-major 4x4 affine transform, as exported by the editor (`transforms: [f64; 16]`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4(pub [f64; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// The identity transform; also the default for nodes without `transforms`.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Build from a flat slice; `None` unless it holds exactly 16 values.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let arr: [f64; 16] = values.try_into().ok()?;
        Some(Self(arr))
    }

    /// Pure translation by `(x, y, z)` (last column).
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[3] = x;
        m.0[7] = y;
        m.0[11] = z;
        m
    }

    /// Axis-aligned scale on the diagonal.
    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[0] = x;
        m.0[5] = y;
        m.0[10] = z;
        m
    }

    /// Element at `row`, `col` (both 0-based).
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.0[row * 4 + col]
    }

    /// `self * child`, i.e. `child` expressed in `self`'s space.
    #[inline]
    pub fn then(self, child: Mat4) -> Mat4 {
        compose(self, child)
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Mat4, eps: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

/// `result[i][j] = sum_k parent[i][k] * child[k][j]` over row-major storage.
pub fn compose(parent: Mat4, child: Mat4) -> Mat4 {
    let mut out = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] = (0..4).map(|k| parent.at(i, k) * child.at(k, j)).sum();
        }
    }
    Mat4(out)
}

/// Round to 4 decimal places, half away from zero. Negative zero collapses to zero.
pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0 + 0.0
}

/// `transformation:[a,b,...]` with every element rounded and `f`-suffixed.
///
/// This is the exact text deduplication compares across frames, so it must stay stable for
/// equal (post-rounding) matrices.
pub fn transformation_text(m: &Mat4) -> String {
    let mut out = String::with_capacity(16 * 8 + 17);
    out.push_str("transformation:[");
    for (i, v) in m.0.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!("{}f", round4(*v)));
    }
    out.push(']');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
