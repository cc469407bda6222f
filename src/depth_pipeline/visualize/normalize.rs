/// Range below which a field is treated as constant.
const MIN_RANGE: f32 = 1e-6;

/// Min-max normalization over a whole field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    min: f32,
    range: f32,
}

impl Normalizer {
    /// Floors the range at `1e-6`. Used by the decoder's gray rendering.
    pub fn stretch(values: &[f32]) -> Self {
        let (min, max) = min_max(values);
        Self {
            min,
            range: (max - min).max(MIN_RANGE),
        }
    }

    /// Falls back to a unit range when the field is (near) constant.
    pub fn display(values: &[f32]) -> Self {
        let (min, max) = min_max(values);
        let span = max - min;
        Self {
            min,
            range: if span > MIN_RANGE { span } else { 1.0 },
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    /// Position of `v` in `[0, 1]`. NaN maps to 0.
    pub fn normalize(&self, v: f32) -> f32 {
        let norm = (v - self.min) / self.range;
        if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) }
    }

    pub fn gray(&self, v: f32) -> u8 {
        (self.normalize(v) * 255.0).round() as u8
    }
}

fn min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
