use crate::host::{Palette, Rgba};

/// Color of unclassified objects and background: opaque-zero black.
pub const UNCLASSIFIED_COLOR: Rgba = [0.0, 0.0, 0.0, 0.0];

// (x, y) control points of the "jet" colormap, per channel.
const JET_RED: &[(f32, f32)] = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: &[(f32, f32)] = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: &[(f32, f32)] = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// The "jet" colormap sampled at `n` evenly spaced points.
#[derive(Debug, Clone, Copy, Default)]
pub struct JetPalette;

impl JetPalette {
    pub fn sample(x: f32) -> Rgba {
        let x = x.clamp(0.0, 1.0);
        [
            interpolate(JET_RED, x),
            interpolate(JET_GREEN, x),
            interpolate(JET_BLUE, x),
            1.0,
        ]
    }
}

impl Palette for JetPalette {
    fn colors(&self, n: usize) -> Vec<Rgba> {
        let mut colors = Vec::with_capacity(n + 1);
        colors.push(UNCLASSIFIED_COLOR);
        colors.extend((0..n).map(|i| {
            // A single bin collapses the range and maps to the low end.
            let x = if n > 1 {
                i as f32 / (n - 1) as f32
            } else {
                0.0
            };
            Self::sample(x)
        }));
        colors
    }
}

fn interpolate(points: &[(f32, f32)], x: f32) -> f32 {
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
            return y0 + t * (y1 - y0);
        }
    }
    points.last().map_or(0.0, |&(_, y)| y)
}
