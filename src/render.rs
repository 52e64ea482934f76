use crate::binning::UNCLASSIFIED;
use crate::host::{LabelImage, RgbImage, Rgba};

/// Paints every pixel with the color of its object's bin.
///
/// `object_labels[i]` is the color index of object `i + 1` (see
/// `ClassificationResult::object_labels`). Background pixels and objects
/// with a missing measurement get `colors[0]`.
pub fn paint_labels(segmented: &LabelImage, object_labels: &[u32], colors: &[Rgba]) -> RgbImage {
    let lut: Vec<[u8; 3]> = colors.iter().map(to_rgb8).collect();
    let background = lut.first().copied().unwrap_or([0, 0, 0]);

    let pixels = segmented
        .labels
        .iter()
        .map(|&label| {
            let class = match label {
                0 => UNCLASSIFIED,
                l => object_labels
                    .get(l as usize - 1)
                    .copied()
                    .unwrap_or(UNCLASSIFIED),
            };
            lut.get(class as usize).copied().unwrap_or(background)
        })
        .collect();

    RgbImage {
        width: segmented.width,
        height: segmented.height,
        pixels,
    }
}

fn to_rgb8(color: &Rgba) -> [u8; 3] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color[0]), channel(color[1]), channel(color[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_by_object_class() {
        let segmented = LabelImage::new(3, 2, vec![0, 1, 1, 2, 3, 0]);
        let colors = [
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
        ];
        // object 1 -> bin 2, object 2 -> unclassified, object 3 -> bin 1
        let image = paint_labels(&segmented, &[2, UNCLASSIFIED, 1], &colors);

        assert_eq!(image.width, 3);
        assert_eq!(
            image.pixels,
            vec![
                [0, 0, 0],
                [0, 255, 0],
                [0, 255, 0],
                [0, 0, 0],
                [255, 0, 0],
                [0, 0, 0],
            ]
        );
    }

    #[test]
    fn labels_beyond_measured_objects_are_background() {
        let segmented = LabelImage::new(2, 1, vec![1, 9]);
        let colors = [[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]];
        let image = paint_labels(&segmented, &[1], &colors);
        assert_eq!(image.pixels, vec![[0, 0, 255], [0, 0, 0]]);
    }
}
