use image::{DynamicImage, GenericImageView};

use super::skin::is_skin;

/// Aggregate pixel statistics for one frame.
///
/// Only `skin_pixels` and `total_pixels` feed the gesture decision; the
/// center of mass and brightness are kept for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStatistics {
    pub skin_pixels: u64,
    pub total_pixels: u64,
    pub center_of_mass: Option<(f64, f64)>,
    pub average_brightness: f64,
}

impl FrameStatistics {
    pub fn collect(image: &DynamicImage) -> Self {
        let mut skin_pixels = 0u64;
        let mut total_pixels = 0u64;
        let mut sum_x = 0f64;
        let mut sum_y = 0f64;
        let mut total_brightness = 0f64;

        // Alpha is ignored.
        for (x, y, pixel) in image.pixels() {
            let [r, g, b, _] = pixel.0;
            total_pixels += 1;
            total_brightness += (r as f64 + g as f64 + b as f64) / 3.0;

            if is_skin(r, g, b) {
                skin_pixels += 1;
                sum_x += x as f64;
                sum_y += y as f64;
            }
        }

        let center_of_mass =
            (skin_pixels > 0).then(|| (sum_x / skin_pixels as f64, sum_y / skin_pixels as f64));
        let average_brightness = if total_pixels > 0 {
            total_brightness / total_pixels as f64
        } else {
            0.0
        };

        Self {
            skin_pixels,
            total_pixels,
            center_of_mass,
            average_brightness,
        }
    }

    /// Fraction of skin pixels, `None` for a frame without pixels.
    pub fn skin_ratio(&self) -> Option<f64> {
        (self.total_pixels > 0).then(|| self.skin_pixels as f64 / self.total_pixels as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};

    const SKIN: Rgb<u8> = Rgb([200, 140, 110]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn counts_skin_pixels_and_center_of_mass() {
        // Skin occupies the left column of a 4x2 frame.
        let image: RgbImage =
            ImageBuffer::from_fn(4, 2, |x, _| if x == 0 { SKIN } else { BLUE });
        let stats = FrameStatistics::collect(&DynamicImage::ImageRgb8(image));

        assert_eq!(stats.skin_pixels, 2);
        assert_eq!(stats.total_pixels, 8);
        assert_eq!(stats.skin_ratio(), Some(0.25));
        assert_eq!(stats.center_of_mass, Some((0.0, 0.5)));
    }

    #[test]
    fn brightness_averages_every_pixel() {
        let image: RgbImage = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([30, 30, 30])
            } else {
                Rgb([90, 90, 90])
            }
        });
        let stats = FrameStatistics::collect(&DynamicImage::ImageRgb8(image));
        assert_eq!(stats.average_brightness, 60.0);
        assert_eq!(stats.center_of_mass, None);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let image = RgbaImage::from_pixel(3, 3, Rgba([200, 140, 110, 0]));
        let stats = FrameStatistics::collect(&DynamicImage::ImageRgba8(image));
        assert_eq!(stats.skin_pixels, 9);
    }

    #[test]
    fn empty_image_has_no_ratio() {
        let stats = FrameStatistics::collect(&DynamicImage::new_rgb8(0, 0));
        assert_eq!(stats.total_pixels, 0);
        assert_eq!(stats.skin_ratio(), None);
        assert_eq!(stats.average_brightness, 0.0);
    }
}
