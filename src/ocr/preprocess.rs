use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, Rgba};

/// Converts image to binary by keeping only bright pixels.
///
/// Pixels where R > threshold AND G > threshold AND B > threshold become black (text).
/// All other pixels become white (background).
///
/// Name plates render white text over darker panels, and Tesseract reads
/// dark-on-light text far more reliably.
pub fn threshold_bright_pixels(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    threshold: u8,
) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if pixel[0] > threshold && pixel[1] > threshold && pixel[2] > threshold {
            0u8
        } else {
            255u8
        };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}

/// Enlarges a captured region by an integer factor.
///
/// A factor of 0 or 1 returns the image unchanged.
pub fn upscale(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    factor: u32,
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    if factor <= 1 {
        return img.clone();
    }
    let (w, h) = img.dimensions();
    imageops::resize(img, w * factor, h * factor, FilterType::CatmullRom)
}

/// Full preprocessing chain: upscale, then binarize.
pub fn prepare_for_ocr(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    scale: u32,
    threshold: u8,
) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    threshold_bright_pixels(&upscale(img, scale), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bright_pixels() {
        let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(3, 1);

        // Pixel 0: Dark (should become white)
        img.put_pixel(0, 0, Rgba([100, 100, 100, 255]));

        // Pixel 1: Bright white (should become black)
        img.put_pixel(1, 0, Rgba([250, 250, 250, 255]));

        // Pixel 2: One channel dark (should become white)
        img.put_pixel(2, 0, Rgba([250, 250, 100, 255]));

        let result = threshold_bright_pixels(&img, 150);

        assert_eq!(result.get_pixel(0, 0)[0], 255, "Dark pixel should become white");
        assert_eq!(result.get_pixel(1, 0)[0], 0, "Bright pixel should become black");
        assert_eq!(result.get_pixel(2, 0)[0], 255, "Partially dark pixel should become white");
    }

    #[test]
    fn test_upscale_dimensions() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(100, 20);
        assert_eq!(upscale(&img, 3).dimensions(), (300, 60));
        assert_eq!(upscale(&img, 1).dimensions(), (100, 20));
        assert_eq!(upscale(&img, 0).dimensions(), (100, 20));
    }

    #[test]
    fn test_prepare_for_ocr_keeps_white_text() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([20, 30, 40, 255])
            }
        });
        let out = prepare_for_ocr(&img, 2, 150);
        assert_eq!(out.dimensions(), (8, 4));
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(7, 3)[0], 255);
    }
}
