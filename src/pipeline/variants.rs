//! Derivation of enhanced image variants for recognition.
//!
//! A single low-quality capture rarely recognizes well as-is. Each variant
//! applies a different enhancement (upscale, grayscale, contrast, brightness,
//! sharpening, and a combined profile) so the multiplexer can pick whichever
//! the engine reads best. Generation is infallible; a degenerate source image
//! simply yields itself as the only variant.

use image::imageops::FilterType;
use image::DynamicImage;

/// One derived rendering, tagged for logging and candidate attribution.
pub struct ImageVariant {
    pub tag: &'static str,
    pub image: DynamicImage,
}

/// Derive the fixed set of enhancement variants, in recognition order.
pub fn generate_variants(source: &DynamicImage) -> Vec<ImageVariant> {
    let (w, h) = (source.width(), source.height());
    if w == 0 || h == 0 {
        return vec![ImageVariant {
            tag: "original",
            image: source.clone(),
        }];
    }

    let upscaled = source.resize(w * 2, h * 2, FilterType::CatmullRom);
    let gray = upscaled.grayscale();

    vec![
        ImageVariant {
            tag: "resize_2x",
            image: upscaled,
        },
        ImageVariant {
            tag: "gray",
            image: gray.clone(),
        },
        ImageVariant {
            tag: "high_contrast",
            image: gray.adjust_contrast(50.0),
        },
        ImageVariant {
            tag: "bright",
            image: gray.brighten(25),
        },
        ImageVariant {
            tag: "sharp",
            image: gray.unsharpen(1.5, 5),
        },
        ImageVariant {
            tag: "combined",
            image: gray.adjust_contrast(30.0).unsharpen(1.5, 5).brighten(12),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_fixed_set_in_order() {
        let source = DynamicImage::new_rgb8(4, 4);
        let variants = generate_variants(&source);
        let tags: Vec<_> = variants.iter().map(|v| v.tag).collect();
        assert_eq!(
            tags,
            ["resize_2x", "gray", "high_contrast", "bright", "sharp", "combined"]
        );
    }

    #[test]
    fn degenerate_image_falls_back_to_original() {
        let source = DynamicImage::new_rgb8(0, 0);
        let variants = generate_variants(&source);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].tag, "original");
    }

    #[test]
    fn upscales_by_two() {
        let source = DynamicImage::new_rgb8(4, 6);
        let variants = generate_variants(&source);
        assert_eq!(variants[0].image.width(), 8);
        assert_eq!(variants[0].image.height(), 12);
    }
}
