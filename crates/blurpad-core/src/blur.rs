//! Software Gaussian blur matching CSS `blur()` semantics.
//!
//! The CSS `blur(r)` filter function is a Gaussian whose standard
//! deviation is `r` pixels, so [`blur_radius`] passes the radius
//! straight through as sigma to
//! [`imageproc::filter::gaussian_blur_f32`].
//!
//! `imageproc` only blurs single-channel images, so RGBA input is split
//! into planes, blurred plane by plane, and reassembled. Planes are
//! widened to 16 bits first: each filter pass truncates to the subpixel
//! type, which at 8 bits visibly darkens long kernels. Filters operate
//! on premultiplied color; images with any transparency are
//! premultiplied first so fully transparent pixels do not bleed their
//! (meaningless) color into the visible edge.

use image::{ImageBuffer, Luma, RgbaImage};

type Plane = ImageBuffer<Luma<u16>, Vec<u16>>;

const WIDEN: u16 = 257;

/// Blur `image` with a Gaussian of standard deviation `radius` pixels.
///
/// Radii that are not strictly positive (including `NaN`) return the
/// image unchanged, since `imageproc` panics on `sigma <= 0.0`.
#[must_use = "returns the blurred image"]
pub fn blur_radius(image: &RgbaImage, radius: f32) -> RgbaImage {
    if radius.is_nan() || radius <= 0.0 {
        return image.clone();
    }

    let opaque = image.pixels().all(|p| p.0[3] == u8::MAX);
    let source = if opaque {
        image.clone()
    } else {
        premultiply(image)
    };

    let planes = split_planes(&source);
    let blurred = planes.map(|plane| imageproc::filter::gaussian_blur_f32(&plane, radius));
    let mut merged = merge_planes(&blurred, image.width(), image.height());

    if opaque {
        for p in merged.pixels_mut() {
            p.0[3] = u8::MAX;
        }
        merged
    } else {
        unpremultiply(&merged)
    }
}

fn split_planes(image: &RgbaImage) -> [Plane; 4] {
    let (w, h) = image.dimensions();
    let len = image.as_raw().len() / 4;
    let mut raw: [Vec<u16>; 4] = std::array::from_fn(|_| Vec::with_capacity(len));
    for px in image.as_raw().chunks_exact(4) {
        for (plane, &v) in raw.iter_mut().zip(px) {
            plane.push(u16::from(v) * WIDEN);
        }
    }
    raw.map(|buf| Plane::from_raw(w, h, buf).unwrap_or_else(|| Plane::new(w, h)))
}

#[allow(clippy::cast_possible_truncation)]
fn merge_planes(planes: &[Plane; 4], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba(std::array::from_fn(|c| {
            let v = u32::from(planes[c].get_pixel(x, y).0[0]);
            // (65535 + 128) / 257 == 255
            ((v + u32::from(WIDEN) / 2) / u32::from(WIDEN)) as u8
        }))
    })
}

#[allow(clippy::cast_possible_truncation)]
fn premultiply(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        let a = u16::from(p.0[3]);
        for c in &mut p.0[..3] {
            // (c * a + 127) / 255 <= 255
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn unpremultiply(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        let a = u32::from(p.0[3]);
        if a == 0 {
            p.0 = [0, 0, 0, 0];
            continue;
        }
        for c in &mut p.0[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_red_blue() -> RgbaImage {
        RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn zero_radius_is_identity() {
        let img = split_red_blue();
        assert_eq!(blur_radius(&img, 0.0), img);
    }

    #[test]
    fn nan_and_negative_radius_are_identity() {
        let img = split_red_blue();
        assert_eq!(blur_radius(&img, f32::NAN), img);
        assert_eq!(blur_radius(&img, -2.0), img);
    }

    #[test]
    fn dimensions_preserved() {
        let img = RgbaImage::new(17, 31);
        let out = blur_radius(&img, 3.0);
        assert_eq!(out.dimensions(), (17, 31));
    }

    #[test]
    fn softens_color_boundary() {
        let out = blur_radius(&split_red_blue(), 2.0);
        let left_red = out.get_pixel(4, 5).0[0];
        let right_red = out.get_pixel(5, 5).0[0];
        assert!(left_red < 255, "left of edge stayed pure red");
        assert!(right_red > 0, "right of edge got no red");
    }

    #[test]
    fn uniform_opaque_image_unchanged() {
        let img = RgbaImage::from_fn(12, 12, |_, _| image::Rgba([40, 90, 200, 255]));
        let out = blur_radius(&img, 4.0);
        for p in out.pixels() {
            for (got, want) in p.0.iter().zip([40u8, 90, 200, 255]) {
                assert!(got.abs_diff(want) <= 1, "got {got}, want ~{want}");
            }
        }
    }

    #[test]
    fn opaque_image_stays_opaque_at_max_export_radius() {
        let radius = crate::export::export_radius(crate::BlurLevel::MAX, 4.0);
        #[allow(clippy::cast_possible_truncation)]
        let out = blur_radius(
            &RgbaImage::from_fn(100, 100, |_, _| image::Rgba([200, 100, 50, 255])),
            radius as f32,
        );
        for p in out.pixels() {
            assert_eq!(p.0[3], 255, "alpha drifted: {:?}", p.0);
            for (got, want) in p.0[..3].iter().zip([200u8, 100, 50]) {
                assert!(got.abs_diff(want) <= 1, "got {:?}", p.0);
            }
        }
    }

    #[test]
    fn transparent_neighbors_do_not_darken_edge() {
        // Left half opaque white, right half fully transparent black.
        let img = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        });
        let out = blur_radius(&img, 2.0);
        let edge = out.get_pixel(4, 5).0;
        assert!(edge[3] < 255, "alpha should fade at the edge");
        assert!(edge[0] >= 250, "color should stay white, got {edge:?}");
    }

    #[test]
    fn deterministic() {
        let img = split_red_blue();
        assert_eq!(blur_radius(&img, 1.5), blur_radius(&img, 1.5));
    }
}
