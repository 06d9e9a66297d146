//! Decoded-region outlines.
//!
//! Draws the outline of each decoded barcode/QR region into an RGB copy
//! of the frame. Regions with more than four corner points are reduced
//! to their convex hull first, then the hull is drawn as a closed
//! polygon.

use image::{DynamicImage, Rgb, RgbImage};

use super::DecodedObject;

/// Outline color.
const OUTLINE: Rgb<u8> = Rgb([0, 0, 255]);

/// Render an annotated copy of the frame with every decoded region
/// outlined.
pub fn annotate(frame: &DynamicImage, objects: &[DecodedObject]) -> RgbImage {
    let mut canvas = frame.to_rgb8();
    for object in objects {
        outline_region(&mut canvas, &object.corners);
    }
    canvas
}

/// Draw one region outline into the canvas.
pub fn outline_region(canvas: &mut RgbImage, corners: &[(f32, f32)]) {
    if corners.len() < 2 {
        return;
    }

    // More than a quad means the decoder handed back a point cloud;
    // reduce it to the convex hull before drawing.
    let hull;
    let points: &[(f32, f32)] = if corners.len() > 4 {
        hull = convex_hull(corners);
        &hull
    } else {
        corners
    };

    let n = points.len();
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        draw_line(canvas, x0, y0, x1, y1, OUTLINE);
    }
}

/// Convex hull via Andrew's monotone chain, counter-clockwise order.
pub fn convex_hull(points: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut sorted: Vec<(f32, f32)> = points.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let cross = |o: (f32, f32), a: (f32, f32), b: (f32, f32)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut lower: Vec<(f32, f32)> = Vec::new();
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(f32, f32)> = Vec::new();
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Bresenham line clipped to the canvas.
fn draw_line(canvas: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();

    let mut x = x0.round() as i64;
    let mut y = y0.round() as i64;
    let xe = x1.round() as i64;
    let ye = y1.round() as i64;

    let dx = (xe - x).abs();
    let dy = -(ye - y).abs();
    let sx = if x < xe { 1 } else { -1 };
    let sy = if y < ye { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
            canvas.put_pixel(x as u32, y as u32, color);
        }
        if x == xe && y == ye {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
