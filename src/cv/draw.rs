// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/cv/draw.rs

use crate::cv::Rect;
use crate::frame::{ColorImage, GrayImage};

/// Draws a rectangle outline with corners `(left, up)` and `(right, down)`, both inclusive.
///
/// The stroke grows `thickness` pixels inward from the corners and is clipped to the image.
/// `color` is `[B, G, R]`.
pub fn draw_rectangle(
    image: &mut ColorImage,
    left: i32,
    up: i32,
    right: i32,
    down: i32,
    color: [u8; 3],
    thickness: u32,
) {
    let t = thickness.max(1) as i64;
    let (left, up, right, down) = (left as i64, up as i64, right as i64, down as i64);

    let x0 = left.max(0);
    let y0 = up.max(0);
    let x1 = right.min(image.width as i64 - 1);
    let y1 = down.min(image.height as i64 - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    for y in y0..=y1 {
        let edge_row = y < up + t || y > down - t;
        for x in x0..=x1 {
            if edge_row || x < left + t || x > right - t {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Copies `patch` into `dst` at `rect`, clipped to both images.
pub fn blit_gray(dst: &mut GrayImage, rect: &Rect, patch: &GrayImage) {
    if rect.x >= dst.width || rect.y >= dst.height {
        return;
    }
    let cols = rect
        .width
        .min(patch.width)
        .min(dst.width - rect.x) as usize;
    let rows = rect
        .height
        .min(patch.height)
        .min(dst.height - rect.y) as usize;

    let dst_width = dst.width as usize;
    let patch_width = patch.width as usize;
    for row in 0..rows {
        let d = (rect.y as usize + row) * dst_width + rect.x as usize;
        let s = row * patch_width;
        dst.data[d..d + cols].copy_from_slice(&patch.data[s..s + cols]);
    }
}
