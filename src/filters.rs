//! Fixed convolution kernels over 8-bit grayscale images.
//!
//! Neighbours outside the image are sampled by clamping to the nearest edge
//! pixel, so a flat image produces a flat response all the way to the border.
use image::{GrayImage, ImageBuffer, Luma};

/// A square integer kernel with an explicit divisor.
struct Kernel<const N: usize> {
    weights: [[i32; N]; N],
    scale: i32,
}

/// Laplacian-style edge detector. Flat regions go to 0, contrast goes to 255.
const FIND_EDGES: Kernel<3> = Kernel {
    weights: [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]],
    scale: 1,
};

/// Heavy centre-weighted blur used to soften edge strokes.
const SMOOTH_MORE: Kernel<5> = Kernel {
    weights: [
        [1, 1, 1, 1, 1],
        [1, 5, 5, 5, 1],
        [1, 5, 44, 5, 1],
        [1, 5, 5, 5, 1],
        [1, 1, 1, 1, 1],
    ],
    scale: 100,
};

pub fn find_edges(gray: &GrayImage) -> GrayImage {
    convolve(gray, &FIND_EDGES)
}

pub fn smooth_more(gray: &GrayImage) -> GrayImage {
    convolve(gray, &SMOOTH_MORE)
}

fn convolve<const N: usize>(src: &GrayImage, kernel: &Kernel<N>) -> GrayImage {
    let (width, height) = src.dimensions();
    let radius = (N / 2) as i64;
    let half_scale = kernel.scale / 2;

    ImageBuffer::from_fn(width, height, |x, y| {
        let mut sum = 0i32;
        for (ky, row) in kernel.weights.iter().enumerate() {
            let sy = clamp_coord(y as i64 + ky as i64 - radius, height);
            for (kx, &weight) in row.iter().enumerate() {
                let sx = clamp_coord(x as i64 + kx as i64 - radius, width);
                sum += weight * src.get_pixel(sx, sy)[0] as i32;
            }
        }

        // Negative responses clamp to 0 before dividing; positive ones round half up.
        let value = if sum <= 0 {
            0
        } else {
            (sum + half_scale) / kernel.scale
        };
        Luma([value.min(255) as u8])
    })
}

#[inline]
fn clamp_coord(coord: i64, len: u32) -> u32 {
    coord.clamp(0, len as i64 - 1) as u32
}
