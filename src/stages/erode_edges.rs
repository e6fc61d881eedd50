use image::Rgba;
use itertools::iproduct;

use crate::utils::{alpha_plane, TRANSPARENT};
use crate::Image;

/// Shaves anti-aliased fringe off the opaque region
///
/// Pixels on the boundary between subject and key blend both colors. Their
/// hue and saturation drift far enough from the key to survive keying, but
/// they still carry a visible tint of it. Eroding the opaque region by one
/// pixel per pass removes that ring.
pub trait ErodeEdges {
    /// Runs `passes` rounds of 4-neighbour erosion and returns the total
    /// number of pixels cleared.
    ///
    /// Every pass snapshots the alpha plane first, marks each interior pixel
    /// with alpha > 0 that has a transparent up/down/left/right neighbour in
    /// that snapshot, then clears all marked pixels at once. The outermost
    /// row and column on every side are never eroded.
    fn erode_edges(&mut self, passes: u32) -> usize;
}

impl ErodeEdges for Image<Rgba<u8>> {
    fn erode_edges(&mut self, passes: u32) -> usize {
        let mut cleared = 0;
        for _ in 0..passes {
            let marked = fringe_pixels(self);
            if marked.is_empty() {
                break;
            }
            cleared += marked.len();
            for (x, y) in marked {
                self.put_pixel(x, y, TRANSPARENT);
            }
        }
        cleared
    }
}

/// Collects interior opaque pixels touching a transparent 4-neighbour.
fn fringe_pixels(image: &Image<Rgba<u8>>) -> Vec<(u32, u32)> {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let alpha = alpha_plane(image);
    let transparent = |x: u32, y: u32| alpha.get_pixel(x, y).0[0] == 0;

    iproduct!(1..height - 1, 1..width - 1)
        .filter(|&(y, x)| !transparent(x, y))
        .filter(|&(y, x)| {
            transparent(x + 1, y)
                || transparent(x - 1, y)
                || transparent(x, y + 1)
                || transparent(x, y - 1)
        })
        .map(|(y, x)| (x, y))
        .collect()
}
