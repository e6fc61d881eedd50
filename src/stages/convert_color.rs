use image::Rgba;

/// Converts an 8-bit RGB triple to 8-bit HSV.
///
/// All three output channels span the full byte range, hue included: hue
/// 0 and hue 255 are both red, so the circle is mapped onto `0..=255` rather
/// than degrees. Fractional channel values are truncated, not rounded.
///
/// Achromatic input (all channels equal) has hue and saturation 0.
///
/// # Examples
///
/// ```
/// use chroma_cutout::rgb_to_hsv;
///
/// assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
/// assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
/// ```
#[must_use]
pub fn rgb_to_hsv([red, green, blue]: [u8; 3]) -> [u8; 3] {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);

    if max == min {
        return [0, 0, max];
    }

    let chroma = f32::from(max - min);
    let saturation = chroma / f32::from(max);

    let red_distance = f32::from(max - red) / chroma;
    let green_distance = f32::from(max - green) / chroma;
    let blue_distance = f32::from(max - blue) / chroma;

    // Channel distances stay single precision; the sector offset, the fold
    // into [0, 1) and the byte scaling are done in f64. Keeping the fold in
    // f32 drops some hues one step below the exact value.
    let sector = if red == max {
        blue_distance - green_distance
    } else if green == max {
        (2.0 + f64::from(red_distance) - f64::from(blue_distance)) as f32
    } else {
        (4.0 + f64::from(green_distance) - f64::from(red_distance)) as f32
    };
    let hue = ((f64::from(sector) / 6.0 + 1.0) % 1.0) as f32;

    // `as u8` truncates toward zero and saturates at the byte limits.
    [
        (f64::from(hue) * 255.0) as u8,
        (f64::from(saturation) * 255.0) as u8,
        max,
    ]
}

/// Converts the color channels of an RGBA pixel to HSV, ignoring alpha.
#[inline]
#[must_use]
pub fn rgba_to_hsv(pixel: Rgba<u8>) -> [u8; 3] {
    let Rgba([red, green, blue, _]) = pixel;
    rgb_to_hsv([red, green, blue])
}
