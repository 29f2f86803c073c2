//! Separable Gaussian blur over premultiplied RGBA8, used for text shadows.

/// Canvas-style blur: `blur` is the `shadowBlur` value and the Gaussian sigma is `blur / 2`.
pub fn shadow_blur_rgba8_premul(src: &[u8], width: u32, height: u32, blur: f32) -> Vec<u8> {
    if !blur.is_finite() || blur <= 0.0 || width == 0 || height == 0 {
        return src.to_vec();
    }
    let sigma = blur / 2.0;
    let radius = (sigma * 3.0).ceil() as u32;
    blur_rgba8_premul(src, width, height, radius, sigma)
}

pub fn blur_rgba8_premul(src: &[u8], width: u32, height: u32, radius: u32, sigma: f32) -> Vec<u8> {
    debug_assert_eq!(src.len(), (width as usize) * (height as usize) * 4);
    if radius == 0 || !sigma.is_finite() || sigma <= 0.0 {
        return src.to_vec();
    }

    let kernel = gaussian_kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];

    let (w, h) = (width as usize, height as usize);
    // Rows, then columns: (line count, line length, index of item i on line l).
    convolve(src, &mut tmp, &kernel, h, w, |line, i| line * w + i);
    convolve(&tmp, &mut out, &kernel, w, h, |line, i| i * w + line);
    out
}

fn convolve(
    src: &[u8],
    dst: &mut [u8],
    kernel: &[u32],
    lines: usize,
    len: usize,
    index: impl Fn(usize, usize) -> usize,
) {
    let radius = (kernel.len() / 2) as isize;
    let last = len as isize - 1;
    for line in 0..lines {
        for i in 0..len {
            let mut acc = [0u64; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                // Taps outside the surface read as transparent.
                let si = i as isize + ki as isize - radius;
                if si < 0 || si > last {
                    continue;
                }
                let px = index(line, si as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[px + c]);
                }
            }
            let out = index(line, i) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = q16_to_u8(*a);
            }
        }
    }
}

/// Normalized Gaussian weights in Q16 fixed point, summing to exactly `1 << 16`.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&q| i64::from(q)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + (65536 - acc)).clamp(0, 65536) as u32;
    weights
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
