use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst`. Both buffers are premultiplied RGBA8 of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

/// Scale every pixel of `src` by the alpha of the matching `mask` pixel.
pub fn mask_alpha_in_place(src: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(src.len(), mask.len());
    for (s, m) in src.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = u16::from(m[3]);
        if w == 255 {
            continue;
        }
        for c in s.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w);
        }
    }
}

/// Replace the color of `src` with `color`, keeping `src` coverage. Used to build shadows.
pub fn tint_by_alpha(src: &[u8], color: Rgba8Premul) -> Vec<u8> {
    let color = color.to_array();
    let mut out = vec![0u8; src.len()];
    for (o, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let cov = u16::from(s[3]);
        if cov == 0 {
            continue;
        }
        for c in 0..4 {
            o[c] = mul_div255_u8(u16::from(color[c]), cov);
        }
    }
    out
}

/// Translate an RGBA8 buffer by whole pixels; uncovered pixels become transparent.
pub fn offset_rgba8(src: &[u8], width: u32, height: u32, dx: i32, dy: i32) -> Vec<u8> {
    let (w, h) = (width as i64, height as i64);
    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        let sy = y - i64::from(dy);
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let sx = x - i64::from(dx);
            if sx < 0 || sx >= w {
                continue;
            }
            let si = ((sy * w + sx) as usize) * 4;
            let di = ((y * w + x) as usize) * 4;
            out[di..di + 4].copy_from_slice(&src[si..si + 4]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
