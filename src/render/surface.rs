use std::sync::Arc;

use kurbo::Shape;
use vello_cpu::kurbo as ck;

use crate::assets::color::CssColor;
use crate::assets::decode::DecodedImage;
use crate::foundation::core::{CardSize, Rect};
use crate::foundation::error::{CarnetError, CarnetResult};
use crate::render::blur::shadow_blur_rgba8_premul;
use crate::render::composite::{mask_alpha_in_place, offset_rgba8, over_in_place, tint_by_alpha};

const PATH_TOLERANCE: f64 = 0.1;

/// Drop shadow applied to every paint operation while it is set on a [`CardSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: CssColor,
    /// Canvas `shadowBlur`; the Gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Shadow {
    /// A shadow only paints when it has color and either blur or offset.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0 && (self.blur > 0.0 || self.offset_x != 0 || self.offset_y != 0)
    }
}

/// Raster drawing surface for one card, backed by `vello_cpu`.
///
/// Every operation rasterizes into a scratch layer which is then composited source-over onto
/// the accumulated target, so draws stack in call order like a 2D canvas. Pixels are
/// premultiplied RGBA8.
pub struct CardSurface {
    size: CardSize,
    target: vello_cpu::Pixmap,
    layer: vello_cpu::Pixmap,
    mask: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    shadow: Option<Shadow>,
}

impl std::fmt::Debug for CardSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSurface")
            .field("size", &self.size)
            .field("shadow", &self.shadow)
            .finish()
    }
}

impl CardSurface {
    pub fn new(size: CardSize) -> CarnetResult<Self> {
        size.validate()?;
        let (w, h) = (size.width as u16, size.height as u16);
        Ok(Self {
            size,
            target: vello_cpu::Pixmap::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
            mask: vello_cpu::Pixmap::new(w, h),
            ctx: None,
            shadow: None,
        })
    }

    pub fn size(&self) -> CardSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.target.data_as_u8_slice()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Straight-alpha RGBA8 copy of the surface, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data().to_vec();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Wipe the whole surface to transparent.
    pub fn clear(&mut self) {
        self.target.data_as_u8_slice_mut().fill(0);
    }

    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }

    /// Run `f` with `shadow` set, then reset the shadow to none before returning.
    pub fn with_shadow<R>(&mut self, shadow: Shadow, f: impl FnOnce(&mut Self) -> R) -> R {
        self.shadow = Some(shadow);
        let out = f(self);
        self.shadow = None;
        out
    }

    pub fn fill_rect(&mut self, rect: Rect, color: CssColor) {
        let r = ck::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
        self.paint_layer(None, |ctx| {
            ctx.set_transform(ck::Affine::IDENTITY);
            ctx.set_paint(to_cpu_color(color));
            ctx.fill_rect(&r);
        });
    }

    pub fn fill_shape(&mut self, shape: &impl Shape, color: CssColor) {
        let path = shape_to_cpu(shape);
        self.paint_layer(None, |ctx| {
            ctx.set_transform(ck::Affine::IDENTITY);
            ctx.set_paint(to_cpu_color(color));
            ctx.fill_path(&path);
        });
    }

    /// Stroke the outline of `shape` with a centered line of `line_width` (miter joins).
    pub fn stroke_shape(&mut self, shape: &impl Shape, color: CssColor, line_width: f64) {
        if !(line_width > 0.0) {
            return;
        }
        let outline = kurbo::stroke(
            shape.path_elements(PATH_TOLERANCE),
            &kurbo::Stroke::new(line_width).with_join(kurbo::Join::Miter),
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        self.fill_shape(&outline, color);
    }

    /// Stretch `img` to exactly cover `dest` (aspect ratio not preserved).
    pub fn draw_image(&mut self, img: &DecodedImage, dest: Rect) -> CarnetResult<()> {
        self.draw_image_inner(img, dest, None)
    }

    /// Like [`CardSurface::draw_image`], restricted to the inside of `clip`.
    ///
    /// The clip only covers this one draw; later operations are unclipped.
    pub fn draw_image_clipped(
        &mut self,
        img: &DecodedImage,
        dest: Rect,
        clip: &impl Shape,
    ) -> CarnetResult<()> {
        let clip = shape_to_cpu(clip);
        self.draw_image_inner(img, dest, Some(&clip))
    }

    fn draw_image_inner(
        &mut self,
        img: &DecodedImage,
        dest: Rect,
        clip: Option<&ck::BezPath>,
    ) -> CarnetResult<()> {
        if !(dest.width() > 0.0 && dest.height() > 0.0) {
            return Ok(());
        }
        let paint = image_paint(img)?;
        let (iw, ih) = (f64::from(img.width), f64::from(img.height));
        let tr = ck::Affine::translate((dest.x0, dest.y0))
            * ck::Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        self.paint_layer(clip, |ctx| {
            ctx.set_transform(tr);
            ctx.set_paint_transform(ck::Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_rect(&ck::Rect::new(0.0, 0.0, iw, ih));
        });
        Ok(())
    }

    /// Rasterize `draw` into the scratch layer, optionally mask it by `clip`, then composite it
    /// (and its shadow, if one is set) over the target.
    pub(crate) fn paint_layer(
        &mut self,
        clip: Option<&ck::BezPath>,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => {
                vello_cpu::RenderContext::new(self.size.width as u16, self.size.height as u16)
            }
        };

        ctx.reset();
        draw(&mut ctx);
        ctx.flush();
        self.layer.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.layer);

        if let Some(clip) = clip {
            ctx.reset();
            ctx.set_transform(ck::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(clip);
            ctx.flush();
            self.mask.data_as_u8_slice_mut().fill(0);
            ctx.render_to_pixmap(&mut self.mask);
            mask_alpha_in_place(
                self.layer.data_as_u8_slice_mut(),
                self.mask.data_as_u8_slice(),
            );
        }
        self.ctx = Some(ctx);

        if let Some(shadow) = self.shadow.filter(Shadow::is_visible) {
            let (w, h) = (self.size.width, self.size.height);
            let tinted = tint_by_alpha(self.layer.data_as_u8_slice(), shadow.color.to_premul());
            let blurred = shadow_blur_rgba8_premul(&tinted, w, h, shadow.blur);
            let shifted = offset_rgba8(&blurred, w, h, shadow.offset_x, shadow.offset_y);
            over_in_place(self.target.data_as_u8_slice_mut(), &shifted);
        }
        over_in_place(
            self.target.data_as_u8_slice_mut(),
            self.layer.data_as_u8_slice(),
        );
    }
}

pub(crate) fn to_cpu_color(c: CssColor) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn shape_to_cpu(shape: &impl Shape) -> ck::BezPath {
    use kurbo::PathEl;

    let p = |p: kurbo::Point| ck::Point::new(p.x, p.y);
    let mut out = ck::BezPath::new();
    for el in shape.path_elements(PATH_TOLERANCE) {
        match el {
            PathEl::MoveTo(a) => out.move_to(p(a)),
            PathEl::LineTo(a) => out.line_to(p(a)),
            PathEl::QuadTo(a, b) => out.quad_to(p(a), p(b)),
            PathEl::CurveTo(a, b, c) => out.curve_to(p(a), p(b), p(c)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(img: &DecodedImage) -> CarnetResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CarnetResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CarnetError::decode(format!("image width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CarnetError::decode(format!("image height {height} exceeds u16")))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(CarnetError::decode("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(bytes.len() / 4);
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
