use kurbo::Shape;

use crate::assets::color::CssColor;
use crate::assets::decode::DecodedImage;
use crate::assets::fonts::{FontSet, Weight};
use crate::assets::slot::{ImageKind, ImageSlots};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::CarnetResult;
use crate::model::card::RenderModel;
use crate::render::surface::{CardSurface, Shadow};
use crate::render::text::TextPainter;

/// Fallback card fill used when no template is ready.
pub const FALLBACK_FILL: CssColor = CssColor::rgb(0xf0, 0xf0, 0xf0);
/// Fallback border color.
pub const FALLBACK_BORDER: CssColor = CssColor::rgb(0x00, 0x7b, 0xff);
/// Distance of the fallback border from every card edge.
pub const FALLBACK_BORDER_INSET: f64 = 10.0;
pub const FALLBACK_BORDER_WIDTH: f64 = 3.0;
pub const PHOTO_OUTLINE: CssColor = CssColor::rgb(255, 255, 255);
pub const PHOTO_OUTLINE_WIDTH: f64 = 3.0;

/// Soft white halo drawn behind every text field.
pub const LEGIBILITY_SHADOW: Shadow = Shadow {
    color: CssColor::rgba(255, 255, 255, 204),
    blur: 3.0,
    offset_x: 1,
    offset_y: 1,
};

/// Vertical offset of the department line below the position anchor.
pub const DEPARTMENT_OFFSET_Y: i32 = 30;
/// The ID line sits at `(ID_ANCHOR_X, height - ID_ANCHOR_BOTTOM)`.
pub const ID_ANCHOR_X: i32 = 30;
pub const ID_ANCHOR_BOTTOM: i32 = 40;

/// One text field after layout rules are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub origin: Point,
    pub size_px: i32,
    pub weight: Weight,
}

/// Owns the three image slots and paints a [`RenderModel`] onto a [`CardSurface`].
///
/// Slots are only read while rendering; the owner writes them when decodes complete and then
/// calls [`CompositingEngine::render`] again.
pub struct CompositingEngine {
    slots: ImageSlots,
    text: Option<TextPainter>,
}

impl std::fmt::Debug for CompositingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositingEngine")
            .field("slots", &self.slots)
            .field("has_text", &self.text.is_some())
            .finish()
    }
}

impl CompositingEngine {
    /// Build an engine. Without fonts every text layer is skipped.
    pub fn new(fonts: Option<&FontSet>) -> CarnetResult<Self> {
        let text = fonts.map(TextPainter::new).transpose()?;
        if text.is_none() {
            tracing::warn!("no fonts available, text fields will not be drawn");
        }
        Ok(Self {
            slots: ImageSlots::default(),
            text,
        })
    }

    pub fn slots(&self) -> &ImageSlots {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut ImageSlots {
        &mut self.slots
    }

    /// Replace one image resource with a decoded image.
    pub fn set_image(&mut self, kind: ImageKind, img: DecodedImage) {
        self.slots.get_mut(kind).finish_ok(img);
    }

    pub fn clear_images(&mut self) {
        self.slots.clear();
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Repaint the whole surface from `model`. Never fails; broken layers are logged and skipped.
    #[tracing::instrument(skip_all, fields(w = surface.width(), h = surface.height()))]
    pub fn render(&mut self, surface: &mut CardSurface, model: &RenderModel) {
        surface.clear();
        self.draw_background(surface);
        self.draw_photo(surface, model);
        self.draw_logo(surface, model);
        self.draw_texts(surface, model);
        tracing::debug!("card rendered");
    }

    fn draw_background(&self, surface: &mut CardSurface) {
        let bounds = surface.size().rect();
        if let Some(img) = self.slots.template.ready() {
            match surface.draw_image(img, bounds) {
                Ok(()) => {
                    tracing::debug!(w = img.width, h = img.height, "drew template");
                    return;
                }
                Err(e) => tracing::warn!(error = %e, "template draw failed, using fallback"),
            }
        }
        surface.fill_rect(bounds, FALLBACK_FILL);
        let border = Rect::new(
            bounds.x0 + FALLBACK_BORDER_INSET,
            bounds.y0 + FALLBACK_BORDER_INSET,
            bounds.x1 - FALLBACK_BORDER_INSET,
            bounds.y1 - FALLBACK_BORDER_INSET,
        );
        surface.stroke_shape(
            &border,
            FALLBACK_BORDER,
            FALLBACK_BORDER_WIDTH,
        );
    }

    fn draw_photo(&self, surface: &mut CardSurface, model: &RenderModel) {
        let Some(img) = self.slots.photo.ready() else {
            return;
        };
        let Some(circle) = photo_circle(model) else {
            return;
        };
        let bbox = circle.bounding_box();
        if let Err(e) = surface.draw_image_clipped(img, bbox, &circle) {
            tracing::warn!(error = %e, "photo draw failed");
            return;
        }
        surface.stroke_shape(&circle, PHOTO_OUTLINE, PHOTO_OUTLINE_WIDTH);
        tracing::debug!(size = model.photo_size, "drew photo");
    }

    fn draw_logo(&self, surface: &mut CardSurface, model: &RenderModel) {
        let Some(img) = self.slots.logo.ready() else {
            return;
        };
        if model.logo_size <= 0 {
            return;
        }
        let (x, y, s) = (
            f64::from(model.logo_x),
            f64::from(model.logo_y),
            f64::from(model.logo_size),
        );
        if let Err(e) = surface.draw_image(img, Rect::new(x, y, x + s, y + s)) {
            tracing::warn!(error = %e, "logo draw failed");
        }
    }

    fn draw_texts(&mut self, surface: &mut CardSurface, model: &RenderModel) {
        let draws = text_draws(model, surface.height());
        if draws.is_empty() {
            return;
        }
        let Some(painter) = self.text.as_mut() else {
            tracing::debug!(count = draws.len(), "skipping text, no fonts");
            return;
        };
        let color = CssColor::parse(&model.text_color).unwrap_or_else(|e| {
            tracing::warn!(color = %model.text_color, error = %e, "bad text color, using black");
            CssColor::rgb(0, 0, 0)
        });

        for d in draws {
            if d.size_px <= 0 {
                tracing::debug!(text = %d.text, size_px = d.size_px, "skipping text, size <= 0");
                continue;
            }
            let res = surface.with_shadow(LEGIBILITY_SHADOW, |s| {
                painter.draw_text(s, &d.text, d.origin, d.size_px as f32, d.weight, color)
            });
            if let Err(e) = res {
                tracing::warn!(text = %d.text, error = %e, "text draw failed");
            }
        }
    }
}

/// Circle the photo is clipped to, or `None` when `photo_size <= 0`.
pub fn photo_circle(model: &RenderModel) -> Option<kurbo::Circle> {
    if model.photo_size <= 0 {
        return None;
    }
    let r = f64::from(model.photo_size) / 2.0;
    Some(kurbo::Circle::new(
        (f64::from(model.photo_x) + r, f64::from(model.photo_y) + r),
        r,
    ))
}

/// The text fields to draw for `model` on a card of `card_height`, in paint order.
///
/// Empty fields are left out. Sizes may be non-positive for small base sizes.
pub fn text_draws(model: &RenderModel, card_height: u32) -> Vec<TextDraw> {
    let fs = model.font_size;
    let at = |x: i32, y: i32| Point::new(f64::from(x), f64::from(y));
    let id_y = i32::try_from(card_height)
        .unwrap_or(i32::MAX)
        .saturating_sub(ID_ANCHOR_BOTTOM);

    let mut out = Vec::with_capacity(4);
    let mut push = |text: String, origin: Point, size_px: i32, weight: Weight| {
        if !text.is_empty() {
            out.push(TextDraw {
                text,
                origin,
                size_px,
                weight,
            });
        }
    };
    push(
        model.name.clone(),
        at(model.name_x, model.name_y),
        fs.saturating_add(2),
        Weight::Bold,
    );
    push(
        model.position.clone(),
        at(model.position_x, model.position_y),
        fs.saturating_sub(2),
        Weight::Regular,
    );
    push(
        model.department.clone(),
        at(
            model.position_x,
            model.position_y.saturating_add(DEPARTMENT_OFFSET_Y),
        ),
        fs.saturating_sub(4),
        Weight::Regular,
    );
    if !model.id_number.is_empty() {
        push(
            model.id_label(),
            at(ID_ANCHOR_X, id_y),
            fs.saturating_sub(6),
            Weight::Bold,
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
