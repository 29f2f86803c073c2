use crate::assets::color::CssColor;
use crate::assets::fonts::{FontFace, FontSet, TextBrushRgba8, TextLayoutEngine, Weight};
use crate::foundation::core::Point;
use crate::foundation::error::CarnetResult;
use crate::render::surface::CardSurface;

use vello_cpu::kurbo as ck;

/// Shapes and paints single-line text fields onto a [`CardSurface`].
pub struct TextPainter {
    engine: TextLayoutEngine,
    regular: vello_cpu::peniko::FontData,
    /// Same face as `regular` when the set has no bold face.
    bold: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .finish_non_exhaustive()
    }
}

impl TextPainter {
    pub fn new(fonts: &FontSet) -> CarnetResult<Self> {
        Ok(Self {
            engine: TextLayoutEngine::new(fonts)?,
            regular: font_data(fonts.face(Weight::Regular)),
            bold: font_data(fonts.face(Weight::Bold)),
        })
    }

    /// Draw `text` with the top-left of its line box at `origin`.
    ///
    /// Any shadow set on `surface` applies to the glyphs. Empty text is a no-op.
    pub fn draw_text(
        &mut self,
        surface: &mut CardSurface,
        text: &str,
        origin: Point,
        size_px: f32,
        weight: Weight,
        color: CssColor,
    ) -> CarnetResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.engine.layout_line(text, size_px, weight, brush)?;
        let font = match weight {
            Weight::Bold => &self.bold,
            Weight::Regular => &self.regular,
        };

        surface.paint_layer(None, |ctx| {
            ctx.set_transform(ck::Affine::translate((origin.x, origin.y)));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });
        Ok(())
    }
}

fn font_data(face: &FontFace) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
        face.index(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
