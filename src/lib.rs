//! Carnet composes corporate ID cards into PNG images.
//!
//! A card is a fixed-size raster built from up to three images (template background, circular
//! photo, logo) and four text fields. The pipeline is deliberately small:
//!
//! 1. **Inputs**: raw form strings ([`FormInputs`]) become a [`RenderModel`] via [`build_model`].
//! 2. **Load**: image files decode on worker threads ([`ImageLoader`]) into [`ImageSlot`]s.
//! 3. **Render**: [`CompositingEngine::render`] repaints a [`CardSurface`] from the model and
//!    whichever slots are ready.
//! 4. **Export**: [`save_png`] writes the surface under a name from [`export_filename`].
//!
//! [`Editor`] wires these together for interactive or scripted use.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical model and images produce identical pixels.
//! - **Premultiplied RGBA8** on the surface; exports are straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod editor;
mod export;
mod foundation;
mod model;
mod render;

pub use assets::color::CssColor;
pub use assets::decode::{
    DecodedImage, SVG_MIME, decode_for_mime, decode_image, decode_svg, mime_for_path,
};
pub use assets::fonts::{FontFace, FontSet, TextBrushRgba8, TextLayoutEngine, Weight};
pub use assets::loader::{ImageFile, ImageLoader, LoadCompletion};
pub use assets::slot::{ImageKind, ImageSlot, ImageSlots};
pub use editor::config::{EditorConfig, FontConfig};
pub use editor::session::{
    EXAMPLE_DEPARTMENT, EXAMPLE_NAME, EXAMPLE_POSITION, Editor, LoadOutcome, generate_unique_id,
};
pub use export::png::{DEFAULT_EXPORT_NAME, encode_png, export_filename, save_png};
pub use foundation::core::{Affine, CardSize, Point, Rect, Rgba8Premul};
pub use foundation::error::{CarnetError, CarnetResult};
pub use model::card::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, RenderModel};
pub use model::inputs::{Field, FormInputs, build_model, parse_int};
pub use render::blur::{blur_rgba8_premul, shadow_blur_rgba8_premul};
pub use render::composite::{over, over_in_place};
pub use render::engine::{
    CompositingEngine, FALLBACK_BORDER, FALLBACK_FILL, LEGIBILITY_SHADOW, TextDraw, photo_circle,
    text_draws,
};
pub use render::surface::{CardSurface, Shadow};
pub use render::text::TextPainter;
