use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{CarnetError, CarnetResult};

// Preferred sans-serif families, in order, when discovering system fonts.
const PREFERRED_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Font weight requested for a text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One loaded font face: raw bytes plus the collection index of the face.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    pub fn new(bytes: Vec<u8>, index: u32) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index,
        }
    }

    /// Read a `.ttf`/`.otf`/`.ttc` file (face 0).
    pub fn from_path(path: &Path) -> CarnetResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CarnetError::read(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(Self::new(bytes, 0))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Regular and (optional) bold faces used for all card text.
///
/// Bold fields fall back to the regular face when no bold face is available.
#[derive(Clone, Debug)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: Option<FontFace>,
}

impl FontSet {
    pub fn face(&self, weight: Weight) -> &FontFace {
        match weight {
            Weight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            Weight::Regular => &self.regular,
        }
    }

    /// Load explicitly configured font files.
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> CarnetResult<Self> {
        let regular = FontFace::from_path(regular)?;
        let bold = bold.map(FontFace::from_path).transpose()?;
        Ok(Self { regular, bold })
    }

    /// Discover a sans-serif regular/bold pair among installed system fonts.
    pub fn system() -> Option<Self> {
        use usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight as DbWeight};

        let mut db = Database::new();
        db.load_system_fonts();

        let mut families: Vec<Family<'_>> =
            PREFERRED_FAMILIES.iter().map(|n| Family::Name(n)).collect();
        families.push(Family::SansSerif);

        let query = |weight: DbWeight| Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };

        let regular_id = db
            .query(&query(DbWeight::NORMAL))
            .or_else(|| db.faces().next().map(|f| f.id))?;
        let bold_id = db
            .query(&query(DbWeight::BOLD))
            .filter(|&id| id != regular_id)
            .filter(|&id| db.face(id).is_some_and(|f| f.weight.0 >= 600));

        let load = |id| db.with_face_data(id, |data, index| FontFace::new(data.to_vec(), index));
        let regular = load(regular_id)?;
        let bold = bold_id.and_then(load);
        tracing::debug!(has_bold = bold.is_some(), "discovered system fonts");
        Some(Self { regular, bold })
    }
}

/// Stateful helper that shapes single-line text with Parley from a [`FontSet`].
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular_family: String,
    bold_family: Option<String>,
}

impl TextLayoutEngine {
    /// Register the faces of `fonts` with a fresh Parley font context.
    pub fn new(fonts: &FontSet) -> CarnetResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular_family = register_face(&mut font_ctx, &fonts.regular)?;
        let bold_family = fonts
            .bold
            .as_ref()
            .map(|f| register_face(&mut font_ctx, f))
            .transpose()?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
        })
    }

    /// Shape `text` as one unbroken line with top-left origin at (0, 0).
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        weight: Weight,
        brush: TextBrushRgba8,
    ) -> CarnetResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CarnetError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let (family, font_weight) = match (weight, &self.bold_family) {
            (Weight::Bold, Some(bold)) => (bold.clone(), parley::style::FontWeight::BOLD),
            (Weight::Bold, None) => (
                self.regular_family.clone(),
                parley::style::FontWeight::NORMAL,
            ),
            (Weight::Regular, _) => (
                self.regular_family.clone(),
                parley::style::FontWeight::NORMAL,
            ),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(font_weight));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn register_face(font_ctx: &mut parley::FontContext, face: &FontFace) -> CarnetResult<String> {
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(face.bytes().to_vec()),
        None,
    );
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CarnetError::validation("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| CarnetError::validation("registered font family has no name"))?;
    Ok(name.to_string())
}

/// DejaVu Sans regular/bold checked in under `tests/data/fonts`.
#[cfg(test)]
pub(crate) fn fixture_font_set() -> FontSet {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts");
    FontSet::from_paths(
        &dir.join("DejaVuSans.ttf"),
        Some(&dir.join("DejaVuSans-Bold.ttf")),
    )
    .expect("font fixtures present")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
