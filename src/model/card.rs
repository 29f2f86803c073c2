/// Snapshot of every field value the compositor needs for one render.
///
/// Plain data. [`RenderModel::default`] is the layout restored by an explicit reset; parsing raw
/// form input goes through [`crate::build_model`] and coerces bad numbers to 0 instead.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderModel {
    pub name: String,
    pub position: String,
    pub department: String,
    pub id_number: String,

    pub name_x: i32,
    pub name_y: i32,
    pub position_x: i32,
    pub position_y: i32,

    pub photo_x: i32,
    pub photo_y: i32,
    /// Diameter of the circular photo.
    pub photo_size: i32,

    pub logo_x: i32,
    pub logo_y: i32,
    pub logo_size: i32,

    /// CSS color shared by every text field.
    pub text_color: String,
    /// Base size in px; each field draws at an offset from it.
    pub font_size: i32,
}

/// Base font size used when the form supplies none.
pub const DEFAULT_FONT_SIZE: i32 = 18;
/// Text color used when the form supplies none.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

impl Default for RenderModel {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            department: String::new(),
            id_number: String::new(),
            name_x: 100,
            name_y: 250,
            position_x: 100,
            position_y: 280,
            photo_x: 30,
            photo_y: 100,
            photo_size: 100,
            logo_x: 200,
            logo_y: 30,
            logo_size: 60,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl RenderModel {
    /// `ID: <id_number>`, the literal text drawn for the ID field.
    pub fn id_label(&self) -> String {
        format!("ID: {}", self.id_number)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/card.rs"]
mod tests;
