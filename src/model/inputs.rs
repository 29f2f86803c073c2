use std::collections::BTreeMap;

use crate::foundation::error::{CarnetError, CarnetResult};
use crate::model::card::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, RenderModel};

/// Every named form field the editor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Position,
    Department,
    IdNumber,
    NameX,
    NameY,
    PositionX,
    PositionY,
    PhotoX,
    PhotoY,
    PhotoSize,
    LogoX,
    LogoY,
    LogoSize,
    TextColor,
    FontSize,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Name,
        Field::Position,
        Field::Department,
        Field::IdNumber,
        Field::NameX,
        Field::NameY,
        Field::PositionX,
        Field::PositionY,
        Field::PhotoX,
        Field::PhotoY,
        Field::PhotoSize,
        Field::LogoX,
        Field::LogoY,
        Field::LogoSize,
        Field::TextColor,
        Field::FontSize,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Position => "position",
            Field::Department => "department",
            Field::IdNumber => "idNumber",
            Field::NameX => "nameX",
            Field::NameY => "nameY",
            Field::PositionX => "positionX",
            Field::PositionY => "positionY",
            Field::PhotoX => "photoX",
            Field::PhotoY => "photoY",
            Field::PhotoSize => "photoSize",
            Field::LogoX => "logoX",
            Field::LogoY => "logoY",
            Field::LogoSize => "logoSize",
            Field::TextColor => "textColor",
            Field::FontSize => "fontSize",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::str::FromStr for Field {
    type Err = CarnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| CarnetError::validation(format!("unknown field \"{s}\"")))
    }
}

/// Raw string values keyed by form field name, as a form layer would hold them.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FormInputs {
    values: BTreeMap<String, String>,
}

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The values a reset writes back into the form: the fixed layout, empty text.
    pub fn layout_defaults() -> Self {
        let d = RenderModel::default();
        let mut out = Self::new();
        for field in Field::ALL {
            let v = match field {
                Field::Name => d.name.clone(),
                Field::Position => d.position.clone(),
                Field::Department => d.department.clone(),
                Field::IdNumber => d.id_number.clone(),
                Field::NameX => d.name_x.to_string(),
                Field::NameY => d.name_y.to_string(),
                Field::PositionX => d.position_x.to_string(),
                Field::PositionY => d.position_y.to_string(),
                Field::PhotoX => d.photo_x.to_string(),
                Field::PhotoY => d.photo_y.to_string(),
                Field::PhotoSize => d.photo_size.to_string(),
                Field::LogoX => d.logo_x.to_string(),
                Field::LogoY => d.logo_y.to_string(),
                Field::LogoSize => d.logo_size.to_string(),
                Field::TextColor => d.text_color.clone(),
                Field::FontSize => d.font_size.to_string(),
            };
            out.set(field, v);
        }
        out
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field.key().to_string(), value.into());
    }

    /// Set a field by its form name; unknown names are rejected.
    pub fn set_key(&mut self, key: &str, value: impl Into<String>) -> CarnetResult<()> {
        let field: Field = key.parse()?;
        self.set(field, value);
        Ok(())
    }

    pub fn remove(&mut self, field: Field) {
        self.values.remove(field.key());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInputs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Turn raw form values into a [`RenderModel`].
///
/// Numbers use `parseInt` rules; anything unparsable (or zero) becomes 0, except the base font
/// size which falls back to 18. Missing text becomes empty, a missing color becomes black.
pub fn build_model(raw: &FormInputs) -> RenderModel {
    let text = |f: Field| raw.get(f).unwrap_or_default().to_string();
    let int = |f: Field| raw.get(f).and_then(parse_int).unwrap_or(0);

    let text_color = match raw.get(Field::TextColor) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_TEXT_COLOR.to_string(),
    };
    let font_size = match int(Field::FontSize) {
        0 => DEFAULT_FONT_SIZE,
        v => v,
    };

    RenderModel {
        name: text(Field::Name),
        position: text(Field::Position),
        department: text(Field::Department),
        id_number: text(Field::IdNumber),
        name_x: int(Field::NameX),
        name_y: int(Field::NameY),
        position_x: int(Field::PositionX),
        position_y: int(Field::PositionY),
        photo_x: int(Field::PhotoX),
        photo_y: int(Field::PhotoY),
        photo_size: int(Field::PhotoSize),
        logo_x: int(Field::LogoX),
        logo_y: int(Field::LogoY),
        logo_size: int(Field::LogoSize),
        text_color,
        font_size,
    }
}

/// `parseInt(s)` with radix inference: skips leading whitespace, accepts a sign, an optional
/// `0x` prefix, then the longest digit run. Trailing junk is ignored. Saturates to `i32`.
pub fn parse_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut acc: i64 = 0;
    for c in digits[..end].chars() {
        let d = i64::from(c.to_digit(radix)?);
        acc = acc.saturating_mul(i64::from(radix)).saturating_add(d);
    }
    let v = if negative { -acc } else { acc };
    Some(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

#[cfg(test)]
#[path = "../../tests/unit/model/inputs.rs"]
mod tests;
