use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::fonts::FontSet;
use crate::foundation::core::CardSize;
use crate::foundation::error::{CarnetError, CarnetResult};

/// Font files to use instead of system discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    /// Ignored unless `regular` is set.
    pub bold: Option<PathBuf>,
}

/// Editor settings, usually read from a JSON file. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub card: CardSize,
    pub fonts: FontConfig,
    /// Default directory for exported PNGs.
    pub output_dir: Option<PathBuf>,
}

impl EditorConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> CarnetResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CarnetError::validation(format!("parse editor config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CarnetResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CarnetError::read(format!("open editor config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> CarnetResult<()> {
        self.card.validate()
    }

    /// Configured font files, or discovered system fonts when none are configured.
    ///
    /// `Ok(None)` means no usable font exists; text is then skipped.
    pub fn font_set(&self) -> CarnetResult<Option<FontSet>> {
        match &self.fonts.regular {
            Some(regular) => FontSet::from_paths(regular, self.fonts.bold.as_deref()).map(Some),
            None => Ok(FontSet::system()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/config.rs"]
mod tests;
