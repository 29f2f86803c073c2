use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::loader::{ImageFile, ImageLoader, LoadCompletion};
use crate::assets::slot::ImageKind;
use crate::editor::config::EditorConfig;
use crate::export::png::{export_filename, save_png};
use crate::foundation::error::{CarnetError, CarnetResult};
use crate::foundation::math::{Fnv1a64, to_base36};
use crate::model::card::RenderModel;
use crate::model::inputs::{Field, FormInputs, build_model};
use crate::render::engine::CompositingEngine;
use crate::render::surface::CardSurface;

/// Sample values written by [`Editor::load_example_data`].
pub const EXAMPLE_NAME: &str = "Juan Pérez García";
pub const EXAMPLE_POSITION: &str = "Desarrollador Senior";
pub const EXAMPLE_DEPARTMENT: &str = "Tecnología";

/// What happened to one image decode applied by [`Editor::poll`] or [`Editor::wait_for_loads`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded {
        kind: ImageKind,
        file_name: String,
    },
    /// The slot kept its previous content.
    Failed {
        kind: ImageKind,
        file_name: String,
        error: CarnetError,
    },
}

impl LoadOutcome {
    pub fn kind(&self) -> ImageKind {
        match self {
            LoadOutcome::Loaded { kind, .. } | LoadOutcome::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// One card being edited: form values, image slots, and the surface they render to.
///
/// Every mutation re-renders synchronously, so [`Editor::surface`] always reflects the current
/// inputs and whichever images have finished decoding.
pub struct Editor {
    config: EditorConfig,
    inputs: FormInputs,
    model: RenderModel,
    surface: CardSurface,
    engine: CompositingEngine,
    loader: ImageLoader,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("in_flight", &self.loader.in_flight())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Construct an editor with layout-default inputs and render once.
    pub fn new(config: EditorConfig) -> CarnetResult<Self> {
        config.validate()?;
        let surface = CardSurface::new(config.card)?;
        let fonts = config.font_set()?;
        let engine = CompositingEngine::new(fonts.as_ref())?;
        let inputs = FormInputs::layout_defaults();
        let model = build_model(&inputs);

        let mut editor = Self {
            config,
            inputs,
            model,
            surface,
            engine,
            loader: ImageLoader::new(),
        };
        editor.render();
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    pub fn surface(&self) -> &CardSurface {
        &self.surface
    }

    pub fn engine(&self) -> &CompositingEngine {
        &self.engine
    }

    /// Decodes dispatched and not yet applied.
    pub fn pending_loads(&self) -> usize {
        self.loader.in_flight()
    }

    /// Rebuild the model from the current inputs and repaint.
    pub fn render(&mut self) {
        self.model = build_model(&self.inputs);
        self.engine.render(&mut self.surface, &self.model);
    }

    /// Set one form field by name and re-render. Unknown names are rejected.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> CarnetResult<()> {
        self.inputs.set_key(key, value)?;
        self.render();
        Ok(())
    }

    /// Replace every form value at once and re-render.
    pub fn set_inputs(&mut self, inputs: FormInputs) {
        self.inputs = inputs;
        self.render();
    }

    /// Read `path` and dispatch an asynchronous decode into the `kind` slot.
    ///
    /// Read failures and non-image files are returned immediately and leave the slot untouched.
    pub fn load_image(&mut self, kind: ImageKind, path: impl AsRef<Path>) -> CarnetResult<()> {
        let file = ImageFile::from_path(path)?;
        self.load_file(kind, file)
    }

    pub fn load_file(&mut self, kind: ImageKind, file: ImageFile) -> CarnetResult<()> {
        let name = file.name.clone();
        self.loader.load(kind, file).inspect_err(|e| {
            tracing::warn!(%kind, file = %name, error = %e, "image rejected");
        })?;
        self.engine.slots_mut().get_mut(kind).begin_load();
        Ok(())
    }

    /// Apply every decode that has already finished, without blocking.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut out = Vec::new();
        while let Some(c) = self.loader.try_completion() {
            out.push(self.apply(c));
        }
        out
    }

    /// Block until every dispatched decode has finished, applying each as it arrives.
    pub fn wait_for_loads(&mut self) -> Vec<LoadOutcome> {
        let mut out = Vec::new();
        while let Some(c) = self.loader.wait_completion() {
            out.push(self.apply(c));
        }
        out
    }

    fn apply(&mut self, c: LoadCompletion) -> LoadOutcome {
        let LoadCompletion {
            kind,
            file_name,
            result,
        } = c;
        let slot = self.engine.slots_mut().get_mut(kind);
        match result {
            Ok(img) => {
                tracing::info!(%kind, file = %file_name, w = img.width, h = img.height, "image loaded");
                slot.finish_ok(img);
                self.render();
                LoadOutcome::Loaded { kind, file_name }
            }
            Err(error) => {
                tracing::warn!(%kind, file = %file_name, error = %error, "image decode failed");
                if slot.finish_err() {
                    self.render();
                }
                LoadOutcome::Failed {
                    kind,
                    file_name,
                    error,
                }
            }
        }
    }

    /// Restore the layout defaults, drop all images, and re-render.
    ///
    /// Decodes still in flight are abandoned and never reach the slots.
    pub fn reset(&mut self) {
        self.loader = ImageLoader::new();
        self.engine.clear_images();
        self.inputs = FormInputs::layout_defaults();
        self.render();
        tracing::info!("editor reset");
    }

    /// Fill the text fields with a sample person and a fresh unique ID, then re-render.
    pub fn load_example_data(&mut self) {
        self.inputs.set(Field::Name, EXAMPLE_NAME);
        self.inputs.set(Field::Position, EXAMPLE_POSITION);
        self.inputs.set(Field::Department, EXAMPLE_DEPARTMENT);
        self.inputs.set(Field::IdNumber, generate_unique_id());
        self.render();
    }

    /// File name the current card exports to.
    pub fn export_filename(&self) -> String {
        export_filename(&self.model.name)
    }

    /// Write the current surface as PNG into `dir` (or the configured output directory).
    pub fn export(&self, dir: Option<&Path>) -> CarnetResult<PathBuf> {
        let dir = dir
            .or(self.config.output_dir.as_deref())
            .unwrap_or_else(|| Path::new("."));
        save_png(&self.surface, dir, &self.export_filename())
    }
}

/// `ID-<base36 millis><5 uppercase base36 chars>`.
pub fn generate_unique_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let millis = u64::try_from(now.as_millis()).unwrap_or(u64::MAX);

    let mut h = Fnv1a64::new_default();
    h.write_u64(u64::from(now.subsec_nanos()));
    h.write_u64(COUNTER.fetch_add(1, Ordering::Relaxed));
    h.write_u64(u64::from(std::process::id()));
    // 36^5 keeps the suffix at five digits after zero padding.
    let suffix = to_base36(h.finish() % 36u64.pow(5)).to_uppercase();

    format!("ID-{}{suffix:0>5}", to_base36(millis))
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
