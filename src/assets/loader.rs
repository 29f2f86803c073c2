use std::path::Path;
use std::sync::mpsc;

use crate::assets::decode::{DecodedImage, decode_for_mime, mime_for_path};
use crate::assets::slot::ImageKind;
use crate::foundation::error::{CarnetError, CarnetResult};

/// A user-selected file: display name, MIME type and raw bytes.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read `path` and derive the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> CarnetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CarnetError::read(format!("failed to read file '{}': {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_for_path(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime.to_ascii_lowercase().starts_with("image/")
    }
}

/// Completion message for one dispatched decode.
#[derive(Debug)]
pub struct LoadCompletion {
    pub kind: ImageKind,
    pub file_name: String,
    pub result: CarnetResult<DecodedImage>,
}

/// Decodes image files off the calling thread and reports completions over a channel.
///
/// The loader never touches image slots itself; the owner applies each [`LoadCompletion`] to
/// its slot and re-renders.
pub struct ImageLoader {
    tx: mpsc::Sender<LoadCompletion>,
    rx: mpsc::Receiver<LoadCompletion>,
    in_flight: usize,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Dispatch an asynchronous decode of `file` for the `kind` slot.
    ///
    /// Non-image MIME types are rejected before anything is dispatched.
    pub fn load(&mut self, kind: ImageKind, file: ImageFile) -> CarnetResult<()> {
        if !file.is_image() {
            return Err(CarnetError::invalid_file_type(format!(
                "'{}' has MIME type '{}', expected image/*",
                file.name, file.mime
            )));
        }

        let tx = self.tx.clone();
        std::thread::Builder::new()
            .name(format!("carnet-decode-{kind}"))
            .spawn(move || {
                let ImageFile { name, mime, bytes } = file;
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    decode_for_mime(&bytes, &mime)
                }))
                .unwrap_or_else(|_| Err(CarnetError::decode("image decoder panicked")));
                let _ = tx.send(LoadCompletion {
                    kind,
                    file_name: name,
                    result,
                });
            })
            .map_err(|e| CarnetError::Other(anyhow::anyhow!("spawn decode thread: {e}")))?;

        self.in_flight += 1;
        tracing::debug!(%kind, in_flight = self.in_flight, "dispatched image decode");
        Ok(())
    }

    /// Number of decodes dispatched but not yet received.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Non-blocking: next finished decode, if any.
    pub fn try_completion(&mut self) -> Option<LoadCompletion> {
        let msg = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(msg)
    }

    /// Blocking: wait for the next finished decode. Returns `None` when nothing is in flight.
    pub fn wait_completion(&mut self) -> Option<LoadCompletion> {
        if self.in_flight == 0 {
            return None;
        }
        let msg = self.rx.recv().ok()?;
        self.in_flight -= 1;
        Some(msg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
