use crate::assets::decode::DecodedImage;

/// Which of the three card images a slot or load request refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// Background template, stretched to the whole card.
    Template,
    /// Profile photo, clipped to a circle.
    Photo,
    /// Corporate logo, drawn as a square.
    Logo,
}

impl ImageKind {
    pub const ALL: [ImageKind; 3] = [ImageKind::Template, ImageKind::Photo, ImageKind::Logo];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Template => "template",
            ImageKind::Photo => "photo",
            ImageKind::Logo => "logo",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one image resource.
///
/// Only `Ready` is drawable; a slot mid-decode renders exactly like an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageSlot {
    #[default]
    Empty,
    /// At least one decode is in flight. `previous` is restored if every pending decode fails.
    Loading {
        previous: Option<DecodedImage>,
        pending: u32,
    },
    Ready(DecodedImage),
}

impl ImageSlot {
    /// Readiness check used at every draw site.
    pub fn ready(&self) -> Option<&DecodedImage> {
        match self {
            ImageSlot::Ready(img) => Some(img),
            ImageSlot::Empty | ImageSlot::Loading { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ImageSlot::Loading { .. })
    }

    /// A decode was dispatched for this slot.
    pub fn begin_load(&mut self) {
        *self = match std::mem::take(self) {
            ImageSlot::Empty => ImageSlot::Loading {
                previous: None,
                pending: 1,
            },
            ImageSlot::Ready(img) => ImageSlot::Loading {
                previous: Some(img),
                pending: 1,
            },
            ImageSlot::Loading { previous, pending } => ImageSlot::Loading {
                previous,
                pending: pending.saturating_add(1),
            },
        };
    }

    /// A decode finished successfully: replace the resource wholesale.
    ///
    /// Decodes still in flight may overwrite it again; whichever completes last wins.
    pub fn finish_ok(&mut self, img: DecodedImage) {
        *self = ImageSlot::Ready(img);
    }

    /// A decode failed: keep whatever was there before.
    ///
    /// Returns `true` when the slot went back to a drawable image.
    pub fn finish_err(&mut self) -> bool {
        *self = match std::mem::take(self) {
            ImageSlot::Loading { previous, pending } if pending > 1 => ImageSlot::Loading {
                previous,
                pending: pending - 1,
            },
            ImageSlot::Loading {
                previous: Some(img),
                ..
            } => ImageSlot::Ready(img),
            ImageSlot::Loading { previous: None, .. } => ImageSlot::Empty,
            other => other,
        };
        self.ready().is_some()
    }
}

/// The three image resources owned by the compositing engine.
#[derive(Clone, Debug, Default)]
pub struct ImageSlots {
    pub template: ImageSlot,
    pub photo: ImageSlot,
    pub logo: ImageSlot,
}

impl ImageSlots {
    pub fn get(&self, kind: ImageKind) -> &ImageSlot {
        match kind {
            ImageKind::Template => &self.template,
            ImageKind::Photo => &self.photo,
            ImageKind::Logo => &self.logo,
        }
    }

    pub fn get_mut(&mut self, kind: ImageKind) -> &mut ImageSlot {
        match kind {
            ImageKind::Template => &mut self.template,
            ImageKind::Photo => &mut self.photo,
            ImageKind::Logo => &mut self.logo,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slot.rs"]
mod tests;
