use std::{
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};

use crate::{
    foundation::error::{MarqueeError, MarqueeResult},
    render::texture::{ImageTexture, Texture},
};

/// Reference to streamed media the host plays back itself.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaRef {
    pub source: String,
    #[serde(default)]
    pub duration_ms: Option<f64>,
}

#[derive(Clone, Debug)]
pub enum Resource {
    Image(Rc<dyn Texture>),
    Audio(MediaRef),
    Video(MediaRef),
    Text(String),
    Json(serde_json::Value),
}

/// Keyed store of loaded resources owned by the engine.
#[derive(Clone, Debug, Default)]
pub struct ResourceDatabase {
    entries: BTreeMap<String, Resource>,
}

impl ResourceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.entries.get(key)
    }

    pub fn image(&self, key: &str) -> Option<Rc<dyn Texture>> {
        match self.entries.get(key)? {
            Resource::Image(texture) => Some(Rc::clone(texture)),
            _ => None,
        }
    }

    pub fn audio(&self, key: &str) -> Option<&MediaRef> {
        match self.entries.get(key)? {
            Resource::Audio(media) => Some(media),
            _ => None,
        }
    }

    pub fn video(&self, key: &str) -> Option<&MediaRef> {
        match self.entries.get(key)? {
            Resource::Video(media) => Some(media),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Resource::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn json(&self, key: &str) -> Option<&serde_json::Value> {
        match self.entries.get(key)? {
            Resource::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace; returns the previous entry.
    pub fn add(&mut self, key: impl Into<String>, resource: Resource) -> Option<Resource> {
        self.entries.insert(key.into(), resource)
    }

    pub fn remove(&mut self, key: &str) -> Option<Resource> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

/// Result of one loader poll.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadPoll {
    /// `progress` is in `[0, 1]`.
    Pending { progress: f64 },
    Done,
    Failed(String),
}

/// Incremental loader driven by [`crate::Engine::pump_loading`].
pub trait ResourceLoader {
    fn poll(&mut self, db: &mut ResourceDatabase) -> LoadPoll;
}

/// One entry of a resource manifest.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManifestEntry {
    /// Image the drawing surface knows under `key`.
    Image { key: String, width: f64, height: f64 },
    Audio {
        key: String,
        source: String,
        #[serde(default)]
        duration_ms: Option<f64>,
    },
    Video {
        key: String,
        source: String,
        #[serde(default)]
        duration_ms: Option<f64>,
    },
    Text { key: String, text: String },
    Json { key: String, value: serde_json::Value },
}

impl ManifestEntry {
    pub fn key(&self) -> &str {
        match self {
            Self::Image { key, .. }
            | Self::Audio { key, .. }
            | Self::Video { key, .. }
            | Self::Text { key, .. }
            | Self::Json { key, .. } => key,
        }
    }

    fn into_resource(self) -> MarqueeResult<(String, Resource)> {
        if self.key().trim().is_empty() {
            return Err(MarqueeError::resource("resource key must be non-empty"));
        }
        Ok(match self {
            Self::Image { key, width, height } => {
                if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                    return Err(MarqueeError::resource(format!(
                        "image '{key}' must have a positive size"
                    )));
                }
                let texture = ImageTexture::new(key.as_str(), width, height);
                (key, Resource::Image(Rc::new(texture)))
            }
            Self::Audio {
                key,
                source,
                duration_ms,
            } => (key, Resource::Audio(MediaRef { source, duration_ms })),
            Self::Video {
                key,
                source,
                duration_ms,
            } => (key, Resource::Video(MediaRef { source, duration_ms })),
            Self::Text { key, text } => (key, Resource::Text(text)),
            Self::Json { key, value } => (key, Resource::Json(value)),
        })
    }
}

/// Loader that inserts one manifest entry per poll.
#[derive(Clone, Debug, Default)]
pub struct ManifestLoader {
    pending: VecDeque<ManifestEntry>,
    total: usize,
}

impl ManifestLoader {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            total: entries.len(),
            pending: entries.into(),
        }
    }

    /// Loader with nothing to load; finishes on the first poll.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> MarqueeResult<Self> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(json)
            .map_err(|err| MarqueeError::serde(format!("manifest: {err}")))?;
        Ok(Self::new(entries))
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl ResourceLoader for ManifestLoader {
    fn poll(&mut self, db: &mut ResourceDatabase) -> LoadPoll {
        let Some(entry) = self.pending.pop_front() else {
            return LoadPoll::Done;
        };
        match entry.into_resource() {
            Ok((key, resource)) => {
                tracing::trace!(key = %key, "loaded resource");
                db.add(key, resource);
            }
            Err(err) => return LoadPoll::Failed(err.to_string()),
        }
        if self.pending.is_empty() {
            LoadPoll::Done
        } else {
            let loaded = self.total - self.pending.len();
            LoadPoll::Pending {
                progress: loaded as f64 / self.total as f64,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/resource.rs"]
mod tests;
