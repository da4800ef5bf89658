//! Scene sources: where scene documents are fetched from

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::SceneError;

/// Fetches raw scene payloads by collection and scene identifier
pub trait SceneSource {
    /// Fetch the raw JSON payload for `scene` in `collection`
    ///
    /// The payload is returned unvalidated; the world decides whether it is
    /// a usable scene description.
    fn fetch(&self, collection: &str, scene: &str) -> Result<Value, SceneError>;
}

/// Reads `<root>/<collection>/<scene>.json` from disk
#[derive(Debug, Clone)]
pub struct FileSceneSource {
    root: PathBuf,
}

impl FileSceneSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the scene tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for `scene` in `collection`
    pub fn path_for(&self, collection: &str, scene: &str) -> PathBuf {
        self.root.join(collection).join(format!("{scene}.json"))
    }
}

impl SceneSource for FileSceneSource {
    fn fetch(&self, collection: &str, scene: &str) -> Result<Value, SceneError> {
        let path = self.path_for(collection, scene);
        log::debug!("Reading scene file {}", path.display());

        let contents = std::fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SceneError::NotFound {
                    collection: collection.to_string(),
                    scene: scene.to_string(),
                }
            } else {
                SceneError::Io(err)
            }
        })?;

        serde_json::from_str(&contents)
            .map_err(|err| SceneError::Parse(format!("{}: {err}", path.display())))
    }
}

/// In-memory scene documents, keyed by collection then scene
#[derive(Debug, Clone, Default)]
pub struct MemorySceneSource {
    collections: HashMap<String, HashMap<String, Value>>,
}

impl MemorySceneSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document (builder pattern)
    pub fn with_scene(mut self, collection: &str, scene: &str, payload: Value) -> Self {
        self.insert(collection, scene, payload);
        self
    }

    /// Store or replace a document
    pub fn insert(&mut self, collection: &str, scene: &str, payload: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(scene.to_string(), payload);
    }

    /// Build a source from a bundle document `{ collection: { scene: document } }`
    pub fn from_bundle(bundle: &Value) -> Result<Self, SceneError> {
        let collections = bundle
            .as_object()
            .ok_or_else(|| SceneError::Parse("scene bundle must be a JSON object".to_string()))?;

        let mut source = Self::new();
        for (collection, scenes) in collections {
            let scenes = scenes.as_object().ok_or_else(|| {
                SceneError::Parse(format!("collection '{collection}' must be a JSON object"))
            })?;
            for (scene, payload) in scenes {
                source.insert(collection, scene, payload.clone());
            }
        }
        Ok(source)
    }
}

impl SceneSource for MemorySceneSource {
    fn fetch(&self, collection: &str, scene: &str) -> Result<Value, SceneError> {
        self.collections
            .get(collection)
            .and_then(|scenes| scenes.get(scene))
            .cloned()
            .ok_or_else(|| SceneError::NotFound {
                collection: collection.to_string(),
                scene: scene.to_string(),
            })
    }
}
