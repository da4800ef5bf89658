//! Scene bundler
//!
//! Collects every `<root>/<collection>/<scene>.json` into one document
//! `{ collection: { scene: document } }`, validating each scene on the way.

use std::path::Path;

use serde_json::{Map, Value};

use scene_engine::scene::{scene_label, SceneDescription, SceneError};

use crate::error::AppError;

/// Build the bundle document for the scene tree under `root`
pub fn bundle(root: &Path) -> Result<Value, AppError> {
    let mut collections = Map::new();

    for collection_dir in sorted_entries(root)? {
        if !collection_dir.is_dir() {
            continue;
        }
        let Some(collection) = file_stem(&collection_dir) else {
            continue;
        };

        let mut scenes = Map::new();
        for scene_path in sorted_entries(&collection_dir)? {
            if scene_path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(scene) = file_stem(&scene_path) else {
                continue;
            };

            let label = scene_label(&collection, &scene);
            let contents = std::fs::read_to_string(&scene_path)?;
            let document: Value = serde_json::from_str(&contents)
                .map_err(|err| SceneError::Parse(format!("{label}: {err}")))?;
            SceneDescription::from_value(&document, &label)?;

            log::debug!("Bundled scene '{label}'");
            scenes.insert(scene, document);
        }

        if !scenes.is_empty() {
            collections.insert(collection, Value::Object(scenes));
        }
    }

    Ok(Value::Object(collections))
}

/// Bundle `root` and write the result to `out`, returning the scene count
pub fn write_bundle(root: &Path, out: &Path) -> Result<usize, AppError> {
    let document = bundle(root)?;
    let count = document
        .as_object()
        .map_or(0, |collections| {
            collections
                .values()
                .filter_map(Value::as_object)
                .map(Map::len)
                .sum()
        });

    std::fs::write(out, serde_json::to_string_pretty(&document)?)?;
    log::info!("Wrote {count} scenes to {}", out.display());
    Ok(count)
}

fn sorted_entries(dir: &Path) -> Result<Vec<std::path::PathBuf>, AppError> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::scene::MemorySceneSource;
    use scene_engine::scene::SceneSource;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_bundle_collects_scene_tree() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main/index.json", r#"{ "entities": { "A": {} } }"#);
        write(dir.path(), "main/notes.txt", "ignored");
        write(dir.path(), "levels/one.json", r#"{ "entities": {} }"#);

        let document = bundle(dir.path()).unwrap();
        let source = MemorySceneSource::from_bundle(&document).unwrap();

        assert!(source.fetch("main", "index").unwrap()["entities"]["A"].is_object());
        assert!(source.fetch("levels", "one").is_ok());
        assert!(source.fetch("main", "notes").is_err());
    }

    #[test]
    fn test_invalid_scene_fails_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main/bad.json", r#"{ "foo": 1 }"#);

        assert!(matches!(
            bundle(dir.path()),
            Err(AppError::Scene(SceneError::Schema(_)))
        ));
    }

    #[test]
    fn test_write_bundle_counts_scenes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main/a.json", r#"{ "entities": {} }"#);
        write(dir.path(), "main/b.json", r#"{ "entities": {} }"#);
        let out = dir.path().join("bundle.json");

        assert_eq!(write_bundle(dir.path(), &out).unwrap(), 2);
        let written: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert!(written["main"]["b"].is_object());
    }
}
