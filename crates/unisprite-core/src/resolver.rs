use crate::error::Error;
use crate::identifier::{AssetIdentifier, SpriteRef, DEFAULT_FILE_ID};
use crate::project::AssetDatabase;
use tracing::{debug, error};

/// Computes the `fileID`/`guid` pair scenes use to reference `sprite`.
///
/// A texture imported as a single sprite always uses the default fileID.
/// A sheet's sprites are looked up by name in the texture's `.meta`.
pub fn resolve(assets: &dyn AssetDatabase, sprite: &SpriteRef) -> Result<AssetIdentifier, Error> {
    let guid = assets.guid_for_path(&sprite.texture_path)?;
    let importer = assets.importer_for_path(&sprite.texture_path)?;

    if !importer.is_sprite_sheet() {
        debug!("{} is a single sprite, using default fileID", sprite.texture_path);
        return Ok(AssetIdentifier::new(DEFAULT_FILE_ID, guid));
    }

    match importer.file_id_for(&sprite.name) {
        Some(file_id) => {
            debug!("{} resolved to fileID {}", sprite, file_id);
            Ok(AssetIdentifier::new(file_id, guid))
        }
        None => {
            let meta_path = format!("{}.meta", sprite.texture_path);
            error!("fileID for '{}' not found in {}", sprite.name, meta_path);
            Err(Error::FileIdNotFound {
                sprite: sprite.name.clone(),
                meta_path,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::SpriteImporter;
    use std::collections::HashMap;
    use std::path::Path;

    struct FakeImporter {
        ids: HashMap<String, String>,
    }

    impl SpriteImporter for FakeImporter {
        fn is_sprite_sheet(&self) -> bool {
            !self.ids.is_empty()
        }

        fn file_id_for(&self, sprite_name: &str) -> Option<String> {
            self.ids.get(sprite_name).cloned()
        }
    }

    struct FakeAssets {
        sheet: HashMap<String, String>,
    }

    impl AssetDatabase for FakeAssets {
        fn all_asset_paths(&self) -> Result<Vec<String>, Error> {
            Ok(Vec::new())
        }

        fn guid_for_path(&self, _asset_path: &str) -> Result<String, Error> {
            Ok("abc123".to_string())
        }

        fn importer_for_path(&self, _asset_path: &str) -> Result<Box<dyn SpriteImporter>, Error> {
            Ok(Box::new(FakeImporter {
                ids: self.sheet.clone(),
            }))
        }

        fn root(&self) -> &Path {
            Path::new(".")
        }
    }

    #[test]
    fn test_single_sprite_uses_default_file_id() {
        let assets = FakeAssets {
            sheet: HashMap::new(),
        };
        let id = resolve(&assets, &SpriteRef::new("Assets/a.png", "a")).unwrap();
        assert_eq!(id, AssetIdentifier::new("21300000", "abc123"));
    }

    #[test]
    fn test_sheet_sprite_uses_table_entry() {
        let assets = FakeAssets {
            sheet: HashMap::from([("spriteName".to_string(), "42".to_string())]),
        };
        let id = resolve(&assets, &SpriteRef::new("Assets/s.png", "spriteName")).unwrap();
        assert_eq!(id, AssetIdentifier::new("42", "abc123"));
    }

    #[test]
    fn test_unknown_sheet_sprite_fails() {
        let assets = FakeAssets {
            sheet: HashMap::from([("other".to_string(), "42".to_string())]),
        };
        let err = resolve(&assets, &SpriteRef::new("Assets/s.png", "missing")).unwrap_err();
        match err {
            Error::FileIdNotFound { sprite, meta_path } => {
                assert_eq!(sprite, "missing");
                assert_eq!(meta_path, "Assets/s.png.meta");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
