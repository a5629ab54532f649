//! Project-side capabilities: asset enumeration, guid lookup, importer
//! introspection and the active scene, backed by a Unity project on disk.

pub mod meta;
pub mod scene;

pub use meta::MetaFile;

use crate::config::AppConfig;
use crate::error::Error;
use crate::scanner;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Importer settings of a texture, as far as sprite addressing goes.
pub trait SpriteImporter {
    /// True when the texture is cut into multiple named sprites.
    fn is_sprite_sheet(&self) -> bool;

    /// fileID of the named sprite within the sheet.
    fn file_id_for(&self, sprite_name: &str) -> Option<String>;
}

pub trait AssetDatabase {
    /// Every candidate asset path, project-relative.
    fn all_asset_paths(&self) -> Result<Vec<String>, Error>;

    fn guid_for_path(&self, asset_path: &str) -> Result<String, Error>;

    fn importer_for_path(&self, asset_path: &str) -> Result<Box<dyn SpriteImporter>, Error>;

    /// Directory asset paths are relative to.
    fn root(&self) -> &Path;
}

pub trait SceneAccessor {
    fn active_scene_name(&self) -> Option<String>;
}

/// A Unity project directory.
pub struct ProjectAssets {
    root: PathBuf,
    asset_roots: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl ProjectAssets {
    pub fn open(config: &AppConfig) -> Result<Self, Error> {
        let root = PathBuf::from(&config.project_root);
        if !root.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Project root {} is not a directory", root.display()),
            )));
        }
        debug!("Opened project at {}", root.display());
        Ok(Self {
            root,
            asset_roots: config.asset_roots.clone(),
            ignore_patterns: config.ignore_patterns.clone(),
        })
    }

    /// Where `asset_path` lives on disk.
    pub fn absolute(&self, asset_path: &str) -> PathBuf {
        let path = Path::new(asset_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn meta_for(&self, asset_path: &str) -> Result<MetaFile, Error> {
        let mut meta_path = self.absolute(asset_path).into_os_string();
        meta_path.push(".meta");
        MetaFile::read(Path::new(&meta_path))
    }
}

impl AssetDatabase for ProjectAssets {
    fn all_asset_paths(&self) -> Result<Vec<String>, Error> {
        let roots: Vec<&str> = self.asset_roots.iter().map(|s| s.as_str()).collect();
        let ignores: Vec<&str> = self.ignore_patterns.iter().map(|s| s.as_str()).collect();
        Ok(scanner::collect_asset_paths(&self.root, &roots, &ignores)?)
    }

    fn guid_for_path(&self, asset_path: &str) -> Result<String, Error> {
        self.meta_for(asset_path)?
            .guid()
            .ok_or_else(|| Error::GuidNotFound(asset_path.to_string()))
    }

    fn importer_for_path(&self, asset_path: &str) -> Result<Box<dyn SpriteImporter>, Error> {
        Ok(Box::new(self.meta_for(asset_path)?))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

impl SceneAccessor for ProjectAssets {
    fn active_scene_name(&self) -> Option<String> {
        scene::last_active_scene(&self.root)
    }
}
