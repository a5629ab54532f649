use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// fileID assigned to the single sprite of a non-sheet texture.
pub const DEFAULT_FILE_ID: &str = "21300000";

/// A `fileID`/`guid` pair as it appears in serialized scenes and prefabs.
///
/// The `Display` form is the exact text searched for and written back:
/// `fileID: <file_id>, guid: <guid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssetIdentifier {
    pub file_id: String,
    pub guid: String,
}

impl AssetIdentifier {
    pub fn new(file_id: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            guid: guid.into(),
        }
    }

    pub fn serialized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fileID: {}, guid: {}", self.file_id, self.guid)
    }
}

/// A sprite picked by the user: the texture it lives in plus its name.
///
/// Parsed from `<texture-path>` (the sprite takes the texture's file stem as
/// its name) or `<texture-path>#<sprite>` / `<texture-path>:<sprite>` for a
/// sprite cut from a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRef {
    pub texture_path: String,
    pub name: String,
}

impl SpriteRef {
    pub fn new(texture_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            texture_path: texture_path.into(),
            name: name.into(),
        }
    }

    fn standalone(texture_path: &str) -> Result<Self, Error> {
        let name = Path::new(texture_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidSpriteRef(texture_path.to_string()))?;
        Ok(Self::new(texture_path, name))
    }
}

impl FromStr for SpriteRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidSpriteRef(s.to_string()));
        }

        if let Some((path, name)) = s.rsplit_once('#') {
            if path.is_empty() || name.is_empty() {
                return Err(Error::InvalidSpriteRef(s.to_string()));
            }
            return Ok(Self::new(path, name));
        }

        // `C:\...` and `C:/...` are drive prefixes, not sprite names.
        if let Some((path, name)) = s.rsplit_once(':') {
            let is_drive = path.len() == 1;
            if !is_drive && !name.is_empty() && !name.contains(['/', '\\']) {
                return Ok(Self::new(path, name));
            }
        }

        Self::standalone(s)
    }
}

impl fmt::Display for SpriteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.texture_path, self.name)
    }
}
