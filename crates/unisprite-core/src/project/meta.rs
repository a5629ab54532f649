use crate::error::Error;
use crate::project::SpriteImporter;
use regex::Regex;
use serde_yml::Value;
use std::fs;
use std::path::Path;
use tracing::trace;

/// A parsed `.meta` companion file.
///
/// The raw text is kept alongside the YAML document: the sprite fileID
/// lookup is a text search over the file, while importer settings are read
/// from the document.
#[derive(Debug)]
pub struct MetaFile {
    path: String,
    text: String,
    doc: Value,
}

impl MetaFile {
    pub fn read(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::Meta {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&path.display().to_string(), text)
    }

    pub fn parse(path: &str, text: String) -> Result<Self, Error> {
        let doc: Value = serde_yml::from_str(&text).map_err(|e| Error::Meta {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_string(),
            text,
            doc,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The asset guid from the top-level `guid:` line.
    ///
    /// Read from the text rather than the document: an all-digit guid would
    /// otherwise come back as a YAML integer.
    pub fn guid(&self) -> Option<String> {
        let re = Regex::new(r"(?m)^guid:[ \t]*([0-9A-Za-z]+)[ \t]*\r?$").ok()?;
        re.captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Entries of `TextureImporter.spriteSheet.sprites`.
    pub fn sprite_count(&self) -> usize {
        self.texture_importer()
            .and_then(|ti| ti.get("spriteSheet"))
            .and_then(|sheet| sheet.get("sprites"))
            .and_then(Value::as_sequence)
            .map(|sprites| sprites.len())
            .unwrap_or(0)
    }

    /// Looks up `<digits>: <name>` followed by a line break, the
    /// `fileIDToRecycleName` form.
    pub fn legacy_file_id(&self, name: &str) -> Option<String> {
        let pattern = format!(r"(?m)^[ \t]*(-?[0-9]+): {}\r?\n", regex::escape(name));
        let re = Regex::new(&pattern).ok()?;
        re.captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Looks up `spriteSheet.nameFileIdTable`, which replaced
    /// `fileIDToRecycleName` in newer editor versions.
    pub fn name_table_file_id(&self, name: &str) -> Option<String> {
        let table = self
            .texture_importer()
            .and_then(|ti| ti.get("spriteSheet"))
            .and_then(|sheet| sheet.get("nameFileIdTable"))?;
        // All-digit sprite names come back as integer keys.
        let (_, id) = table
            .as_mapping()?
            .iter()
            .find(|(key, _)| scalar_string(key).as_deref() == Some(name))?;
        scalar_string(id)
    }

    fn texture_importer(&self) -> Option<&Value> {
        self.doc.get("TextureImporter")
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

impl SpriteImporter for MetaFile {
    fn is_sprite_sheet(&self) -> bool {
        self.sprite_count() != 0
    }

    fn file_id_for(&self, sprite_name: &str) -> Option<String> {
        if let Some(id) = self.legacy_file_id(sprite_name) {
            trace!("{}: '{}' found in fileIDToRecycleName", self.path, sprite_name);
            return Some(id);
        }
        let id = self.name_table_file_id(sprite_name)?;
        trace!("{}: '{}' found in nameFileIdTable", self.path, sprite_name);
        Some(id)
    }
}
