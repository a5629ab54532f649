use crate::error::Error;
use crate::identifier::AssetIdentifier;
use crate::progress::ProgressReporter;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Rewrites every candidate whose text contains `before` so that it
/// references `after` instead, returning the rewritten paths in the order
/// they were encountered.
///
/// `paths` are resolved against `root`. Only paths whose extension is in
/// `extensions` (lowercase, with leading dot) are opened. Files are rewritten
/// one at a time as they are found: an I/O error ends the run and leaves the
/// files already rewritten in their new state.
pub fn replace_all(
    root: &Path,
    paths: &[String],
    before: &AssetIdentifier,
    after: &AssetIdentifier,
    extensions: &[String],
    reporter: &dyn ProgressReporter,
) -> Result<Vec<String>, Error> {
    let needle = before.serialized();
    let replacement = after.serialized();
    let total = paths.len();
    let start = Instant::now();

    reporter.on_replace_start(total);
    let mut modified = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        reporter.on_file_progress(index + 1, total, path);

        if !has_extension(path, extensions) {
            continue;
        }

        if replace_file(&root.join(path), &needle, &replacement)? {
            debug!("Rewrote {}", path);
            reporter.on_file_rewritten(path);
            modified.push(path.clone());
        }
    }

    let duration = start.elapsed();
    reporter.on_replace_complete(modified.len(), duration.as_secs_f64());
    info!(
        "Rewrote {} of {} candidates in {:.2}s",
        modified.len(),
        total,
        duration.as_secs_f64()
    );

    Ok(modified)
}

/// Replaces every occurrence of `needle` in the file at `path`.
/// Returns false, without writing, when there is none.
///
/// Works on raw bytes: files that are not valid UTF-8 are searched like any
/// other, and bytes outside the matches are written back unchanged.
fn replace_file(path: &Path, needle: &str, replacement: &str) -> Result<bool, Error> {
    let input = fs::read(path)?;
    match replace_bytes(&input, needle.as_bytes(), replacement.as_bytes()) {
        Some(output) => {
            fs::write(path, output)?;
            Ok(true)
        }
        None => {
            trace!("No reference in {}", path.display());
            Ok(false)
        }
    }
}

/// Byte-level replace-all. `None` when `needle` does not occur.
fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Option<Vec<u8>> {
    if needle.is_empty() {
        return None;
    }
    let mut output: Option<Vec<u8>> = None;
    let mut copied = 0;
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if &haystack[pos..pos + needle.len()] == needle {
            let out = output.get_or_insert_with(|| Vec::with_capacity(haystack.len()));
            out.extend_from_slice(&haystack[copied..pos]);
            out.extend_from_slice(replacement);
            pos += needle.len();
            copied = pos;
        } else {
            pos += 1;
        }
    }
    let mut out = output?;
    out.extend_from_slice(&haystack[copied..]);
    Some(out)
}

fn has_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let dotted = format!(".{}", ext.to_ascii_lowercase());
            extensions.iter().any(|e| *e == dotted)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use std::cell::RefCell;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        vec![".prefab".to_string(), ".unity".to_string()]
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("Assets/Main.unity", &exts()));
        assert!(has_extension("Assets/Button.PREFAB", &exts()));
        assert!(!has_extension("Assets/Main.unity.meta", &exts()));
        assert!(!has_extension("Assets/Material.mat", &exts()));
        assert!(!has_extension("Assets/README", &exts()));
    }

    #[test]
    fn test_replace_bytes() {
        assert_eq!(replace_bytes(b"a-xx-b-xx", b"xx", b"y"), Some(b"a-y-b-y".to_vec()));
        assert_eq!(replace_bytes(b"xxx", b"xx", b"y"), Some(b"yx".to_vec()));
        assert_eq!(replace_bytes(b"abc", b"xx", b"y"), None);
        assert_eq!(replace_bytes(b"x", b"xx", b"y"), None);
    }

    #[test]
    fn test_non_utf8_file_does_not_stop_the_run() {
        let tmp = tempdir().unwrap();
        let binary = [0x55u8, 0x6e, 0xff, 0xfe, 0, 1];
        fs::write(tmp.path().join("A.unity"), "fileID: 100, guid: abc123").unwrap();
        fs::write(tmp.path().join("B.unity"), binary).unwrap();
        fs::write(tmp.path().join("C.unity"), "fileID: 100, guid: abc123").unwrap();

        let mut mixed = vec![0xffu8, 0xfe, b'\n'];
        mixed.extend_from_slice(b"fileID: 100, guid: abc123");
        mixed.extend_from_slice(&[0x80, 0x00]);
        fs::write(tmp.path().join("D.prefab"), &mixed).unwrap();

        let modified = replace_all(
            tmp.path(),
            &[
                "A.unity".to_string(),
                "B.unity".to_string(),
                "C.unity".to_string(),
                "D.prefab".to_string(),
            ],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &SilentReporter,
        )
        .unwrap();

        assert_eq!(
            modified,
            vec!["A.unity".to_string(), "C.unity".to_string(), "D.prefab".to_string()]
        );
        assert_eq!(fs::read(tmp.path().join("B.unity")).unwrap(), binary.to_vec());
        assert_eq!(
            fs::read_to_string(tmp.path().join("C.unity")).unwrap(),
            "fileID: 200, guid: def456"
        );

        let mut expected = vec![0xffu8, 0xfe, b'\n'];
        expected.extend_from_slice(b"fileID: 200, guid: def456");
        expected.extend_from_slice(&[0x80, 0x00]);
        assert_eq!(fs::read(tmp.path().join("D.prefab")).unwrap(), expected);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let tmp = tempdir().unwrap();
        let text = "m_Sprite: {fileID: 100, guid: abc123, type: 3}\n\
                    m_Sprite: {fileID: 100, guid: abc123, type: 3}\n\
                    m_Material: {fileID: 10754, guid: 0000000000000000f000000000000000, type: 0}\n";
        fs::write(tmp.path().join("Main.unity"), text).unwrap();

        let modified = replace_all(
            tmp.path(),
            &["Main.unity".to_string()],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &SilentReporter,
        )
        .unwrap();

        assert_eq!(modified, vec!["Main.unity".to_string()]);
        let rewritten = fs::read_to_string(tmp.path().join("Main.unity")).unwrap();
        assert_eq!(rewritten.matches("fileID: 200, guid: def456").count(), 2);
        assert!(!rewritten.contains("fileID: 100, guid: abc123"));
        assert!(rewritten.contains("fileID: 10754, guid: 0000000000000000f000000000000000"));
    }

    #[test]
    fn test_longer_file_id_is_not_a_match() {
        let tmp = tempdir().unwrap();
        let text = "m_Sprite: {fileID: 1000, guid: abc123, type: 3}\n";
        fs::write(tmp.path().join("Main.unity"), text).unwrap();

        let modified = replace_all(
            tmp.path(),
            &["Main.unity".to_string()],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &SilentReporter,
        )
        .unwrap();

        assert!(modified.is_empty());
        assert_eq!(fs::read_to_string(tmp.path().join("Main.unity")).unwrap(), text);
    }

    #[test]
    fn test_unlisted_extension_is_not_opened() {
        let tmp = tempdir().unwrap();
        // A directory named like a file: opening it would fail the run.
        fs::create_dir(tmp.path().join("Trap.asset")).unwrap();

        let modified = replace_all(
            tmp.path(),
            &["Trap.asset".to_string()],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &SilentReporter,
        )
        .unwrap();
        assert!(modified.is_empty());
    }

    #[test]
    fn test_missing_file_aborts_after_earlier_writes() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("A.unity"), "fileID: 100, guid: abc123").unwrap();

        let result = replace_all(
            tmp.path(),
            &["A.unity".to_string(), "Missing.unity".to_string()],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &SilentReporter,
        );

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(
            fs::read_to_string(tmp.path().join("A.unity")).unwrap(),
            "fileID: 200, guid: def456"
        );
    }

    #[derive(Default)]
    struct RecordingReporter {
        progress: RefCell<Vec<(usize, usize)>>,
        rewritten: RefCell<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn on_file_progress(&self, index: usize, total: usize, _path: &str) {
            self.progress.borrow_mut().push((index, total));
        }

        fn on_file_rewritten(&self, path: &str) {
            self.rewritten.borrow_mut().push(path.to_string());
        }
    }

    #[test]
    fn test_reports_every_candidate() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("A.prefab"), "fileID: 100, guid: abc123").unwrap();
        fs::write(tmp.path().join("B.prefab"), "nothing here").unwrap();
        fs::write(tmp.path().join("c.png"), "").unwrap();

        let reporter = RecordingReporter::default();
        replace_all(
            tmp.path(),
            &[
                "A.prefab".to_string(),
                "B.prefab".to_string(),
                "c.png".to_string(),
            ],
            &AssetIdentifier::new("100", "abc123"),
            &AssetIdentifier::new("200", "def456"),
            &exts(),
            &reporter,
        )
        .unwrap();

        assert_eq!(*reporter.progress.borrow(), vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(*reporter.rewritten.borrow(), vec!["A.prefab".to_string()]);
    }
}
