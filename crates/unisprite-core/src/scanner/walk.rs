use glob::Pattern;
use std::io;
use std::path::Path;
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

/// Lists every asset under `asset_roots` (relative to `project_root`) as a
/// project-relative, `/`-separated path such as `Assets/Scenes/Main.unity`.
///
/// `.meta` companions and folders the editor never imports (dot-prefixed or
/// `~`-suffixed) are left out. Symlinked files and folders are followed and
/// reported under their link path. Entries are visited in file-name order so runs
/// over the same tree report paths in the same order.
pub fn collect_asset_paths(
    project_root: &Path,
    asset_roots: &[&str],
    ignore_globs: &[&str],
) -> io::Result<Vec<String>> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut paths = Vec::new();
    for asset_root in asset_roots {
        let dir = project_root.join(asset_root);
        if !dir.is_dir() {
            warn!("Asset root {} does not exist, skipping", dir.display());
            continue;
        }
        visit_root(project_root, &dir, &ignore_patterns, &mut paths)?;
    }

    debug!("Collected {} asset paths", paths.len());
    Ok(paths)
}

fn visit_root(
    project_root: &Path,
    dir: &Path,
    ignore_patterns: &[Pattern],
    paths: &mut Vec<String>,
) -> io::Result<()> {
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_from_import(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.loop_ancestor().is_some() {
                    warn!("Skipping symlink loop: {}", err);
                    continue;
                }
                let broken_link = err
                    .io_error()
                    .map(|e| e.kind() == io::ErrorKind::NotFound)
                    .unwrap_or(false);
                if broken_link {
                    warn!("Skipping dangling link: {}", err);
                    continue;
                }
                let denied = err
                    .io_error()
                    .map(|e| e.kind() == io::ErrorKind::PermissionDenied)
                    .unwrap_or(false);
                if denied {
                    error!("Access denied while walking {}: {}", dir.display(), err);
                    continue;
                }
                return Err(io::Error::from(err));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().map(|ext| ext == "meta").unwrap_or(false) {
            continue;
        }

        let relative = to_asset_path(project_root, path);
        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches(&relative))
        {
            continue;
        }

        paths.push(relative);
    }

    Ok(())
}

fn is_hidden_from_import(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name.ends_with('~'))
        .unwrap_or(false)
}

/// Converts an on-disk path to the project-relative form used in reports.
pub fn to_asset_path(project_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(project_root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
