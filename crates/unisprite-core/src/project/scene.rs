use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Where the editor records the scenes open at last shutdown.
pub const LAST_SCENE_SETUP: &str = "Library/LastSceneManagerSetup.txt";

#[derive(Debug, Deserialize)]
struct SceneManagerSetup {
    #[serde(rename = "sceneSetups", default)]
    scene_setups: Vec<SceneSetup>,
}

#[derive(Debug, Deserialize)]
struct SceneSetup {
    path: String,
    #[serde(rename = "isActive", default)]
    is_active: u8,
}

/// Name (file stem) of the scene marked active in the last editor session.
pub fn last_active_scene(project_root: &Path) -> Option<String> {
    let setup_path = project_root.join(LAST_SCENE_SETUP);
    let text = match fs::read_to_string(&setup_path) {
        Ok(text) => text,
        Err(e) => {
            debug!("No scene setup at {}: {}", setup_path.display(), e);
            return None;
        }
    };
    parse_active_scene(&text).or_else(|| {
        warn!("{} lists no active scene", setup_path.display());
        None
    })
}

fn parse_active_scene(text: &str) -> Option<String> {
    let setup: SceneManagerSetup = match serde_yml::from_str(text) {
        Ok(setup) => setup,
        Err(e) => {
            warn!("Unreadable scene setup: {}", e);
            return None;
        }
    };
    setup
        .scene_setups
        .into_iter()
        .find(|scene| scene.is_active == 1)
        .and_then(|scene| {
            Path::new(&scene.path)
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)
        })
}
