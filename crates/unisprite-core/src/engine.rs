use crate::config::AppConfig;
use crate::error::Error;
use crate::identifier::{AssetIdentifier, SpriteRef};
use crate::progress::ProgressReporter;
use crate::project::{AssetDatabase, ProjectAssets, SceneAccessor};
use crate::replacer;
use crate::resolver;
use crate::scope::Scope;
use serde::Serialize;
use tracing::{error, info};

/// The two sprites picked for a run. Either may still be unset.
#[derive(Debug, Clone, Default)]
pub struct SpriteSelection {
    pub before: Option<SpriteRef>,
    pub after: Option<SpriteRef>,
}

impl SpriteSelection {
    pub fn new(before: Option<SpriteRef>, after: Option<SpriteRef>) -> Self {
        Self { before, after }
    }

    fn require(&self) -> Result<(&SpriteRef, &SpriteRef), Error> {
        let before = self.before.as_ref().ok_or(Error::MissingSelection("before"))?;
        let after = self.after.as_ref().ok_or(Error::MissingSelection("after"))?;
        Ok((before, after))
    }
}

/// How far a run reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunScope {
    /// Every candidate asset ("ReplaceAll").
    All,
    /// Paths containing the scene name ("ReplaceInScene"). `None` uses the
    /// scene the editor last had active.
    CurrentScene(Option<String>),
}

#[derive(Debug, Clone)]
pub struct ReplacementRequest {
    pub before: AssetIdentifier,
    pub after: AssetIdentifier,
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplacementResult {
    pub modified_paths: Vec<String>,
    pub before: AssetIdentifier,
    pub after: AssetIdentifier,
    pub before_name: String,
    pub after_name: String,
    pub scope: Scope,
    /// Candidates left after scope filtering.
    pub scanned: usize,
}

pub struct ReplaceEngine {
    config: AppConfig,
}

impl ReplaceEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one replacement against the configured project:
    /// 1. Check both sprites are selected
    /// 2. Resolve both to `fileID`/`guid` pairs
    /// 3. Enumerate candidates and narrow them to the scope
    /// 4. Rewrite matching scenes and prefabs in place
    pub fn run(
        &self,
        selection: &SpriteSelection,
        scope: &RunScope,
        reporter: &dyn ProgressReporter,
    ) -> Result<ReplacementResult, Error> {
        let (before, after) = selection.require().map_err(|e| {
            error!("{}", e);
            e
        })?;
        let assets = ProjectAssets::open(&self.config)?;
        self.run_with(&assets, &assets, before, after, scope, reporter)
    }

    pub fn run_with(
        &self,
        assets: &dyn AssetDatabase,
        scenes: &dyn SceneAccessor,
        before: &SpriteRef,
        after: &SpriteRef,
        scope: &RunScope,
        reporter: &dyn ProgressReporter,
    ) -> Result<ReplacementResult, Error> {
        let request = ReplacementRequest {
            before: resolver::resolve(assets, before)?,
            after: resolver::resolve(assets, after)?,
            scope: resolve_scope(scenes, scope)?,
        };
        info!("Replacing [{}] with [{}] in {}", request.before, request.after, request.scope);

        let candidates = request.scope.filter(assets.all_asset_paths()?);
        let scanned = candidates.len();

        let modified_paths = replacer::replace_all(
            assets.root(),
            &candidates,
            &request.before,
            &request.after,
            &self.config.normalized_extensions(),
            reporter,
        )?;

        Ok(ReplacementResult {
            modified_paths,
            before: request.before,
            after: request.after,
            before_name: before.name.clone(),
            after_name: after.name.clone(),
            scope: request.scope,
            scanned,
        })
    }

    /// Resolve sprites without touching any scene or prefab.
    pub fn resolve(&self, sprite: &SpriteRef) -> Result<AssetIdentifier, Error> {
        let assets = ProjectAssets::open(&self.config)?;
        resolver::resolve(&assets, sprite)
    }
}

fn resolve_scope(scenes: &dyn SceneAccessor, scope: &RunScope) -> Result<Scope, Error> {
    match scope {
        RunScope::All => Ok(Scope::All),
        RunScope::CurrentScene(Some(name)) => Ok(Scope::NamedScene(name.clone())),
        RunScope::CurrentScene(None) => {
            let name = scenes.active_scene_name().ok_or(Error::NoActiveScene)?;
            info!("Replacing within scene '{}' only", name);
            Ok(Scope::NamedScene(name))
        }
    }
}
