use serde::Serialize;
use std::fmt;

/// Which candidate files a run considers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Scope {
    All,
    NamedScene(String),
}

impl Scope {
    /// Narrows `paths` to this scope.
    ///
    /// A named scene keeps every path containing the name, so `Foo` also
    /// keeps `FooBar.unity` and any prefab whose own path contains `Foo`.
    /// Prefabs the scene merely uses are not followed.
    pub fn filter(&self, paths: Vec<String>) -> Vec<String> {
        match self {
            Scope::All => paths,
            Scope::NamedScene(name) => paths
                .into_iter()
                .filter(|path| path.contains(name.as_str()))
                .collect(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all assets"),
            Scope::NamedScene(name) => write!(f, "scene '{}'", name),
        }
    }
}
