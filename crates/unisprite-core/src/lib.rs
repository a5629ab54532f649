pub mod config;
pub mod engine;
pub mod error;
pub mod identifier;
pub mod progress;
pub mod project;
pub mod replacer;
pub mod resolver;
pub mod scanner;
pub mod scope;

pub use config::AppConfig;
pub use engine::{ReplaceEngine, ReplacementRequest, ReplacementResult, RunScope, SpriteSelection};
pub use error::Error;
pub use identifier::{AssetIdentifier, SpriteRef};
pub use progress::{ProgressReporter, SilentReporter};
pub use scope::Scope;
