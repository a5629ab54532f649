use clap::{Args, Parser, Subcommand};
use unisprite_core::SpriteRef;

#[derive(Debug, Parser)]
#[command(name = "unisprite")]
#[command(about = "Swap sprite references across Unity scenes and prefabs", long_about = None)]
pub struct Cli {
    /// Unity project directory (overrides `project_root` from configuration)
    #[arg(long, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replace references to one sprite with another
    Replace(ReplaceArgs),
    /// Print the fileID/guid pair of sprites
    Resolve {
        /// Sprites as `<texture>` or `<texture>#<sprite>`
        #[arg(required = true)]
        sprites: Vec<SpriteRef>,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Sprite currently referenced, as `<texture>` or `<texture>#<sprite>`
    #[arg(long)]
    pub before: Option<SpriteRef>,

    /// Sprite to reference instead
    #[arg(long)]
    pub after: Option<SpriteRef>,

    /// Only rewrite assets whose path contains the current scene's name
    #[arg(long)]
    pub scene_only: bool,

    /// Scene name for --scene-only (default: the scene last active in the editor)
    #[arg(long, requires = "scene_only")]
    pub scene: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
