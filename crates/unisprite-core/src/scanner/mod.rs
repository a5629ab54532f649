mod walk;

pub use walk::{collect_asset_paths, to_asset_path};
