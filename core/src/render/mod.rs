pub mod raster;
pub mod scene;
pub mod style;

pub use raster::{render_png, EXPORT_DPI, IMAGE_FILE_NAME};
pub use scene::PitchScene;
pub use style::{RenderStyle, Rgb, Theme};
