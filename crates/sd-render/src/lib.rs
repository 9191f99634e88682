pub mod display;
pub mod paint;

pub use display::{RenderItem, render_list, render_list_json};
pub use paint::paint_scene;
