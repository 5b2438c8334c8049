mod component;
mod render;
mod state;
mod types;

pub use component::MindMapCanvas;
pub use types::NodeSeed;
