/// Frame buffer, drawing style and backend trait.
pub mod backend;
/// CPU rasterizer.
pub mod cpu;
/// Session-driven frame rendering.
pub mod pipeline;
