pub mod carving;
pub mod lathe;
pub mod pipeline;
pub mod spin;

// Re-export main types
pub use carving::{CarveStep, CarvingController, ToolInput, ToolState};
pub use lathe::{Lathe, TickReport};
pub use pipeline::{prepare_mesh, GpuVertex, RenderMesh};
pub use spin::SpinControl;
