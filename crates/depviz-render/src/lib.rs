mod dot;
mod format;
mod renderer;

pub use dot::to_dot;
pub use format::{OutputFormat, RenderTarget};
pub use renderer::{
    renderer_for, DotOnlyRenderer, GraphRenderer, GraphvizRenderer, NoopRenderer, RenderError,
    RenderOutcome, RendererKind,
};
