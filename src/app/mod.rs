pub mod request;
mod state;

pub use request::{ChartRequest, RenderRequest, SurfaceSpec};
pub use state::App;
