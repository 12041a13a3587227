// File: crates/stripchart-core/src/lib.rs
// Summary: Core library entry point; exports the streaming chart engine (sample store,
// viewport, geometry builder, render worker) and the StreamChart facade.

pub mod types;
pub mod geometry;
pub mod error;
pub mod config;
pub mod store;
pub mod scale;
pub mod downsample;
pub mod view;
pub mod window;
pub mod buffer;
pub mod builder;
pub mod scheduler;
pub mod gesture;
pub mod chart;

pub use chart::StreamChart;
pub use config::{ChartConfig, LineConfig};
pub use error::{BuildError, ChartError, ConfigError};
pub use store::SampleStore;
pub use view::{ViewportState, YWindow};
pub use window::{LineWindow, RenderWindow, UpdateMode};
pub use buffer::{DoubleBuffer, Frame, PolylineSink, VertexBuffer};
pub use builder::{FrameInfo, GeometryBuilder};
pub use scheduler::{FrameCallback, RenderRequest, RenderScheduler};
pub use gesture::{GestureContext, GestureTracker, VerticalTarget};
pub use geometry::Vertex;
pub use types::ViewportSize;
