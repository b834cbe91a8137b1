//! gantt-rs: headless Gantt timeline engine.
//!
//! One original time scale per dataset revision, a zoom transform layered
//! on top of it, and layer geometry rebuilt from dates on every frame so
//! bars, axis, markers and dependency connectors always share one
//! effective scale.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig, GanttUpdate, UpdateOutcome};
pub use error::{GanttError, GanttResult};
