pub mod boundary;
pub mod debounce;
pub mod telemetry;

pub use boundary::{
    AppCommand, AppEvent, BuildFailedEvt, EventBusBoundary, EventStream, GraphRebuiltEvt,
    InMemoryBoundary, RebuildGraphCmd, ResizeViewportCmd,
};
pub use debounce::Debouncer;
pub use telemetry::{CMD_REBUILD_GRAPH, CMD_RESIZE_VIEWPORT, CommandLifecycle, CommandTelemetry};

/// Fresh correlation id for tying a command to the events it produces.
pub fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
