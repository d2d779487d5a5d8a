//! Command/event boundary between the UI shell and the rebuild loop.
//!
//! The pipeline itself is synchronous and pure; this boundary carries the
//! triggers (data changed, viewport resized) and the outcomes (graph rebuilt,
//! build failed) so the UI can diff rebuilds and render error states without
//! reaching into pipeline internals.

use crate::telemetry::{CMD_REBUILD_GRAPH, CMD_RESIZE_VIEWPORT, CommandTelemetry};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};
use ledgerflow_core::{BuildError, RawLink, RawNode};
use serde::{Deserialize, Serialize};

pub type EventStream = Receiver<AppEvent>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildGraphCmd {
    pub nodes: Vec<RawNode>,
    pub links: Vec<RawLink>,
    pub container_width: f64,
    pub correlation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeViewportCmd {
    pub container_width: f64,
    pub correlation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppCommand {
    RebuildGraph(RebuildGraphCmd),
    ResizeViewport(ResizeViewportCmd),
}

impl AppCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RebuildGraph(_) => CMD_REBUILD_GRAPH,
            Self::ResizeViewport(_) => CMD_RESIZE_VIEWPORT,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::RebuildGraph(cmd) => &cmd.correlation_id,
            Self::ResizeViewport(cmd) => &cmd.correlation_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRebuiltEvt {
    pub node_count: usize,
    pub edge_count: usize,
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildFailedEvt {
    /// The surfaced whole-graph condition; per-record anomalies never reach
    /// this boundary.
    pub error: String,
    pub correlation_id: Option<String>,
}

impl BuildFailedEvt {
    pub fn from_error(error: &BuildError, correlation_id: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            correlation_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    GraphRebuilt(GraphRebuiltEvt),
    BuildFailed(BuildFailedEvt),
}

impl AppEvent {
    /// The lifecycle record this outcome corresponds to. Both variants close
    /// out a rebuild; resize never produces an event.
    pub fn telemetry(&self) -> CommandTelemetry {
        match self {
            Self::GraphRebuilt(evt) => CommandTelemetry::success(
                CMD_REBUILD_GRAPH,
                evt.correlation_id.as_deref().unwrap_or("untracked"),
            ),
            Self::BuildFailed(evt) => CommandTelemetry::failure(
                CMD_REBUILD_GRAPH,
                evt.correlation_id.as_deref().unwrap_or("untracked"),
                Some(evt.error.clone()),
            ),
        }
    }
}

pub trait EventBusBoundary {
    fn publish_command(&self, command: AppCommand) -> Result<()>;
    fn subscribe_events(&self) -> EventStream;
}

#[derive(Clone)]
pub struct InMemoryBoundary {
    command_tx: Sender<AppCommand>,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl Default for InMemoryBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBoundary {
    pub fn new() -> Self {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    pub fn command_receiver(&self) -> Receiver<AppCommand> {
        self.command_rx.clone()
    }

    pub fn publish_event(&self, event: AppEvent) -> Result<()> {
        event.telemetry().emit();
        self.event_tx
            .send(event)
            .map_err(|error| anyhow::anyhow!(error.to_string()))
    }
}

impl EventBusBoundary for InMemoryBoundary {
    fn publish_command(&self, command: AppCommand) -> Result<()> {
        CommandTelemetry::start(command.name(), command.correlation_id()).emit();
        self.command_tx
            .send(command)
            .map_err(|error| anyhow::anyhow!(error.to_string()))
    }

    fn subscribe_events(&self) -> EventStream {
        self.event_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_bus_roundtrip() {
        let bus = InMemoryBoundary::new();
        let cmd = AppCommand::ResizeViewport(ResizeViewportCmd {
            container_width: 800.0,
            correlation_id: "corr-1".to_string(),
        });

        bus.publish_command(cmd).expect("publish command");
        let received = bus.command_receiver().recv().expect("receive command");

        match received {
            AppCommand::ResizeViewport(inner) => {
                assert_eq!(inner.container_width, 800.0);
                assert_eq!(inner.correlation_id, "corr-1");
            }
            _ => panic!("unexpected command variant"),
        }

        let event = AppEvent::GraphRebuilt(GraphRebuiltEvt {
            node_count: 5,
            edge_count: 4,
            correlation_id: Some("corr-1".to_string()),
        });
        bus.publish_event(event).expect("publish event");
        let received = bus.subscribe_events().recv().expect("receive event");
        assert!(matches!(
            received,
            AppEvent::GraphRebuilt(GraphRebuiltEvt { node_count: 5, .. })
        ));
    }

    #[test]
    fn build_failed_event_carries_error_message() {
        let evt = BuildFailedEvt::from_error(&BuildError::NoValidNodes, None);
        assert!(evt.error.contains("no valid nodes"));
    }

    #[test]
    fn rebuild_outcome_closes_the_telemetry_lifecycle() {
        use crate::telemetry::CommandLifecycle;

        let bus = InMemoryBoundary::new();
        let cmd = AppCommand::RebuildGraph(RebuildGraphCmd {
            nodes: vec![],
            links: vec![],
            container_width: 1024.0,
            correlation_id: "corr-7".to_string(),
        });
        assert_eq!(cmd.name(), CMD_REBUILD_GRAPH);
        assert_eq!(cmd.correlation_id(), "corr-7");
        bus.publish_command(cmd).expect("publish command");

        // A worker drains the command and reports the outcome back.
        let drained = bus.command_receiver().recv().expect("receive command");
        let outcome = match drained {
            AppCommand::RebuildGraph(inner) => AppEvent::GraphRebuilt(GraphRebuiltEvt {
                node_count: 0,
                edge_count: 0,
                correlation_id: Some(inner.correlation_id),
            }),
            _ => panic!("unexpected command variant"),
        };
        bus.publish_event(outcome).expect("publish event");

        let received = bus.subscribe_events().recv().expect("receive event");
        let record = received.telemetry();
        assert_eq!(record.lifecycle, CommandLifecycle::Success);
        assert_eq!(record.correlation_id, "corr-7");

        let failed = AppEvent::BuildFailed(BuildFailedEvt::from_error(
            &BuildError::NoValidNodes,
            Some("corr-8".to_string()),
        ));
        let record = failed.telemetry();
        assert_eq!(record.lifecycle, CommandLifecycle::Failure);
        assert!(record.error_reason.unwrap().contains("no valid nodes"));
    }
}
