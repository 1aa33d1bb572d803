use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use uuid::Uuid;

const TELEMETRY_TARGET: &str = "mindfull::events::telemetry";

pub const GESTURE_NODE_DRAG: &str = "NodeDrag";
pub const GESTURE_CONNECT: &str = "Connect";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GestureLifecycle {
    Start,
    Commit,
    Cancel,
}

impl fmt::Display for GestureLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "gesture_start"),
            Self::Commit => write!(f, "gesture_commit"),
            Self::Cancel => write!(f, "gesture_cancel"),
        }
    }
}

/// One lifecycle record of a pointer gesture (node drag or pathway drag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureTelemetry {
    pub correlation_id: String,
    pub gesture: String,
    pub lifecycle: GestureLifecycle,
    pub reason: Option<String>,
    pub context: Option<String>,
}

impl GestureTelemetry {
    pub fn start(gesture: impl Into<String>, correlation_id: &str) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            gesture: gesture.into(),
            lifecycle: GestureLifecycle::Start,
            reason: None,
            context: None,
        }
    }

    pub fn commit(gesture: impl Into<String>, correlation_id: &str, context: Option<String>) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            gesture: gesture.into(),
            lifecycle: GestureLifecycle::Commit,
            reason: None,
            context,
        }
    }

    pub fn cancel(gesture: impl Into<String>, correlation_id: &str, reason: Option<String>) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            gesture: gesture.into(),
            lifecycle: GestureLifecycle::Cancel,
            reason,
            context: None,
        }
    }

    fn now_unix_ms() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default()
    }
}

pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn gesture_start(gesture: &str, correlation_id: &str, context: &str) -> GestureTelemetry {
    let telemetry = GestureTelemetry::start(gesture, correlation_id);
    debug!(
        target: TELEMETRY_TARGET,
        gesture = %telemetry.gesture,
        correlation_id = %telemetry.correlation_id,
        lifecycle = %telemetry.lifecycle,
        context = %context,
        timestamp_ms = GestureTelemetry::now_unix_ms(),
        "gesture_start"
    );
    telemetry
}

pub fn gesture_commit(gesture: &str, correlation_id: &str, context: &str) -> GestureTelemetry {
    let telemetry = GestureTelemetry::commit(gesture, correlation_id, Some(context.to_string()));
    info!(
        target: TELEMETRY_TARGET,
        gesture = %telemetry.gesture,
        correlation_id = %telemetry.correlation_id,
        lifecycle = %telemetry.lifecycle,
        context = %context,
        timestamp_ms = GestureTelemetry::now_unix_ms(),
        "gesture_commit"
    );
    telemetry
}

pub fn gesture_cancel(gesture: &str, correlation_id: &str, reason: Option<String>) -> GestureTelemetry {
    let telemetry = GestureTelemetry::cancel(gesture, correlation_id, reason);
    let reason = telemetry.reason.as_deref().unwrap_or("dropped on empty space");

    warn!(
        target: TELEMETRY_TARGET,
        gesture = %telemetry.gesture,
        correlation_id = %telemetry.correlation_id,
        lifecycle = %telemetry.lifecycle,
        reason = %reason,
        timestamp_ms = GestureTelemetry::now_unix_ms(),
        "gesture_cancel"
    );

    telemetry
}
