use egui_notify::{Anchor, Toast, Toasts};
use egui_phosphor::regular as ph;
use mindfull_events::{Event, EventListener};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toasts for canvas outcomes.
pub struct NotificationManager {
    toasts: Toasts,
    enabled: bool,
}

impl NotificationManager {
    pub fn new(enabled: bool) -> Self {
        let toasts = Toasts::new()
            .with_anchor(Anchor::TopRight)
            .with_margin(egui::vec2(8.0, 8.0));
        Self { toasts, enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        let mut toast = match level {
            NotificationLevel::Info => Toast::info(&message),
            NotificationLevel::Success => Toast::success(&message),
            NotificationLevel::Warning => Toast::warning(&message),
            NotificationLevel::Error => Toast::error(&message),
        };
        let secs = match level {
            NotificationLevel::Info => 3,
            NotificationLevel::Success => 3,
            NotificationLevel::Warning => 4,
            NotificationLevel::Error => 6,
        };
        toast.duration(Some(Duration::from_secs(secs)));
        self.toasts.add(toast);
    }

    /// Render notifications (call once per frame)
    pub fn render(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}

/// Toast text for an event, if it deserves one.
pub fn describe(event: &Event) -> Option<(NotificationLevel, String)> {
    match event {
        Event::PathwayCreated { from, to, .. } => Some((
            NotificationLevel::Success,
            format!("{} Pathway {} to {}", ph::LIGHTNING, from.owner(), to.owner()),
        )),
        Event::PathwayRejected { reason, .. } => Some((
            NotificationLevel::Warning,
            format!("{} {}", ph::WARNING, capitalize(&reason.to_string())),
        )),
        Event::PathwayRemoved { id } => Some((
            NotificationLevel::Info,
            format!("{} Removed {}", ph::LINK_BREAK, id),
        )),
        Event::SoundFailed { effect, error } => Some((
            NotificationLevel::Error,
            format!("{} Could not play {effect}: {error}", ph::SPEAKER_SLASH),
        )),
        _ => None,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl EventListener for NotificationManager {
    fn handle_event(&mut self, event: &Event) {
        if let Some((level, message)) = describe(event) {
            self.notify(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindfull_core::{ConnectionId, NodeId, PortAnchor, PortId};
    use mindfull_events::RejectReason;

    #[test]
    fn test_rejection_message() {
        let (level, message) = describe(&Event::PathwayRejected {
            from: PortId::new("memory-a", PortAnchor::Right),
            to: PortId::new("memory-a", PortAnchor::Left),
            reason: RejectReason::SelfConnection,
        })
        .unwrap();
        assert_eq!(level, NotificationLevel::Warning);
        assert!(message.ends_with("Cannot connect a memory to itself"));
    }

    #[test]
    fn test_drag_events_are_quiet() {
        assert!(
            describe(&Event::NodeMoved {
                node: NodeId::new("memory-a"),
                x: 1.0,
                y: 2.0,
            })
            .is_none()
        );
        assert!(describe(&Event::PathwayRemoved { id: ConnectionId(3) }).is_some());
    }
}
