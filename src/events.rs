//! Events emitted by a rendering surface and the queue that delivers them.

use crate::animation::transition::TransitionId;
use crate::core::geo::{LatLng, Size};
use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Map event types that can be emitted by a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// A style finished loading; custom layers must be (re)added
    StyleLoad { style: String },
    /// A camera transition started
    MoveStart { transition: TransitionId, center: LatLng },
    /// A camera transition completed or was stopped
    MoveEnd { transition: TransitionId, center: LatLng },
    /// The container changed size
    Resize { size: Size },
}

impl MapEvent {
    /// Listener key for this event
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::StyleLoad { .. } => "style.load",
            MapEvent::MoveStart { .. } => "movestart",
            MapEvent::MoveEnd { .. } => "moveend",
            MapEvent::Resize { .. } => "resize",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;
type OnceCallback = Box<dyn FnOnce(&MapEvent) + Send + Sync>;

/// Queue of surface events with persistent and one-shot listeners
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event name
    listeners: HashMap<&'static str, Vec<EventCallback>>,
    /// Listeners removed after their first delivery
    once_listeners: HashMap<&'static str, Vec<OnceCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_name: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_name)
            .or_default()
            .push(Box::new(callback));
    }

    /// Register a listener that fires for the next matching event only
    pub fn once<F>(&mut self, event_name: &'static str, callback: F)
    where
        F: FnOnce(&MapEvent) + Send + Sync + 'static,
    {
        self.once_listeners
            .entry(event_name)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Deliver all queued events to listeners and hand them back in order
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            let name = event.name();
            if let Some(callbacks) = self.listeners.get(name) {
                for callback in callbacks {
                    callback(event);
                }
            }
            if let Some(callbacks) = self.once_listeners.remove(name) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("once_listeners", &self.once_listeners.len())
            .field("event_queue", &self.event_queue)
            .finish()
    }
}
