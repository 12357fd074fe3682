//! Inbound events from the presentation layer
//!
//! Events are queued and only applied at the start of the next tick, so a
//! tick never sees a half-applied input.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// External requests the simulation understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Start a new round (or restart the current one)
    StartRound,
    /// The pointer picked a point on the ground
    SelectGroundPoint { x: f64, z: f64 },
}

/// Sending half, handed to whatever owns the pointer and the start button
#[derive(Debug, Clone)]
pub struct InputBridge {
    tx: Sender<InputEvent>,
}

impl InputBridge {
    pub fn start_round(&self) {
        self.send(InputEvent::StartRound);
    }

    pub fn select_ground_point(&self, x: f64, z: f64) {
        self.send(InputEvent::SelectGroundPoint { x, z });
    }

    pub fn send(&self, event: InputEvent) {
        if self.tx.send(event).is_err() {
            log::warn!("Simulation gone, dropped {:?}", event);
        }
    }
}

/// Receiving half, owned by the simulation
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
}

impl InputQueue {
    /// Take every queued event in arrival order
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Create a connected bridge/queue pair
pub fn channel() -> (InputBridge, InputQueue) {
    let (tx, rx) = mpsc::channel();
    (InputBridge { tx }, InputQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_drain_in_order() {
        let (bridge, queue) = channel();
        bridge.select_ground_point(1.0, 2.0);
        bridge.start_round();
        assert_eq!(
            queue.drain(),
            vec![
                InputEvent::SelectGroundPoint { x: 1.0, z: 2.0 },
                InputEvent::StartRound
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_bridge_works_from_other_thread() {
        let (bridge, queue) = channel();
        let remote = bridge.clone();
        std::thread::spawn(move || remote.start_round()).join().unwrap();
        assert_eq!(queue.drain(), vec![InputEvent::StartRound]);
    }

    #[test]
    fn test_send_after_queue_dropped_is_harmless() {
        let (bridge, queue) = channel();
        drop(queue);
        bridge.start_round();
    }
}
