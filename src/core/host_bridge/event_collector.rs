//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → frame buffer → TickControl
//
// Bounded polling prevents starvation when the host floods the channel
// (e.g. a scroll storm); the tick loop's pacing handles idle time.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events once per tick, bounded to prevent starvation.
pub struct EventCollector {
    receiver: Receiver<HostEvent>,
    frame_events: Vec<HostEvent>,
}

impl EventCollector {
    pub fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            frame_events: Vec::with_capacity(16),
        }
    }

    /// Drains pending host events into the frame buffer.
    ///
    /// Returns `Exit` on `Shutdown` or when the host dropped its sender.
    pub fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 256;

        self.frame_events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(HostEvent::Shutdown) => return TickControl::Exit,
                Ok(event) => {
                    self.frame_events.push(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Host event backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    /// Returns the events collected for this tick.
    pub fn frame_events(&self) -> &[HostEvent] {
        &self.frame_events
    }

    /// Takes ownership of the frame buffer, leaving it empty.
    pub fn take_frame_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.frame_events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
