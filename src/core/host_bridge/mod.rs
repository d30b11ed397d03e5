//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the embedding host (browser shim, layout engine, test harness)
// with core systems.
//
// This module defines the contract between host implementations and core
// logic, enabling hosts to be swapped without changing core code.
//
// Components:
// - `interface`: Event types (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{HostEvent, NavAction, NavEvent};
