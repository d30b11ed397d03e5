//=========================================================================
// Stage Manager
//=========================================================================
//
// Manages component registration, the mount list, and lifecycle.
//
// Components are stored in a HashMap by key and referenced via an ordered
// mount list, so a component keeps its state across mount cycles (a
// gallery remembers its slide when a page section toggles). Transitions
// queue up and apply at tick boundaries, never mid-update.
//
// Unmount is the enforcement point for scoped release: whatever the
// component acquired through its context and did not release itself is
// force-detached/cancelled here, on every exit path (Clear included).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::context::{Acquired, StageContext};
use super::{Component, ComponentKey, StageServices};

//=== StageTransition =====================================================

/// Mount-list operations, queued and applied at tick boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTransition<K: ComponentKey> {
    /// Mounts a registered component.
    Mount(K),

    /// Unmounts a component, releasing everything it acquired.
    Unmount(K),

    /// Unmounts every component, newest first.
    Clear,
}

//=== Stage ===============================================================

/// Component registry and mount list.
///
/// Components are registered once and referenced by key; the mount list
/// determines which components receive updates each tick, in mount order.
pub struct Stage<K: ComponentKey> {
    components: HashMap<K, Box<dyn Component<K>>>,
    mounted: Vec<K>,
    acquired: HashMap<K, Acquired>,
    pending: Vec<StageTransition<K>>,
}

impl<K: ComponentKey> Stage<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a stage with no components mounted.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            mounted: Vec::new(),
            acquired: HashMap::new(),
            pending: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a component. Components must be registered before being
    /// mounted.
    pub fn register(&mut self, key: K, component: Box<dyn Component<K>>) {
        if self.components.insert(key, component).is_some() {
            warn!("Component {:?} was already registered and has been replaced", key);
        }
    }

    /// Queues a transition to be applied at the next tick boundary.
    pub fn queue(&mut self, transition: StageTransition<K>) {
        self.pending.push(transition);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns whether a component is currently mounted.
    pub fn is_mounted(&self, key: K) -> bool {
        self.mounted.contains(&key)
    }

    /// Returns the number of mounted components.
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one stage pass: applies queued transitions, then updates every
    /// mounted component in mount order, then applies transitions the
    /// update callbacks queued.
    pub fn update(&mut self, services: &mut StageServices<'_>) {
        self.apply_pending(services);

        let keys = self.mounted.clone();
        let mut requests = Vec::new();

        for key in keys {
            // A transition applied above may have unmounted this key.
            if !self.mounted.contains(&key) {
                continue;
            }
            let Some(component) = self.components.get_mut(&key) else {
                continue;
            };
            let acquired = self.acquired.entry(key).or_default();

            let mut ctx = StageContext {
                now: services.now,
                visibility: &mut *services.visibility,
                timers: &mut *services.timers,
                geometry: services.geometry,
                nav: services.nav,
                fired: services.fired,
                transitions: services.transitions,
                acquired,
                requests: &mut requests,
            };
            component.update(&mut ctx);
        }

        self.pending.extend(requests);
        self.apply_pending(services);
    }

    /// Unmounts everything immediately (engine shutdown path).
    pub fn clear_all(&mut self, services: &mut StageServices<'_>) {
        while let Some(key) = self.mounted.last().copied() {
            self.unmount(key, services);
        }
    }

    //--- Transition Processing --------------------------------------------

    fn apply_pending(&mut self, services: &mut StageServices<'_>) {
        let pending = std::mem::take(&mut self.pending);
        for transition in pending {
            match transition {
                StageTransition::Mount(key) => self.mount(key, services),
                StageTransition::Unmount(key) => self.unmount(key, services),
                StageTransition::Clear => {
                    while let Some(key) = self.mounted.last().copied() {
                        self.unmount(key, services);
                    }
                }
            }
        }
    }

    fn mount(&mut self, key: K, services: &mut StageServices<'_>) {
        if self.mounted.contains(&key) {
            warn!("Component {:?} is already mounted", key);
            return;
        }
        let Some(component) = self.components.get_mut(&key) else {
            warn!("Cannot mount unregistered component {:?}", key);
            return;
        };

        debug!("Mounting component {:?}", key);
        self.mounted.push(key);

        let acquired = self.acquired.entry(key).or_default();
        let mut requests = Vec::new();
        let mut ctx = StageContext {
            now: services.now,
            visibility: &mut *services.visibility,
            timers: &mut *services.timers,
            geometry: services.geometry,
            nav: services.nav,
            fired: services.fired,
            transitions: services.transitions,
            acquired,
            requests: &mut requests,
        };
        component.on_mount(&mut ctx);
        self.pending.extend(requests);
    }

    fn unmount(&mut self, key: K, services: &mut StageServices<'_>) {
        let Some(position) = self.mounted.iter().position(|k| *k == key) else {
            // Unmounting something not mounted is a no-op, same as a
            // second detach.
            return;
        };

        debug!("Unmounting component {:?}", key);
        self.mounted.remove(position);

        if let Some(component) = self.components.get_mut(&key) {
            let acquired = self.acquired.entry(key).or_default();
            let mut requests = Vec::new();
            let mut ctx = StageContext {
                now: services.now,
                visibility: &mut *services.visibility,
                timers: &mut *services.timers,
                geometry: services.geometry,
                nav: services.nav,
                fired: services.fired,
                transitions: services.transitions,
                acquired,
                requests: &mut requests,
            };
            component.on_unmount(&mut ctx);
            self.pending.extend(requests);
        }

        // Force-release whatever the component left behind. Idempotent
        // against anything it already released itself.
        if let Some(leftovers) = self.acquired.remove(&key) {
            if !leftovers.observations.is_empty() || !leftovers.timers.is_empty() {
                debug!(
                    "Releasing {} observations and {} timers for {:?}",
                    leftovers.observations.len(),
                    leftovers.timers.len(),
                    key
                );
            }
            for handle in leftovers.observations {
                services.visibility.detach(handle);
            }
            for handle in leftovers.timers {
                services.timers.cancel(handle);
            }
        }
    }
}

impl<K: ComponentKey> Default for Stage<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
