//=========================================================================
// Vitrine Engine
//=========================================================================
//
// Main entry point and coordinator for the interaction core.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Tick Loop]
//         │                          │
//         ├─ with_tps()              ├─ collect host events
//         ├─ with_channel_capacity() ├─ apply geometry
//         └─ with_viewport()         ├─ visibility pass
//                                    ├─ timer poll
//                                    └─ stage update
// ```
//
// The loop runs on the calling thread: one logical thread owns every
// piece of mutable state, and the host feeds it through a bounded
// channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::host_bridge::{EventCollector, HostEvent, NavEvent, TickControl};
use crate::core::geometry::Rect;
use crate::core::stage::{ComponentKey, Stage, StageServices, Timers};
use crate::core::viewport::ViewportModel;
use crate::core::visibility::VisibilityTracker;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Viewport**: 1280 × 800 at the document origin
///
/// # Examples
///
/// ```no_run
/// use vitrine_engine::EngineBuilder;
/// use vitrine_engine::core::stage::{Component, ComponentKey, StageContext, StageTransition};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Section { Hero }
/// impl ComponentKey for Section {}
///
/// struct HeroBanner;
/// impl Component<Section> for HeroBanner {
///     fn update(&mut self, _ctx: &mut StageContext<'_, Section>) {}
/// }
///
/// EngineBuilder::<Section>::new()
///     .with_tps(30.0)
///     .build()
///     .init(|stage| {
///         stage.register(Section::Hero, Box::new(HeroBanner));
///         stage.queue(StageTransition::Mount(Section::Hero));
///     })
///     .run();
/// ```
pub struct EngineBuilder<K: ComponentKey> {
    tps: f64,
    channel_capacity: usize,
    viewport: Rect,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: ComponentKey> EngineBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic loop.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the host → core event channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the initial viewport rectangle.
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<K> {
        info!(
            "Building engine (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            stage: Stage::new(),
            visibility: VisibilityTracker::new(),
            timers: Timers::new(),
            viewport: ViewportModel::new(self.viewport),
            collector: EventCollector::new(receiver),
            sender,
            nav_buf: Vec::new(),
            tps: self.tps,
        }
    }
}

impl<K: ComponentKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The interaction core runtime.
///
/// Owns every mutable system (visibility, timers, geometry, stage) and
/// drives them from a single-threaded tick loop. The host feeds geometry
/// and navigation through the channel obtained from
/// [`host_sender`](Self::host_sender) and reads back whatever state its
/// components expose.
pub struct Engine<K: ComponentKey> {
    stage: Stage<K>,
    visibility: VisibilityTracker,
    timers: Timers,
    viewport: ViewportModel,
    collector: EventCollector,
    sender: Sender<HostEvent>,
    nav_buf: Vec<NavEvent>,
    tps: f64,
}

impl<K: ComponentKey> Engine<K> {
    //--- Initialization ---------------------------------------------------

    /// Configures the stage (component registration, initial mounts)
    /// before the engine starts running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Stage<K>),
    {
        info!("Initializing engine stage");
        init_fn(&mut self.stage);
        self
    }

    /// Returns a sender the host uses to feed events to the core.
    ///
    /// May be cloned freely; dropping every sender shuts the engine down.
    pub fn host_sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    /// Mutable access to the stage for hosts that drive ticks manually.
    pub fn stage_mut(&mut self) -> &mut Stage<K> {
        &mut self.stage
    }

    /// Read access to visibility state (diagnostics, host rendering).
    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    /// Read access to the live timer registry.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    //--- Execution --------------------------------------------------------

    /// Starts the tick loop and blocks until the host shuts down.
    ///
    /// # Lifecycle
    ///
    /// 1. Collect host events (bounded drain)
    /// 2. Apply geometry, run the visibility pass, poll timers
    /// 3. Apply stage transitions and update mounted components
    /// 4. Sleep to hold the configured TPS
    ///
    /// On exit every component is unmounted, releasing all observations
    /// and timers.
    pub fn run(mut self) {
        info!("Engine running at {} TPS", self.tps);
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        loop {
            let frame_start = Instant::now();

            if self.tick(frame_start) == TickControl::Exit {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }

        info!("Engine stopped");
    }

    /// Runs a single tick against `now`.
    ///
    /// Exposed for hosts that own their own loop (and for tests). On
    /// `Exit` the stage has already been torn down.
    pub fn tick(&mut self, now: Instant) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            self.teardown(now);
            return TickControl::Exit;
        }

        //--- Step 1: Apply host events ------------------------------------
        self.nav_buf.clear();
        for event in self.collector.take_frame_events() {
            self.apply_host_event(event);
        }

        //--- Step 2: Visibility pass and timer poll -----------------------
        self.visibility.process(&self.viewport);
        let transitions = self.visibility.take_transitions();
        let fired = self.timers.poll(now).to_vec();

        //--- Step 3: Stage pass -------------------------------------------
        let mut services = StageServices {
            now,
            visibility: &mut self.visibility,
            timers: &mut self.timers,
            geometry: &self.viewport,
            nav: &self.nav_buf,
            fired: &fired,
            transitions: &transitions,
        };
        self.stage.update(&mut services);

        TickControl::Continue
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ViewportResized { width, height } => {
                let current = self.viewport.viewport_rect();
                self.viewport
                    .set_viewport(Rect::new(current.x, current.y, width, height));
            }
            HostEvent::Scrolled { offset } => {
                // Region rects are document-space; the viewport slides.
                let current = self.viewport.viewport_rect();
                self.viewport.set_scroll_offset(offset);
                self.viewport
                    .set_viewport(Rect::new(current.x, offset, current.width, current.height));
            }
            HostEvent::RegionPlaced { region, rect } => {
                self.viewport.place_region(region, rect);
            }
            HostEvent::RegionRemoved { region } => {
                self.viewport.remove_region(region);
            }
            HostEvent::Nav(nav) => {
                self.nav_buf.push(nav);
            }
            HostEvent::Shutdown => {
                // Handled by the collector; reaching here means a stray
                // Shutdown sat behind the drain bound.
                warn!("Shutdown event outside collector control path");
            }
        }
    }

    fn teardown(&mut self, now: Instant) {
        info!("Shutting down: unmounting {} components", self.stage.mounted_count());
        let mut services = StageServices {
            now,
            visibility: &mut self.visibility,
            timers: &mut self.timers,
            geometry: &self.viewport,
            nav: &[],
            fired: &[],
            transitions: &[],
        };
        self.stage.clear_all(&mut services);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carousel::CyclicIndex;
    use crate::core::host_bridge::NavAction;
    use crate::core::stage::{Component, StageContext, StageTransition, TimerHandle};
    use crate::core::viewport::RegionId;
    use crate::core::visibility::{ObservationHandle, ObserveOptions};
    use std::sync::{Arc, Mutex};

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Section {
        Testimonials,
    }
    impl ComponentKey for Section {}

    const SLIDER: RegionId = RegionId(10);

    /// Observable slice of a slider's state, shared with the test body.
    #[derive(Debug, Default)]
    struct SliderState {
        slide: usize,
        revealed: bool,
        edges: usize,
    }

    /// A three-slide testimonials slider: reveals on scroll, auto-advances
    /// on a timer, and answers manual navigation.
    struct TestimonialsSlider {
        state: Arc<Mutex<SliderState>>,
        index: CyclicIndex,
        reveal: ObservationHandle,
        timer: Option<TimerHandle>,
    }

    impl TestimonialsSlider {
        fn new(state: Arc<Mutex<SliderState>>) -> Self {
            Self {
                state,
                index: CyclicIndex::wrapping(3),
                reveal: ObservationHandle::detached(),
                timer: None,
            }
        }
    }

    impl Component<Section> for TestimonialsSlider {
        fn on_mount(&mut self, ctx: &mut StageContext<'_, Section>) {
            self.reveal = ctx.observe(SLIDER, ObserveOptions::default().with_threshold(0.2));
            self.timer = Some(ctx.schedule(Duration::from_secs(5)));
        }

        fn update(&mut self, ctx: &mut StageContext<'_, Section>) {
            if let Some(timer) = self.timer {
                if ctx.timer_fired(timer) {
                    self.index.next();
                }
            }

            let mut manual = false;
            for action in ctx.nav_for(SLIDER).collect::<Vec<_>>() {
                manual = true;
                match action {
                    NavAction::Next => {
                        self.index.next();
                    }
                    NavAction::Previous => {
                        self.index.previous();
                    }
                    NavAction::Goto(i) => {
                        let _ = self.index.goto(i);
                    }
                }
            }
            if manual {
                if let Some(timer) = self.timer {
                    ctx.defer(timer);
                }
            }

            let mut state = self.state.lock().unwrap();
            state.slide = self.index.current();
            state.revealed = ctx.is_visible(self.reveal);
            if ctx.transition_for(self.reveal).is_some() {
                state.edges += 1;
            }
        }
    }

    fn engine_with_slider() -> (Engine<Section>, Arc<Mutex<SliderState>>, Sender<HostEvent>) {
        let state = Arc::new(Mutex::new(SliderState::default()));
        let shared = state.clone();

        let engine = EngineBuilder::<Section>::new().build();
        let sender = engine.host_sender();

        // Region must be placed before mount for attach to succeed.
        sender
            .send(HostEvent::RegionPlaced {
                region: SLIDER,
                rect: Rect::new(0.0, 1200.0, 800.0, 400.0),
            })
            .unwrap();

        let mut engine = engine.init(move |stage| {
            stage.register(
                Section::Testimonials,
                Box::new(TestimonialsSlider::new(shared)),
            );
            stage.queue(StageTransition::Mount(Section::Testimonials));
        });

        // First tick applies the placement and mounts the slider.
        let t0 = Instant::now();
        assert_eq!(engine.tick(t0), TickControl::Continue);

        (engine, state, sender)
    }

    //=====================================================================
    // Integration: Scroll Reveal
    //=====================================================================

    /// Tests scrolling the slider into view flips its reveal state.
    #[test]
    fn scroll_reveals_slider() {
        let (mut engine, state, sender) = engine_with_slider();
        assert!(!state.lock().unwrap().revealed);

        sender.send(HostEvent::Scrolled { offset: 1000.0 }).unwrap();
        engine.tick(Instant::now());

        assert!(state.lock().unwrap().revealed);
        assert_eq!(engine.visibility().observation_count(), 1);
    }

    /// Tests every tick drains the tracker's edge queue into the stage
    /// pass, so a long session of crossings never accumulates a backlog.
    #[test]
    fn visibility_edges_are_drained_each_tick() {
        let (mut engine, state, sender) = engine_with_slider();

        // Each tick scrolls the slider across its threshold, producing
        // exactly one edge per tick.
        for i in 0..50 {
            let offset = if i % 2 == 0 { 1000.0 } else { 0.0 };
            sender.send(HostEvent::Scrolled { offset }).unwrap();
            engine.tick(Instant::now());
        }

        assert_eq!(state.lock().unwrap().edges, 50);
        assert!(engine.visibility.take_transitions().is_empty());
    }

    //=====================================================================
    // Integration: Navigation
    //=====================================================================

    /// Tests manual navigation routed through host events.
    #[test]
    fn nav_events_drive_the_index() {
        let (mut engine, state, sender) = engine_with_slider();

        sender
            .send(HostEvent::Nav(NavEvent {
                target: SLIDER,
                action: NavAction::Next,
            }))
            .unwrap();
        engine.tick(Instant::now());
        assert_eq!(state.lock().unwrap().slide, 1);

        // Wraparound: previous twice from slide 1 lands on slide 2.
        for _ in 0..2 {
            sender
                .send(HostEvent::Nav(NavEvent {
                    target: SLIDER,
                    action: NavAction::Previous,
                }))
                .unwrap();
            engine.tick(Instant::now());
        }
        assert_eq!(state.lock().unwrap().slide, 2);

        // Out-of-range goto is rejected without moving.
        sender
            .send(HostEvent::Nav(NavEvent {
                target: SLIDER,
                action: NavAction::Goto(7),
            }))
            .unwrap();
        engine.tick(Instant::now());
        assert_eq!(state.lock().unwrap().slide, 2);
    }

    /// Tests nav events for other regions are ignored.
    #[test]
    fn nav_for_other_regions_is_ignored() {
        let (mut engine, state, sender) = engine_with_slider();

        sender
            .send(HostEvent::Nav(NavEvent {
                target: RegionId(99),
                action: NavAction::Next,
            }))
            .unwrap();
        engine.tick(Instant::now());

        assert_eq!(state.lock().unwrap().slide, 0);
    }

    //=====================================================================
    // Integration: Auto-Advance
    //=====================================================================

    /// Tests the timer advances the slider once per period.
    #[test]
    fn timer_advances_slides() {
        let (mut engine, state, _sender) = engine_with_slider();
        let t0 = Instant::now();

        engine.tick(t0 + Duration::from_secs(6));
        assert_eq!(state.lock().unwrap().slide, 1);

        // A long stall still advances exactly once.
        engine.tick(t0 + Duration::from_secs(60));
        assert_eq!(state.lock().unwrap().slide, 2);
    }

    //=====================================================================
    // Shutdown
    //=====================================================================

    /// Tests shutdown unmounts components and releases their resources.
    #[test]
    fn shutdown_releases_everything() {
        let (mut engine, _state, sender) = engine_with_slider();
        assert_eq!(engine.visibility().observation_count(), 1);
        assert_eq!(engine.timers().timer_count(), 1);

        sender.send(HostEvent::Shutdown).unwrap();
        assert_eq!(engine.tick(Instant::now()), TickControl::Exit);

        assert_eq!(engine.visibility().observation_count(), 0);
        assert_eq!(engine.timers().timer_count(), 0);
    }
}
