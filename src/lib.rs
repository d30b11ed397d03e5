//=========================================================================
// Vitrine Engine — Library Root
//
// This crate defines the public API surface of the Vitrine Engine: the
// headless interaction core behind showcase/marketing pages.
//
// Responsibilities:
// - Expose the engine entry point (`Engine`/`EngineBuilder`)
// - Expose the core systems (visibility, carousel, stage, host bridge)
//   for embedding and extension
//
// Typical usage:
// ```no_run
// use vitrine_engine::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Section { Hero }
// impl ComponentKey for Section {}
//
// struct HeroBanner;
// impl Component<Section> for HeroBanner {
//     fn update(&mut self, _ctx: &mut StageContext<'_, Section>) {}
// }
//
// fn main() {
//     EngineBuilder::<Section>::new()
//         .build()
//         .init(|stage| {
//             stage.register(Section::Hero, Box::new(HeroBanner));
//             stage.queue(StageTransition::Mount(Section::Hero));
//         })
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the interaction systems (geometry, visibility,
// carousel, stage, host bridge). It is exposed publicly so hosts can
// embed individual pieces without the full engine loop.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the engine entry point and tick loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the engine entry points so users can simply
// `use vitrine_engine::EngineBuilder;` without knowing the internal
// module structure.
//
pub mod prelude;

pub use engine::{Engine, EngineBuilder};
