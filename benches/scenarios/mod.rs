//! Benchmarks for the generator and grid as the app drives them.

mod grid;
mod voices;

pub use grid::bench_grid;
pub use voices::bench_voices;
