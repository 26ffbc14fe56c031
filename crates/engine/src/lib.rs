//! World engine: chunk streaming, the generation worker, and the renderer
//! collaborator boundary.
//!
//! The engine never blocks on generation. The store marks a chunk pending,
//! fires a request at the worker thread, and keeps simulating; results are
//! drained back on the main thread each tick and matched to pending records
//! by chunk coordinate, with stale completions discarded.

mod renderer;
mod store;
mod worker;

pub use renderer::*;
pub use store::*;
pub use worker::*;
