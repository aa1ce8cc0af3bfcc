//! Application module: the state struct shared by the runtime, the playback
//! controller and the UI.

mod model;

pub use model::*;
