pub mod gesture;
pub mod input;
pub mod sync;

pub use gesture::{DrawStyle, GestureState};
pub use input::GestureEvent;
pub use sync::{EditorError, SyncUpdate, Synchronizer};
