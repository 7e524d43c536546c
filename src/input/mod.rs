pub mod gesture;
pub mod handler;
pub mod router;

pub use gesture::{SurfacePoint, SwipeTracker, classify_swipe};
pub use handler::{InputHandler, KeyAction};
pub use router::{Command, InputRouter};
