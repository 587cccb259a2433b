pub mod machine;
pub mod state;

pub use machine::{
    GestureContext, GestureOutcome, GestureStateMachine, PointerButton, PointerEvent,
};
pub use state::{GestureState, HeldRange, HoveredEntry, PointerState, TagDrag, ZoomDrag};
