//! Room addressing and the registry that owns every room's engine.

mod registry;
mod room_id;

pub use registry::{RoomHandle, RoomRegistry};
pub use room_id::RoomId;
