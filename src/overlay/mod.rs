pub mod clock;
pub mod keyboard;
pub mod layout;
pub mod model;
pub mod render;
pub mod sprites;
pub mod state;

pub use keyboard::{normalize_key, KeyCode, KeyEvent};
pub use model::{KeyDescriptor, KeyRect};
pub use state::{OverlayState, Pose};
