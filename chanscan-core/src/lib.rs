pub mod error;
pub mod highlight;
pub mod matcher;
pub mod types;
pub mod window;

pub use error::*;
pub use highlight::{highlight, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
pub use matcher::find_matches;
pub use types::*;
pub use window::{lower_bound, WindowMode};
