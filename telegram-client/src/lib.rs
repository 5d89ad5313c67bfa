pub mod api;
pub mod walker;


pub use api::{ChannelApi, HttpChannelApi, DEFAULT_PAGE_SIZE};
pub use walker::{ChannelWalker, ThreadIter};
