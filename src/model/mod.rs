pub mod id;
pub mod task;
pub mod list;
pub mod board;
pub mod document;
pub mod config;

pub use id::*;
pub use task::*;
pub use list::*;
pub use board::*;
pub use document::*;
pub use config::*;
