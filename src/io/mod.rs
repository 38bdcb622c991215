pub mod config_io;
pub mod lock;
pub mod persistence;
pub mod state;
pub mod storage;
