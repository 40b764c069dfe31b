pub mod api;
pub mod context;
pub mod guard;
pub mod state;
pub mod storage;
