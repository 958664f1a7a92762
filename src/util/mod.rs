//! Low-level helpers shared by the worker and the reporters

pub mod buffer;
pub mod time;
