//! Filesystem utilities for fruitforge.
//!
//! Atomic writes keep the session file and the saved-sets store from ever
//! being observed half-written; lock files serialize read-modify-write
//! cycles across processes.

pub mod atomic;
pub mod lock;

pub use atomic::{atomic_write, atomic_write_file};
pub use lock::acquire_lock;
