//! Tasks Module
//!
//! Background maintenance for the cache: the periodic expiration sweep.

mod sweeper;

pub(crate) use sweeper::{spawn_sweeper, SweeperHandle};
