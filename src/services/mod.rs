//! Service layer: the three engine components.
//!
//! The expander and grid resolver are pure functions; the schedule cache is
//! the single stateful component. The cache is independent of the resolver
//! (it holds raw lesson-instance lists, not grids), and both are independent
//! of the expander.

pub mod expander;

pub mod grid_resolver;

pub mod schedule_cache;

pub use expander::expand;
pub use grid_resolver::resolve;
pub use schedule_cache::{CacheConfig, CacheKey, PreloadFailure, ScheduleCache};
