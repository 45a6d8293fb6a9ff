//! # Recurring-Timetable Engine
//!
//! Core scheduling engine for a school administration backend.
//!
//! This crate implements the three pieces of the timetable subsystem that the
//! surrounding CRUD application delegates to:
//!
//! - **Recurrence expansion**: turn a weekly day/time pattern plus a date
//!   range into concrete, dated lesson instances
//! - **Bell-grid resolution**: place a day's lesson instances into the
//!   institution's fixed bell schedule (periods and breaks) to produce a
//!   displayable period-by-weekday grid
//! - **Schedule caching**: keep resolved day schedules warm with staleness
//!   and eviction windows and a whole-week preload
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Public identifier newtypes shared across the data model
//! - [`models`]: Domain types (recurrence requests, lesson instances, bell
//!   periods, schedule grids)
//! - [`services`]: The expander, grid resolver, and schedule cache
//! - [`source`]: Traits for the external collaborators the engine consumes
//!   (lesson fetch, bell-period configuration)
//!
//! The expander and resolver are pure functions: no I/O, fresh values out,
//! safe to call from any number of concurrent callers. The cache is the one
//! stateful component; it is a cheap-to-clone shared handle, constructed once
//! per logical session and passed explicitly rather than held in a global.
//!
//! Authorization, persistence, file storage, exports, and presentation are
//! all external collaborators; the engine receives already-validated entity
//! references and returns structured schedule data.

pub mod api;

pub mod error;
pub mod models;

pub mod services;

pub mod source;

pub use error::{EngineError, EngineResult};
