//! Command handlers.
//!
//! Handlers run inside the sync executor and print their own summaries;
//! progress comes from the emitter they are given.

pub mod download_lesson_list;
pub mod download_lessons;
