//! Page controllers: one orchestrator per page, the actions they accept and
//! the dispatch glue between them.

pub mod admin;
pub mod events;
pub mod orchestration;
pub mod save_button;
pub mod sequence;
pub mod user;
