//! Request and response models for Graph entities
//!
//! Optional fields are skipped when unset, so a body only carries what the
//! caller filled in. Fields this crate does not model land in
//! `additional_data` and are sent back unchanged.

mod call;
mod call_record;
mod chat;
mod common;
mod employee;
mod meeting;
mod message;
mod presence;

pub use call::*;
pub use call_record::*;
pub use chat::*;
pub use common::*;
pub use employee::*;
pub use meeting::*;
pub use message::*;
pub use presence::*;

/// Graph endpoint used in `@odata.bind` references.
pub(crate) const BIND_BASE: &str = "https://graph.microsoft.com/v1.0";
