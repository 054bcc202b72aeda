//! Page state and command bindings.

mod bindings;
mod router;

pub use bindings::{bindings, resolve, Action, Binding};
pub use router::{PageId, ViewRouter};
