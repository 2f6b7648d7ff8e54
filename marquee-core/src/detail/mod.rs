//! Detail domain - which movie is open, and its resolved record

pub mod resolver;
pub mod selection;

pub use self::resolver::{DetailResolver, DetailState};
pub use self::selection::{Selection, SelectionState};
