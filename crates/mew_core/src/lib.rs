//! mew_core: Core utilities shared by every stage of the Mew front end.
//!
//! Provides text spans and source locations, line maps for rendering,
//! and the name interner used by the binder's scope tables.

pub mod intern;
pub mod text;

pub use intern::{Name, NameInterner};
pub use text::{LineAndColumn, LineMap, Location, TextPos, TextSpan};
