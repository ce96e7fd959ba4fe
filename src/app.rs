//! Application module: the player session driven by the TUI and runtime.
//!
//! `App` joins the playlist store and the transport controller, keeps the
//! invariants that span both, and holds the UI-side selection and add form.

mod form;
mod model;

pub use form::*;
pub use model::*;
