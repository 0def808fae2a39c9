//! The assistant conversation session.
//!
//! Leaf first: `log_adapter` replays persisted history, `quota` and
//! `suggestions` derive and police session state, `turn` runs one
//! question/answer round trip, `bootstrap` seeds a fresh activation, and
//! `session` ties them together behind `ChatSession`.

pub mod bootstrap;
pub mod cell;
pub mod log_adapter;
pub mod quota;
pub mod session;
pub mod suggestions;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing;
