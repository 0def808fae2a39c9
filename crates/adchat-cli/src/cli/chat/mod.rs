//! Interactive terminal chat about one ad.
//!
//! Implements the chat loop on top of `ChatSession`: banner, thinking
//! spinner, numbered suggestions, slash commands and the expert hand-off.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod render;
