//! # quizmanager
//!
//! Client library for the QuizManager quiz administration API.
//!
//! This crate contains the HTTP request layer and the per-domain API clients
//! (`net`), the client-side session and toast stores (`state`), and pure
//! presentation helpers such as relative-time strings, toast payloads and
//! role-based answer visibility (`util`). The `quizctl` binary is a thin
//! command-line front end over the same pieces.

pub mod config;
pub mod net;
pub mod state;
pub mod util;
