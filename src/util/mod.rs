//! Pure presentation helpers shared by views and the CLI.

pub mod access;
pub mod time;
pub mod toast;
pub mod validate;
