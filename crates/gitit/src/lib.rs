//! git-it - issue tracking that lives in your repository.
//!
//! Tickets are plain text files stored under `<ticket root>/<release>/<id>`.
//! This crate provides the `it` command-line tool and the library behind it:
//! ticket storage, rendering, and the interactive ticket dialogue. The file
//! format itself lives in `gitit-format`.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod id_generation;
pub mod identity;
pub mod output;
pub mod storage;

pub use error::{Error, Result};
pub use storage::TicketStore;
