//! # Agent Tools
//!
//! Function tools handed to specialists inside their sessions.

pub mod file_tools;

pub use file_tools::{advanced_file_writer, SavedFile, WriteLedger, FILE_WRITER_TOOL};
