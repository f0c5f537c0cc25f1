#![forbid(unsafe_code)]

//! Memoir book data model and its local collaborators (headless).
//!
//! Design goals:
//! - the book tree is a plain value; rendering consumes read-only snapshots
//! - persisted snapshots from older schema versions always load (missing fields take defaults)
//! - runtime-agnostic async APIs (no specific executor required)

pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod service;
pub mod storage;

pub use config::MemoirConfig;
pub use error::{Error, Result};
pub use model::{Book, Chapter, LayoutKind, Page, Photo, PhotoSource, Theme};
pub use service::{BookService, LocalBookService, PhotoUpload, STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

#[cfg(test)]
mod tests;
