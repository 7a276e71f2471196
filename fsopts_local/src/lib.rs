//! Option builders for schemes backed by the local machine: plain files,
//! the in-memory file system and archive formats.
//!
//! `file`, `tmp` and the non-zip archive schemes only understand the
//! options of [`fsopts::DefaultConfigBuilder`].

mod provider;
mod ram;
mod zip;

pub use self::{
    provider::{CompressedFileProvider, LocalProvider, RamProvider, TarProvider, ZipProvider},
    ram::RamConfigBuilder,
    zip::{ZipConfigBuilder, ZipOptionError},
};
