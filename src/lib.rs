//! sheetpress - Spreadsheet rows to WordPress WXR import files
//!
//! This crate turns rows of participant-bio survey responses into a WordPress
//! eXtended RSS (WXR) document that can be loaded with WordPress's importer.
//! Each row becomes one post: a title, an HTML body, a permalink slug and a list
//! of `post_tag` categories.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sheetpress::{ExporterBuilder, WorkbookSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create an exporter with default settings
//!     let exporter = ExporterBuilder::new().build()?;
//!
//!     // Read the "Bios" sheet of a spreadsheet export
//!     let source = WorkbookSource::open("responses.xlsx", "Bios!A2:R35");
//!
//!     // Write the WXR document
//!     let summary = exporter.run(&source, Path::new("output/bio_posts.xml"))?;
//!     println!("{} posts", summary.entries);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Row Layout
//!
//! | Column | Field |
//! | --- | --- |
//! | A | Email (the part before `@` becomes the post slug) |
//! | B | Aliases, separated by `", "` |
//! | C | Display name (post title) |
//! | D | Pronoun |
//! | E | Bio |
//! | F | (unused) |
//! | G | Website |
//! | H | Role not tied to a project |
//! | I, J, ... | (project title, role) pairs |
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use sheetpress::{ExporterBuilder, NameStyle, OutputFormat, RowErrorPolicy, WriteMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = ExporterBuilder::new()
//!         .with_start_id(201)
//!         .with_site_url("https://example.org/festival")
//!         .with_name_style(NameStyle::Comma)  // <b>Jo Lin, she/her</b>
//!         .with_row_error_policy(RowErrorPolicy::Skip)  // skip malformed rows
//!         .with_write_mode(WriteMode::FailIfExists)
//!         .with_output_format(OutputFormat::Json)  // preview before importing
//!         .with_image("jlin@example.com", "jlin.jpg")
//!         .build()?;
//!
//!     let rows = vec![vec!["jlin@example.com".to_string(); 8]];
//!     let json = exporter.export_to_string(&rows)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod config;
mod error;
mod formatter;
mod output;
mod row;
mod slug;
mod source;
mod tags;
mod types;

// 公開API
pub use api::{AmpersandPolicy, NameStyle, OutputFormat, RowErrorPolicy, TagSchema, WriteMode};
pub use builder::{ExportSummary, Exporter, ExporterBuilder};
pub use config::{
    AuthorSettings, CategorySettings, EntrySettings, FileConfig, OutputSettings, PostSettings,
    SiteSettings, SourceSettings,
};
pub use error::SheetPressError;
pub use slug::slugify;
pub use source::{RowSource, VecSource, WorkbookSource};
pub use types::{Entry, Row, Tag};
