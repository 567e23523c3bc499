#![doc = "docs-import: move a zipped markdown documentation export into an Ada knowledge base."]

//! The pipeline reads `.md` entries from the archive ([`archive`]), splits
//! their front matter ([`frontmatter`]), keeps the pages ([`document`]),
//! resets the target knowledge source ([`source`]) and uploads every page as
//! an article ([`import`]). The remote service sits behind the
//! [`contract::KnowledgeBase`] trait; [`client::AdaClient`] is the HTTP
//! implementation.

pub mod archive;
pub mod cli;
pub mod client;
pub mod contract;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod import;
pub mod load_config;
pub mod source;

pub use cli::{run, Cli};
