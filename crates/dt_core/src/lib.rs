pub mod config;
pub mod error;
pub mod frontmatter;
pub mod source;
pub mod types;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use frontmatter::{parse_front_matter, render_document, FrontMatter};
pub use source::ArticleSource;
pub use types::{ArticleDetail, ArticleSummary};
