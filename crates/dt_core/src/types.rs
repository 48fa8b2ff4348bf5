use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the `/articles/latest` listing. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
}

/// The full article as returned by `/articles/{username}/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub slug: String,
    pub title: String,
    /// A JSON `null` is read as `""`, so the front-matter gets `preview: ""`
    /// rather than the literal string `"null"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub created_at: String,
    /// `null` is read as `""`, like `description`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub readable_publish_date: String,
    #[serde(default)]
    pub reading_time_minutes: u32,
    #[serde(default)]
    pub public_reactions_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body_markdown: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
