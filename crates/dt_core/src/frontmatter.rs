use crate::types::ArticleDetail;
use crate::{Error, Result};

pub const DELIMITER: &str = "---";

/// Front-matter keys, in the order they are written.
pub const KEYS: [&str; 9] = [
    "slug",
    "date",
    "readableDate",
    "title",
    "preview",
    "readingTime",
    "reactionsCount",
    "commentsCount",
    "url",
];

/// Metadata block written at the top of every emitted post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub slug: String,
    pub date: String,
    pub readable_date: String,
    pub title: String,
    pub preview: String,
    pub reading_time: u32,
    pub reactions_count: u64,
    pub comments_count: u64,
    pub url: String,
}

impl FrontMatter {
    pub fn from_detail(detail: &ArticleDetail, route_prefix: &str) -> Self {
        Self {
            slug: format!("{}/{}", route_prefix.trim_end_matches('/'), detail.slug),
            date: detail.created_at.clone(),
            readable_date: detail.readable_publish_date.clone(),
            title: detail.title.clone(),
            preview: detail.description.clone(),
            reading_time: detail.reading_time_minutes,
            reactions_count: detail.public_reactions_count,
            comments_count: detail.comments_count,
            url: detail.url.clone(),
        }
    }

    /// All values as strings, keyed and ordered as in [`KEYS`].
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let values = [
            self.slug.clone(),
            self.date.clone(),
            self.readable_date.clone(),
            self.title.clone(),
            self.preview.clone(),
            self.reading_time.to_string(),
            self.reactions_count.to_string(),
            self.comments_count.to_string(),
            self.url.clone(),
        ];
        KEYS.into_iter().zip(values).collect()
    }

    pub fn render(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(key, value)| format!("{}: \"{}\"", key, escape(&value)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `---\n<front-matter>\n---\n<body>`
pub fn render_document(front_matter: &FrontMatter, body: &str) -> String {
    format!(
        "{delim}\n{}\n{delim}\n{}",
        front_matter.render(),
        body,
        delim = DELIMITER
    )
}

/// Splits a document produced by [`render_document`] into its ordered
/// key/value pairs and the body that follows the closing delimiter.
pub fn parse_front_matter(document: &str) -> Result<(Vec<(String, String)>, &str)> {
    let rest = document
        .strip_prefix("---\n")
        .ok_or_else(|| Error::FrontMatter("missing opening delimiter".to_string()))?;

    let (header, body) = match rest.strip_prefix("---\n") {
        Some(body) => ("", body),
        None => {
            let end = rest
                .find("\n---\n")
                .ok_or_else(|| Error::FrontMatter("missing closing delimiter".to_string()))?;
            (&rest[..end], &rest[end + 5..])
        }
    };

    let mut entries = Vec::new();
    for line in header.lines() {
        let (key, raw) = line
            .split_once(": ")
            .ok_or_else(|| Error::FrontMatter(format!("malformed line: {}", line)))?;
        let quoted = raw
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(|| Error::FrontMatter(format!("unquoted value for {}", key)))?;
        entries.push((key.to_string(), unescape(quoted)?));
    }

    Ok((entries, body))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            other => {
                return Err(Error::FrontMatter(format!(
                    "unsupported escape sequence: \\{}",
                    other.map(String::from).unwrap_or_default()
                )))
            }
        }
    }
    Ok(out)
}
