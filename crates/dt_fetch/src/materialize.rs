use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dt_core::{render_document, ArticleDetail, Error, FrontMatter, Result, SyncConfig};
use tracing::{debug, info};

/// Writes fetched articles as front-matter markdown files into an existing
/// output directory.
#[derive(Debug, Clone)]
pub struct Materializer {
    output_dir: PathBuf,
    file_prefix: String,
    route_prefix: String,
}

impl Materializer {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
        route_prefix: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
            route_prefix: route_prefix.into(),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            config.output_dir.clone(),
            config.file_prefix.clone(),
            config.route_prefix.clone(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The directory is never created here.
    pub async fn ensure_output_dir(&self) -> Result<()> {
        match tokio::fs::metadata(&self.output_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::Config(format!(
                "output path {} is not a directory",
                self.output_dir.display()
            ))),
            Err(e) => Err(Error::Config(format!(
                "output directory {} is not usable: {}",
                self.output_dir.display(),
                e
            ))),
        }
    }

    /// `<output_dir>/<file_prefix><slug>.md`
    pub fn path_for(&self, slug: &str) -> Result<PathBuf> {
        if slug.is_empty() || slug == "." || slug.contains("..") || slug.contains(&['/', '\\'][..])
        {
            return Err(Error::InvalidSlug(slug.to_string()));
        }
        Ok(self
            .output_dir
            .join(format!("{}{}.md", self.file_prefix, slug)))
    }

    pub fn render(&self, detail: &ArticleDetail) -> String {
        let front_matter = FrontMatter::from_detail(detail, &self.route_prefix);
        render_document(&front_matter, &detail.body_markdown)
    }

    /// Creates or truncates the article's file.
    pub async fn write(&self, detail: &ArticleDetail) -> Result<PathBuf> {
        let path = self.path_for(&detail.slug)?;
        tokio::fs::write(&path, self.render(detail)).await?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Deletes prefixed markdown files whose slug is not in `keep`.
    pub async fn prune(&self, keep: &HashSet<String>) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.output_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(slug) = file_name
                .to_str()
                .and_then(|name| name.strip_prefix(self.file_prefix.as_str()))
                .and_then(|rest| rest.strip_suffix(".md"))
            else {
                continue;
            };
            if keep.contains(slug) {
                continue;
            }

            let path = entry.path();
            tokio::fs::remove_file(&path).await?;
            info!("🧹 removed stale {}", path.display());
            removed.push(path);
        }

        removed.sort();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_detail;
    use dt_core::parse_front_matter;
    use tempfile::TempDir;

    fn materializer(dir: &TempDir) -> Materializer {
        Materializer::new(dir.path(), "dev-to-", "/blog")
    }

    #[test]
    fn test_path_for() {
        let m = Materializer::new("/site/posts", "dev-to-", "/blog");
        assert_eq!(
            m.path_for("hello-1a2b").unwrap(),
            PathBuf::from("/site/posts/dev-to-hello-1a2b.md")
        );
    }

    #[test]
    fn test_path_for_rejects_escaping_slugs() {
        let m = Materializer::new("/site/posts", "dev-to-", "/blog");
        for slug in ["", ".", "..", "../etc", "a/b", "a\\b"] {
            assert!(
                matches!(m.path_for(slug), Err(Error::InvalidSlug(_))),
                "accepted {:?}",
                slug
            );
        }
    }

    #[tokio::test]
    async fn test_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let m = materializer(&dir);
        let detail = sample_detail("hello");

        let path = m.write(&detail).await.unwrap();
        assert_eq!(path, dir.path().join("dev-to-hello.md"));

        let content = std::fs::read_to_string(&path).unwrap();
        let (entries, body) = parse_front_matter(&content).unwrap();
        assert_eq!(entries[0], ("slug".to_string(), "/blog/hello".to_string()));
        assert_eq!(entries[5], ("readingTime".to_string(), "3".to_string()));
        assert_eq!(body, detail.body_markdown);
    }

    #[tokio::test]
    async fn test_write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let m = materializer(&dir);
        let path = dir.path().join("dev-to-hello.md");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();

        let detail = sample_detail("hello");
        m.write(&detail).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), m.render(&detail));
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let m = Materializer::new(dir.path().join("missing"), "dev-to-", "/blog");
        assert!(matches!(
            m.write(&sample_detail("hello")).await,
            Err(Error::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_ensure_output_dir() {
        let dir = TempDir::new().unwrap();
        assert!(materializer(&dir).ensure_output_dir().await.is_ok());

        let missing = Materializer::new(dir.path().join("missing"), "dev-to-", "/blog");
        assert!(matches!(
            missing.ensure_output_dir().await,
            Err(Error::Config(_))
        ));

        let file = dir.path().join("file.md");
        std::fs::write(&file, "").unwrap();
        let not_dir = Materializer::new(file, "dev-to-", "/blog");
        assert!(matches!(
            not_dir.ensure_output_dir().await,
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_prune_removes_only_unlisted_prefixed_files() {
        let dir = TempDir::new().unwrap();
        let m = materializer(&dir);
        for name in [
            "dev-to-keep.md",
            "dev-to-gone.md",
            "about.md",
            "dev-to-notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("dev-to-dir.md")).unwrap();

        let keep: HashSet<String> = ["keep".to_string()].into_iter().collect();
        let removed = m.prune(&keep).await.unwrap();

        assert_eq!(removed, vec![dir.path().join("dev-to-gone.md")]);
        assert!(dir.path().join("dev-to-keep.md").exists());
        assert!(dir.path().join("about.md").exists());
        assert!(dir.path().join("dev-to-notes.txt").exists());
        assert!(dir.path().join("dev-to-dir.md").is_dir());
    }
}
