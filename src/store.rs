//! Post records and the one-shot collection loaded at startup.
//!
//! The store is populated once from a [`PostSource`] and never mutated afterwards.
//! Sources are async so the load can run as a task while the terminal is already up.

pub mod post;
pub mod source;

pub use post::{parse_post_date, Post};
pub use source::{JsonFilePostSource, PostSource, StaticPostSource};

use crate::error::{PostdeckError, Result};
use log::{debug, info};
use std::sync::Arc;

/// Immutable, ordered collection of posts.
///
/// Cloning is cheap: the records are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Arc<[Post]>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::from(posts),
        }
    }

    /// Store with no posts, the state before the load completes
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load the whole collection from `source` in one request.
    ///
    /// Every error comes back as a load failure naming the source.
    pub async fn load_from(source: &dyn PostSource) -> Result<Self> {
        debug!("loading posts from {}", source.describe());
        let posts = source.load().await.map_err(|e| match e {
            PostdeckError::LoadFailure { .. } => e,
            other => PostdeckError::load_failure(source.describe(), other.to_string()),
        })?;
        info!("loaded {} posts from {}", posts.len(), source.describe());
        Ok(Self::new(posts))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a PostStore {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(title: &str) -> Post {
        Post::new(
            title,
            "summary",
            "tech",
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        )
    }

    #[test]
    fn empty_store_has_no_posts() {
        let store = PostStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.posts().is_empty());
    }

    #[test]
    fn clones_share_records_in_order() {
        let store = PostStore::new(vec![post("a"), post("b")]);
        let copy = store.clone();

        let titles: Vec<&str> = copy.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert!(std::ptr::eq(store.posts().as_ptr(), copy.posts().as_ptr()));
    }

    struct BrokenSource;

    #[async_trait::async_trait]
    impl PostSource for BrokenSource {
        async fn load(&self) -> Result<Vec<Post>> {
            Err(PostdeckError::file_error(
                "Cannot read posts",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }

        fn describe(&self) -> String {
            "broken source".to_string()
        }
    }

    #[tokio::test]
    async fn source_errors_become_load_failures() {
        let err = PostStore::load_from(&BrokenSource).await.unwrap_err();

        assert!(err.is_load_failure());
        match err {
            PostdeckError::LoadFailure {
                source_name,
                message,
            } => {
                assert_eq!(source_name, "broken source");
                assert!(message.contains("Cannot read posts"));
            }
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_from_static_source() {
        let source = StaticPostSource::new(vec![post("only")]);
        let store = PostStore::load_from(&source).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.posts()[0].title, "only");
    }
}
