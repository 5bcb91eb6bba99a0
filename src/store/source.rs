//! Post sources: where the collection is read from.
//!
//! The load is a single read-only request with no parameters. There is no retry,
//! no caching and no partial result: either every record decodes or the load fails.

use crate::error::{PostdeckError, Result};
use crate::store::Post;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Collaborator that produces the whole post collection in one shot.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch and decode every post
    async fn load(&self) -> Result<Vec<Post>>;

    /// Short name for messages and logs (usually a path)
    fn describe(&self) -> String;
}

/// Reads a JSON array of posts from disk.
#[derive(Debug, Clone)]
pub struct JsonFilePostSource {
    path: PathBuf,
}

impl JsonFilePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PostSource for JsonFilePostSource {
    async fn load(&self) -> Result<Vec<Post>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PostdeckError::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                PostdeckError::load_failure(self.describe(), e.to_string())
            }
        })?;

        let posts: Vec<Post> = serde_json::from_slice(&bytes)?;
        Ok(posts)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory source, handy for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPostSource {
    posts: Vec<Post>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn load(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }

    fn describe(&self) -> String {
        "built-in posts".to_string()
    }
}
