//! HTTP accessor for a virtual filesystem endpoint.
//!
//! Every request is `GET <base_url><prefix><path>`. A directory path returns a
//! JSON array of `{ "name": ..., "type": "file" | "directory" }`, a file path
//! returns the raw content. Any non-2xx status is a failure for that request.

use super::FileSystem;
use crate::error::FsError;
use crate::error::RequestKind;
use crate::types::DirEntry;
use crate::types::VirtualPath;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Default mount point of the filesystem endpoint on the host.
pub const DEFAULT_PREFIX: &str = "/__webcontainer/fs";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Virtual filesystem served over HTTP.
///
/// The client is pooled and can be shared across tasks.
///
/// # Examples
///
/// ```no_run
/// use vfs_export_core::fs::HttpFileSystem;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), vfs_export_core::error::FsError> {
/// let fs = HttpFileSystem::builder("http://localhost:5173")
///     .prefix("/__webcontainer/fs")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpFileSystem {
    base_url: Url,
    prefix: String,
    client: Client,
}

impl HttpFileSystem {
    /// Creates an accessor with the default prefix and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, FsError> {
        Self::builder(base_url).build()
    }

    /// Starts building an accessor for `base_url`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> HttpFileSystemBuilder {
        HttpFileSystemBuilder {
            base_url: base_url.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns the prefix requests are mounted under.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the request URL for a virtual path.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_export_core::fs::HttpFileSystem;
    /// use vfs_export_core::types::VirtualPath;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let fs = HttpFileSystem::new("http://localhost:5173")?;
    /// let url = fs.url_for(&VirtualPath::parse("/src/")?);
    /// assert_eq!(url.as_str(), "http://localhost:5173/__webcontainer/fs/src/");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn url_for(&self, path: &VirtualPath) -> Url {
        let mut url = self.base_url.clone();
        let base = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{base}{}{path}", self.prefix));
        url
    }

    async fn get(&self, path: &VirtualPath, kind: RequestKind) -> Result<Vec<u8>, FsError> {
        let url = self.url_for(path);
        debug!(%url, %kind, "requesting");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FsError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FsError::Status {
                kind,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FsError::Transport {
            path: path.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FileSystem for HttpFileSystem {
    async fn read_dir(&self, path: &VirtualPath) -> Result<Vec<DirEntry>, FsError> {
        let body = self.get(path, RequestKind::Directory).await?;
        serde_json::from_slice(&body).map_err(|source| FsError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn read_file(&self, path: &VirtualPath) -> Result<Vec<u8>, FsError> {
        self.get(path, RequestKind::File).await
    }
}

/// Builder for [`HttpFileSystem`].
#[derive(Debug, Clone)]
pub struct HttpFileSystemBuilder {
    base_url: String,
    prefix: String,
    timeout: Duration,
}

impl HttpFileSystemBuilder {
    /// Sets the mount prefix (default `/__webcontainer/fs`).
    ///
    /// A missing leading `/` is added and trailing `/` are removed; an empty
    /// prefix mounts the filesystem at the base URL itself.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the per-request timeout (default 30 s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the accessor.
    ///
    /// # Errors
    ///
    /// Returns `FsError::InvalidUrl` if the base URL cannot be parsed or is not
    /// `http`/`https`, and `FsError::Client` if the HTTP client fails to build.
    pub fn build(self) -> Result<HttpFileSystem, FsError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| FsError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FsError::InvalidUrl {
                url: self.base_url,
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(FsError::Client)?;

        Ok(HttpFileSystem {
            base_url,
            prefix: normalize_prefix(&self.prefix),
            client,
        })
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn path(s: &str) -> VirtualPath {
        VirtualPath::parse(s).unwrap()
    }

    #[test]
    fn test_url_for_default_prefix() {
        let fs = HttpFileSystem::new("http://localhost:5173").unwrap();
        assert_eq!(
            fs.url_for(&VirtualPath::root()).as_str(),
            "http://localhost:5173/__webcontainer/fs/"
        );
        assert_eq!(
            fs.url_for(&path("/src/a.ts")).as_str(),
            "http://localhost:5173/__webcontainer/fs/src/a.ts"
        );
    }

    #[test]
    fn test_url_for_base_with_path() {
        let fs = HttpFileSystem::new("http://localhost:5173/app/").unwrap();
        assert_eq!(
            fs.url_for(&path("/index.html")).as_str(),
            "http://localhost:5173/app/__webcontainer/fs/index.html"
        );
    }

    #[test]
    fn test_url_for_escapes_reserved_characters() {
        let fs = HttpFileSystem::new("http://localhost").unwrap();
        let url = fs.url_for(&path("/my file#1.txt"));
        assert_eq!(url.path(), "/__webcontainer/fs/my%20file%231.txt");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_custom_prefix_normalized() {
        let fs = HttpFileSystem::builder("http://localhost")
            .prefix("vfs/")
            .build()
            .unwrap();
        assert_eq!(fs.prefix(), "/vfs");
        assert_eq!(
            fs.url_for(&path("/a.txt")).as_str(),
            "http://localhost/vfs/a.txt"
        );
    }

    #[test]
    fn test_empty_prefix() {
        let fs = HttpFileSystem::builder("http://localhost")
            .prefix("")
            .build()
            .unwrap();
        assert_eq!(fs.url_for(&path("/a.txt")).as_str(), "http://localhost/a.txt");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpFileSystem::new("not a url").unwrap_err();
        assert!(matches!(err, FsError::InvalidUrl { .. }));

        let err = HttpFileSystem::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, FsError::InvalidUrl { .. }));
    }
}
