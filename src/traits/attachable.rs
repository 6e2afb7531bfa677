//! Attachable trait for records that hold files and links.

use std::path::Path;

use async_trait::async_trait;

use crate::connection::SlickConnection;
use crate::error::Result;
use crate::models::{Link, StoredFile};

/// A record that can have files and links attached to it.
///
/// Implementors provide access to their connection and attachment lists
/// plus a way to save themselves; uploading and linking come for free.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use slickqa::{Attachable, ResultHandle, SlickConnection};
///
/// let slick = SlickConnection::from_env()?;
/// let mut handle = ResultHandle::new(result, slick);
/// handle.add_file(Path::new("screenshot.png"), None).await?;
/// handle.add_link("Build log", "https://ci.example.com/42").await?;
/// ```
#[async_trait]
pub trait Attachable: Send {
    fn connection(&self) -> &SlickConnection;

    fn files_mut(&mut self) -> &mut Option<Vec<StoredFile>>;

    fn links_mut(&mut self) -> &mut Option<Vec<Link>>;

    /// Save the record to slick, replacing it with the server's copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no id or the request fails.
    async fn update(&mut self) -> Result<()>;

    /// Upload a file, attach it, then save the record.
    ///
    /// Returns the stored file, or `None` when there was nothing to
    /// upload; the record is saved either way.
    async fn add_file(&mut self, path: &Path, contents: Option<&[u8]>) -> Result<Option<StoredFile>> {
        let mut files = self.connection().files();
        let stored = files.upload_local_file(path, contents).await?;
        if let Some(file) = &stored {
            self.files_mut().get_or_insert_with(Vec::new).push(file.clone());
        }
        self.update().await?;
        Ok(stored)
    }

    /// Attach a named link, then save the record.
    async fn add_link(&mut self, name: &str, url: &str) -> Result<()> {
        self.links_mut()
            .get_or_insert_with(Vec::new)
            .push(Link::new(name, url));
        self.update().await
    }
}
