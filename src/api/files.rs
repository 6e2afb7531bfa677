//! Chunked upload of stored files.

use std::path::Path;

use md5::{Digest, Md5};
use reqwest::Method;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::api::ApiPart;
use crate::client::{RequestBody, SlickClient};
use crate::error::{Result, SlickError};
use crate::models::StoredFile;

/// Chunk size used when the server does not announce one.
pub const DEFAULT_CHUNK_SIZE: u64 = 262_144;

impl ApiPart<StoredFile> {
    /// Upload a local file, or in-memory `contents` under that file name.
    ///
    /// Returns `Ok(None)` without contacting slick when the path does not
    /// exist and no contents were given. Chunks already sent are not
    /// rolled back if a later chunk fails.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn upload_local_file(
        &mut self,
        path: impl AsRef<Path>,
        contents: Option<&[u8]>,
    ) -> Result<Option<StoredFile>> {
        let path = path.as_ref();

        let length = match contents {
            Some(bytes) => bytes.len() as u64,
            None => match tokio::fs::metadata(path).await {
                Ok(meta) => meta.len(),
                Err(error) => {
                    tracing::debug!(%error, "Nothing to upload");
                    return Ok(None);
                }
            },
        };

        let record = StoredFile {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            mimetype: Some(mime_guess::from_path(path).first_or_octet_stream().to_string()),
            length: Some(length as i64),
            ..Default::default()
        };

        let created = self.create(&record).await?;
        let id = created
            .id
            .clone()
            .ok_or(SlickError::MissingId("StoredFile"))?;
        let chunk_size = created
            .chunk_size
            .filter(|size| *size > 0)
            .map_or(DEFAULT_CHUNK_SIZE, |size| size as u64);

        self.set_pending(id.clone());
        let file_url = self.url();

        let digest = match contents {
            Some(mut bytes) => upload_chunks(self.client(), &file_url, &mut bytes, chunk_size).await?,
            None => {
                let mut file = tokio::fs::File::open(path).await?;
                upload_chunks(self.client(), &file_url, &mut file, chunk_size).await?
            }
        };

        self.set_pending(id);
        let mut stored = self.get().await?;
        if stored.md5.as_deref().map_or(true, str::is_empty) {
            stored.md5 = Some(digest);
        }
        Ok(Some(stored))
    }
}

/// Stream `reader` to `<file_url>/addchunk` in `chunk_size` pieces.
///
/// Every chunk but the last is exactly `chunk_size` bytes, however the
/// reader splits its data. Returns the hex MD5 of everything sent.
pub(crate) async fn upload_chunks<R>(
    client: &SlickClient,
    file_url: &str,
    reader: &mut R,
    chunk_size: u64,
) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let url = format!("{file_url}/addchunk");
    let mut hasher = Md5::new();
    let mut sent = 0usize;

    loop {
        // chunk_size comes from the server, so it only bounds the read
        let mut chunk = Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE) as usize);
        (&mut *reader).take(chunk_size).read_to_end(&mut chunk).await?;
        if chunk.is_empty() {
            break;
        }

        hasher.update(&chunk);
        sent += 1;
        tracing::debug!(url, chunk = sent, bytes = chunk.len(), "Uploading chunk");
        client.send(Method::POST, &url, RequestBody::Octets(chunk)).await?;
    }

    Ok(hex::encode(hasher.finalize()))
}
