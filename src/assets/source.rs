//! Byte sources the loader fetches textures from

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use futures::{channel::oneshot, future::BoxFuture, FutureExt};

use super::{progress::ByteProgress, request::AssetRequest, AssetLoadError};

/// Asynchronous transport for encoded texture bytes
///
/// Implementations report partial bytes through `progress` when they can; the
/// loader falls back to per-request granularity otherwise.
pub trait TextureSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: &'a AssetRequest,
        progress: ByteProgress,
    ) -> BoxFuture<'a, Result<Vec<u8>, AssetLoadError>>;
}

/// Reads textures from a directory, one worker thread per request
pub struct FileTextureSource {
    root: PathBuf,
    chunk_bytes: usize,
}

impl FileTextureSource {
    pub const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            chunk_bytes: Self::DEFAULT_CHUNK_BYTES,
        }
    }

    /// Builder pattern: set how many bytes are read between progress reports
    pub fn with_chunk_bytes(mut self, chunk_bytes: usize) -> Self {
        self.chunk_bytes = chunk_bytes.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for FileTextureSource {
    fn fetch<'a>(
        &'a self,
        request: &'a AssetRequest,
        progress: ByteProgress,
    ) -> BoxFuture<'a, Result<Vec<u8>, AssetLoadError>> {
        let url = request.url.clone();
        let path = self.root.join(&request.url);
        let chunk_bytes = self.chunk_bytes;
        let (sender, receiver) = oneshot::channel();

        let spawned = std::thread::Builder::new()
            .name(format!("fetch {}", url))
            .spawn(move || {
                // The receiver is gone when the bundle already failed
                let _ = sender.send(read_chunked(&path, chunk_bytes, &progress));
            });

        async move {
            if let Err(e) = spawned {
                return Err(AssetLoadError::Fetch {
                    url,
                    reason: format!("could not start fetch worker: {}", e),
                });
            }
            match receiver.await {
                Ok(Ok(bytes)) => Ok(bytes),
                Ok(Err(e)) => Err(AssetLoadError::Fetch {
                    url,
                    reason: e.to_string(),
                }),
                Err(_) => Err(AssetLoadError::Cancelled(url)),
            }
        }
        .boxed()
    }
}

fn read_chunked(path: &Path, chunk_bytes: usize, progress: &ByteProgress) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let total = file.metadata().map(|metadata| metadata.len()).unwrap_or(0);
    let mut bytes = Vec::with_capacity(total as usize);
    let mut chunk = vec![0u8; chunk_bytes];

    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        progress.report(bytes.len() as u64, total);
    }

    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}
