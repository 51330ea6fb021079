//! Seed data for a freshly created table.
//!
//! The seed file is a JSON array of records. When it is missing locally it can be
//! fetched as a zip archive and unpacked next to the expected path.

use crate::error::{Error, Result};
use crate::model::Record;

use std::{fs, io, path::Path};

/// Upper bound on the number of records loaded from the seed file.
pub const MAX_SEED_RECORDS: usize = 250;

/// Loads the seed records, downloading the archive when needed.
#[derive(Clone, Debug, Default)]
pub struct SeedLoader {
    archive_url: Option<String>,
}

impl SeedLoader {
    /// A loader that falls back to `archive_url` when the seed file is missing.
    pub fn new(archive_url: Option<String>) -> Self {
        Self { archive_url }
    }

    /// Read the first [`MAX_SEED_RECORDS`] records of the seed file at `path`.
    #[tracing::instrument(name = "dynamodb_anime.load_seed", skip(self))]
    pub async fn load(&self, path: &Path) -> Result<Vec<Record>> {
        if !path.is_file() {
            let Some(url) = &self.archive_url else {
                return Err(Error::SeedFileNotFound {
                    path: path.to_path_buf(),
                });
            };
            tracing::info!(%url, "seed file missing, downloading archive");
            let archive = download(url).await?;
            unpack_seed_archive(&archive, path)?;
        }
        read_records(path)
    }
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tracing::debug!(bytes = bytes.len(), "archive downloaded");
    Ok(bytes.to_vec())
}

/// Extract a zip archive into the directory of `path` and check that it produced `path`.
pub fn unpack_seed_archive(archive: &[u8], path: &Path) -> Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut archive = zip::ZipArchive::new(io::Cursor::new(archive))?;
    archive.extract(directory)?;
    tracing::debug!(entries = archive.len(), directory = %directory.display(), "archive extracted");
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::SeedFileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Parse the seed file, keeping the first [`MAX_SEED_RECORDS`] entries in file order.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = fs::File::open(path)?;
    let mut records: Vec<Record> = serde_json::from_reader(io::BufReader::new(file))?;
    if records.len() > MAX_SEED_RECORDS {
        tracing::debug!(total = records.len(), kept = MAX_SEED_RECORDS, "truncating seed data");
        records.truncate(MAX_SEED_RECORDS);
    }
    Ok(records)
}
