//! Raw file retrieval over HTTP.

use std::io::{Cursor, Read};
use std::time::Duration;

use tracing::debug;

use crate::error::{DataError, Result};

/// User agent sent with every request.
const USER_AGENT: &str = "tuck/0.1 (+https://github.com/factordynamics/tuck)";

/// Request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// ZIP local-file-header magic bytes.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Retrieves the raw text of an upstream resource.
pub trait Fetcher {
    /// Fetches `url` and returns its content as text.
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher.
///
/// The data library serves each CSV inside a single-member ZIP archive;
/// ZIP payloads are unpacked transparently to the text of their first
/// member. Non-success HTTP statuses are errors.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default user agent and timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        debug!("fetched {} bytes from {url}", bytes.len());

        if looks_like_zip(url, &bytes) {
            unpack_zip_text(&bytes)
        } else {
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn looks_like_zip(url: &str, bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || url.to_ascii_lowercase().ends_with(".zip")
}

/// Unpacks the first member of a ZIP archive as text.
fn unpack_zip_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut member = archive.by_index(0)?;
    debug!("unpacking archive member {:?}", member.name());

    let mut text = String::with_capacity(member.size() as usize);
    member.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with_member(name: &str, content: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_zip_detection() {
        assert!(looks_like_zip("http://x/file.bin", ZIP_MAGIC));
        assert!(looks_like_zip("http://x/F-F_Research_Data_Factors_CSV.zip", b""));
        assert!(!looks_like_zip("http://x/file.csv", b"192607,2.96"));
    }

    #[test]
    fn test_unpack_zip_text() {
        let bytes = zip_with_member("F-F_Research_Data_Factors.CSV", "192607,2.96,-2.56\n");
        assert_eq!(unpack_zip_text(&bytes).unwrap(), "192607,2.96,-2.56\n");
    }

    #[test]
    fn test_unpack_empty_archive_is_an_error() {
        let bytes = {
            let writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
            writer.finish().unwrap().into_inner()
        };
        assert!(unpack_zip_text(&bytes).is_err());
    }

    #[test]
    fn test_unpack_garbage_is_an_error() {
        assert!(unpack_zip_text(b"not a zip archive").is_err());
    }
}
