use crate::error::Result;
use crate::github::ReleaseInfo;
use std::path::Path;

pub trait DownloadClient {
    /// Fetches the latest published release of `repo` (`owner/name`).
    fn latest_release(&self, repo: &str) -> impl Future<Output = Result<ReleaseInfo>> + Send;

    /// Streams the body of `url` into `output_path`, truncating any existing file.
    fn download(&self, url: &str, output_path: &Path) -> impl Future<Output = Result<()>> + Send;
}
