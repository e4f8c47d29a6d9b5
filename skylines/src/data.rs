//! Acquisition of the upstream source files.
//!
//! Both inputs are published upstream: the KStars constellation line
//! description and the HYG star database. A file already present in the
//! data directory is reused as-is, so a run never re-downloads a catalog
//! it already has.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::Error;

/// KStars constellation line description.
pub const CLINES_URL: &str = "https://cdn.jsdelivr.net/gh/KDE/kstars/kstars/data/clines.dat";
/// HYG star database, version 3.
pub const HYGDATA_URL: &str =
    "https://raw.githubusercontent.com/astronexus/HYG-Database/master/hygdata_v3.csv";

/// File names under the data directory.
pub const CLINES_FILE: &str = "clines.dat";
pub const HYGDATA_FILE: &str = "hygdata_v3.csv";

/// Download `url` to `path` unless the file already exists.
pub fn fetch_if_missing(path: &Path, url: &str) -> Result<(), Error> {
    if path.exists() {
        return Ok(());
    }

    info!("Downloading {url}");
    let download_err = |source| Error::Download {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(download_err)?;
    let body = response.bytes().map_err(download_err)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &body)?;
    info!("Saved {} ({} bytes)", path.display(), body.len());
    Ok(())
}
