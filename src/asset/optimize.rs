//! Asset optimization: read, measure, fingerprint, emit.
//!
//! The emitted file is `{stem}.{hash}.{ext}` where `hash` is the first
//! eight hex chars of the blake3 digest, so unchanged images keep their URL
//! across builds.

use super::{AssetDescriptor, AssetError};
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

/// Length of the content fingerprint in file names.
const HASH_LEN: usize = 8;

/// Optimize `source` into `out_dir`, returning its descriptor.
///
/// `public_prefix` is the site-relative directory `out_dir` is served
/// from, e.g. `/_assets`.
pub(super) async fn optimize(
    source: &Path,
    out_dir: &Path,
    public_prefix: &str,
) -> Result<AssetDescriptor, AssetError> {
    let bytes = tokio::fs::read(source)
        .await
        .map_err(|err| AssetError::Io(source.to_path_buf(), err))?;

    let (width, height) = dimensions(source, &bytes)?;
    let file_name = fingerprinted_name(source, &bytes);

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|err| AssetError::Io(out_dir.to_path_buf(), err))?;
    let target = out_dir.join(&file_name);
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|err| AssetError::Io(target.clone(), err))?;

    let src = format!("{}/{}", public_prefix.trim_end_matches('/'), file_name);
    Ok(AssetDescriptor::new(src, width, height))
}

fn dimensions(source: &Path, bytes: &[u8]) -> Result<(u32, u32), AssetError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| AssetError::Io(source.to_path_buf(), err))?
        .into_dimensions()
        .map_err(|err| AssetError::Decode(source.to_path_buf(), err))
}

/// `images/cat.png` + content → `cat.1a2b3c4d.png`
fn fingerprinted_name(source: &Path, bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes).to_hex();
    let hash = &hash.as_str()[..HASH_LEN];
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    match source.extension() {
        Some(ext) => format!("{stem}.{hash}.{}", ext.to_string_lossy().to_ascii_lowercase()),
        None => format!("{stem}.{hash}"),
    }
}
