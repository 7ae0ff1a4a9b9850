//! Zip extraction with wrapper hoisting.
//!
//! GitHub archives put everything under one `<repo>-<ref>/` folder. The
//! extractor unpacks into the target and then lifts that folder's children
//! up one level, merging into whatever is already there.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use sprig_core::{
    application::{ApplicationError, ports::ArchiveExtractor},
    error::{SprigError, SprigResult},
};
use tracing::{debug, instrument, trace};
use zip::ZipArchive;

/// Production extractor for `.zip` template archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for ZipExtractor {
    #[instrument(skip(self), fields(archive = %archive.display(), dest = %dest.display()))]
    fn extract(&self, archive: &Path, dest: &Path) -> SprigResult<String> {
        let corrupt = |reason: String| -> SprigError {
            ApplicationError::CorruptArchive {
                path: archive.to_path_buf(),
                reason,
            }
            .into()
        };

        let file = File::open(archive).map_err(|e| corrupt(e.to_string()))?;
        let mut zip = ZipArchive::new(file).map_err(|e| corrupt(e.to_string()))?;

        let wrapper = wrapper_name(&mut zip).map_err(corrupt)?;
        debug!(%wrapper, entries = zip.len(), "Archive opened");

        fs::create_dir_all(dest).map_err(|e| fs_error(dest, &e))?;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| corrupt(e.to_string()))?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(corrupt(format!("unsafe entry path: {}", entry.name())));
            };
            let out = dest.join(&relative);
            trace!(entry = %relative.display(), "Extracting");

            if entry.is_dir() {
                fs::create_dir_all(&out).map_err(|e| fs_error(&out, &e))?;
                continue;
            }

            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).map_err(|e| fs_error(parent, &e))?;
            }
            let mut target = File::create(&out).map_err(|e| fs_error(&out, &e))?;
            io::copy(&mut entry, &mut target).map_err(|e| corrupt(e.to_string()))?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&out, fs::Permissions::from_mode(mode & 0o7777))
                    .map_err(|e| fs_error(&out, &e))?;
            }
        }

        let wrapper_dir = dest.join(&wrapper);
        merge_into(&wrapper_dir, dest)?;
        fs::remove_dir_all(&wrapper_dir).map_err(|e| fs_error(&wrapper_dir, &e))?;

        Ok(wrapper)
    }
}

/// The single top-level folder every entry lives under.
fn wrapper_name<R: io::Read + io::Seek>(zip: &mut ZipArchive<R>) -> Result<String, String> {
    if zip.len() == 0 {
        return Err("the archive is empty".into());
    }

    let first = zip.by_index(0).map_err(|e| e.to_string())?;
    let Some(path) = first.enclosed_name() else {
        return Err(format!("unsafe entry path: {}", first.name()));
    };

    match path.components().next() {
        Some(Component::Normal(name)) if first.is_dir() || path.components().count() > 1 => {
            Ok(name.to_string_lossy().into_owned())
        }
        _ => Err(format!(
            "expected a top-level folder, found {}",
            first.name()
        )),
    }
}

/// Move every child of `src` into `dst`, replacing files and merging
/// directories that already exist there.
fn merge_into(src: &Path, dst: &Path) -> SprigResult<()> {
    let entries = fs::read_dir(src).map_err(|e| fs_error(src, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| fs_error(src, &e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() && to.is_dir() {
            merge_into(&from, &to)?;
            fs::remove_dir(&from).map_err(|e| fs_error(&from, &e))?;
            continue;
        }

        if to.is_dir() {
            fs::remove_dir_all(&to).map_err(|e| fs_error(&to, &e))?;
        } else if to.exists() {
            fs::remove_file(&to).map_err(|e| fs_error(&to, &e))?;
        }
        fs::rename(&from, &to).map_err(|e| fs_error(&to, &e))?;
    }
    Ok(())
}

fn fs_error(path: &Path, err: &io::Error) -> SprigError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
    .into()
}
