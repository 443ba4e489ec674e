use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use zip::ZipArchive;

use game_core::manifest::{GAME_MANIFEST, GameManifest};

use crate::error::HostError;

/// Staging directory under the games root. Wiped before and after
/// every install, so at most one install may run at a time.
const STAGING_DIR: &str = ".staging";

/// Ingests distributable zip archives and publishes them into the
/// games root, one directory per game name.
#[derive(Debug)]
pub struct Installer {
    games_dir: PathBuf,
}

impl Installer {
    /// Creates the games root if it does not exist yet.
    pub fn new(games_dir: impl Into<PathBuf>) -> Result<Self, HostError> {
        let games_dir = games_dir.into();
        fs::create_dir_all(&games_dir)?;
        Ok(Self { games_dir })
    }

    /// Installs a game from `archive_path`.
    ///
    /// Reinstalling an already-present name replaces its directory
    /// wholesale; staging data is cleaned up on success and failure
    /// alike. Returns a human-readable confirmation.
    #[instrument(skip(self))]
    pub fn install(&self, archive_path: &Path) -> Result<String, HostError> {
        let staging = self.games_dir.join(STAGING_DIR);
        let result = self.install_inner(archive_path, &staging);
        if staging.exists() {
            let _ = fs::remove_dir_all(&staging);
        }
        result
    }

    fn install_inner(&self, archive_path: &Path, staging: &Path) -> Result<String, HostError> {
        if !archive_path.exists() {
            return Err(HostError::ArchiveNotFound(archive_path.to_path_buf()));
        }

        let file = File::open(archive_path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| HostError::InvalidArchive(e.to_string()))?;

        // Cheap pre-check before touching the filesystem: the archive
        // must carry a manifest somewhere.
        if !archive
            .file_names()
            .any(|name| name.ends_with(GAME_MANIFEST))
        {
            return Err(HostError::ManifestMissing);
        }

        if staging.exists() {
            fs::remove_dir_all(staging)?;
        }
        fs::create_dir_all(staging)?;
        archive
            .extract(staging)
            .map_err(|e| HostError::Installation(e.to_string()))?;

        // The archive may wrap the game in extra directory levels.
        let game_dir = find_manifest_dir(staging)?.ok_or(HostError::ManifestMissing)?;

        let manifest_bytes = fs::read(game_dir.join(GAME_MANIFEST))?;
        let manifest = GameManifest::parse(&manifest_bytes)?;

        let target = self.games_dir.join(&manifest.name);
        if target.exists() {
            // Full-replace semantics: the old install goes away first,
            // never a partial merge.
            fs::remove_dir_all(&target)?;
        }
        fs::rename(&game_dir, &target)?;

        info!(game = %manifest.name, "game installed");
        Ok(format!("Game '{}' installed successfully", manifest.name))
    }
}

/// Breadth-first search for the shallowest directory containing a
/// manifest file.
fn find_manifest_dir(root: &Path) -> Result<Option<PathBuf>, HostError> {
    let mut queue = VecDeque::from([root.to_path_buf()]);
    while let Some(dir) = queue.pop_front() {
        if dir.join(GAME_MANIFEST).is_file() {
            return Ok(Some(dir));
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                queue.push_back(path);
            }
        }
    }
    Ok(None)
}
