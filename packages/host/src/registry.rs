use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{instrument, warn};

use game_core::manifest::{GAME_MANIFEST, GameManifest};

use crate::error::HostError;

/// An installed game: its parsed manifest plus the directory it was
/// resolved from.
#[derive(Debug, Clone)]
pub struct InstalledGame {
    pub manifest: GameManifest,
    pub path: PathBuf,
}

/// Enumerates installed games by reading their manifests off disk.
pub struct Registry {
    games_dir: PathBuf,
}

impl Registry {
    pub fn new(games_dir: impl Into<PathBuf>) -> Self {
        Self {
            games_dir: games_dir.into(),
        }
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    /// All installed games, sorted by title ascending. A directory
    /// without a readable manifest is not a game and is skipped.
    #[instrument(skip(self))]
    pub fn list_installed(&self) -> Result<Vec<InstalledGame>, HostError> {
        let mut games = Vec::new();
        if !self.games_dir.exists() {
            return Ok(games);
        }

        for entry in fs::read_dir(&self.games_dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if !path.is_dir() {
                continue;
            }
            match read_manifest(&path) {
                Ok(Some(manifest)) => games.push(InstalledGame { manifest, path }),
                Ok(None) => {}
                Err(e) => {
                    warn!(dir = %path.display(), error = %e, "skipping unreadable manifest");
                }
            }
        }

        games.sort_by(|a, b| a.manifest.sort_title().cmp(b.manifest.sort_title()));
        Ok(games)
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.games_dir.join(name).join(GAME_MANIFEST).is_file()
    }

    pub fn manifest(&self, name: &str) -> Result<GameManifest, HostError> {
        read_manifest(&self.games_dir.join(name))?
            .ok_or_else(|| HostError::GameNotInstalled(name.to_owned()))
    }

    /// Entry-point identifier for an installed game, defaulting to the
    /// conventional module name when the manifest omits it.
    pub fn entry_point(&self, name: &str) -> Result<String, HostError> {
        Ok(self.manifest(name)?.entry_point().to_owned())
    }

    pub fn thumbnail(&self, name: &str) -> Option<PathBuf> {
        let assets = self.games_dir.join(name).join("assets");
        ["png", "jpg", "gif"]
            .iter()
            .map(|ext| assets.join(format!("thumbnail.{ext}")))
            .find(|path| path.is_file())
    }
}

fn read_manifest(dir: &Path) -> Result<Option<GameManifest>, HostError> {
    let manifest_path = dir.join(GAME_MANIFEST);
    if !manifest_path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&manifest_path).map_err(read_err)?;
    Ok(Some(GameManifest::parse(&bytes)?))
}

fn read_err(e: io::Error) -> HostError {
    HostError::Registry(e.to_string())
}
