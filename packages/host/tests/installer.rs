mod common;

use std::fs;

use tempfile::tempdir;

use common::write_zip;
use host::{HostError, Installer, Registry};

const MYGAME_MANIFEST: &str = r#"{"name":"mygame","title":"My Game"}"#;

#[test]
fn install_from_zip_then_list() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let archive = dir.path().join("game.zip");
    write_zip(
        &archive,
        &[
            ("mygame/game.json", MYGAME_MANIFEST),
            ("mygame/main", "entry-point stand-in"),
        ],
    );

    let installer = Installer::new(&games_dir).unwrap();
    let message = installer.install(&archive).unwrap();
    assert!(message.contains("mygame"));

    let registry = Registry::new(&games_dir);
    let games = registry.list_installed().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].manifest.name, "mygame");
    assert_eq!(games[0].manifest.title.as_deref(), Some("My Game"));
    assert!(registry.is_installed("mygame"));
    assert!(!games_dir.join(".staging").exists());
}

#[test]
fn reinstall_replaces_directory_wholesale() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let installer = Installer::new(&games_dir).unwrap();

    let first = dir.path().join("first.zip");
    write_zip(
        &first,
        &[
            ("mygame/game.json", MYGAME_MANIFEST),
            ("mygame/old_asset.txt", "from the first archive"),
        ],
    );
    installer.install(&first).unwrap();

    let second = dir.path().join("second.zip");
    write_zip(
        &second,
        &[
            ("mygame/game.json", MYGAME_MANIFEST),
            ("mygame/new_asset.txt", "from the second archive"),
        ],
    );
    installer.install(&second).unwrap();

    let game_dir = games_dir.join("mygame");
    assert!(game_dir.join("new_asset.txt").exists());
    assert!(!game_dir.join("old_asset.txt").exists());

    // Exactly one directory under that name.
    let dirs: Vec<_> = fs::read_dir(&games_dir).unwrap().collect();
    assert_eq!(dirs.len(), 1);
}

#[test]
fn nested_archive_is_resolved() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let archive = dir.path().join("wrapped.zip");
    write_zip(
        &archive,
        &[
            ("release/v1/mygame/game.json", MYGAME_MANIFEST),
            ("release/v1/mygame/main", ""),
        ],
    );

    Installer::new(&games_dir)
        .unwrap()
        .install(&archive)
        .unwrap();
    assert!(games_dir.join("mygame").join("game.json").is_file());
    assert!(games_dir.join("mygame").join("main").is_file());
}

#[test]
fn archive_without_manifest_is_rejected() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let archive = dir.path().join("bare.zip");
    write_zip(&archive, &[("mygame/main", "no manifest here")]);

    let err = Installer::new(&games_dir)
        .unwrap()
        .install(&archive)
        .unwrap_err();
    assert!(matches!(err, HostError::ManifestMissing));

    // Games directory untouched, no staging remnants.
    let entries: Vec<_> = fs::read_dir(&games_dir).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn blocked_games_dir_is_surfaced_at_construction() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("games");
    fs::write(&blocker, "a file where the games root should be").unwrap();

    let err = Installer::new(&blocker).unwrap_err();
    assert!(matches!(err, HostError::Installation(_)));
}

#[test]
fn missing_archive_path_is_rejected() {
    let dir = tempdir().unwrap();
    let err = Installer::new(dir.path().join("games"))
        .unwrap()
        .install(&dir.path().join("nope.zip"))
        .unwrap_err();
    assert!(matches!(err, HostError::ArchiveNotFound(_)));
}

#[test]
fn non_zip_file_is_rejected() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("not-a-zip.zip");
    fs::write(&archive, "plain text, not an archive").unwrap();

    let err = Installer::new(dir.path().join("games"))
        .unwrap()
        .install(&archive)
        .unwrap_err();
    assert!(matches!(err, HostError::InvalidArchive(_)));
}

#[test]
fn invalid_manifest_discards_staging() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let archive = dir.path().join("broken.zip");
    write_zip(&archive, &[("mygame/game.json", "{ not json")]);

    let err = Installer::new(&games_dir)
        .unwrap()
        .install(&archive)
        .unwrap_err();
    assert!(matches!(err, HostError::Manifest(_)));

    let entries: Vec<_> = fs::read_dir(&games_dir).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn manifest_without_name_is_rejected() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("nameless.zip");
    write_zip(&archive, &[("mygame/game.json", r#"{"title":"Nameless"}"#)]);

    let err = Installer::new(dir.path().join("games"))
        .unwrap()
        .install(&archive)
        .unwrap_err();
    assert!(matches!(err, HostError::Manifest(_)));
}

#[test]
fn listing_sorts_by_title_and_skips_non_games() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");

    for (name, manifest) in [
        ("aaa", r#"{"name":"aaa","title":"Zed"}"#),
        ("bbb", r#"{"name":"bbb","title":"Alpha"}"#),
    ] {
        let game_dir = games_dir.join(name);
        fs::create_dir_all(&game_dir).unwrap();
        fs::write(game_dir.join("game.json"), manifest).unwrap();
    }
    // Not a game: no manifest inside.
    fs::create_dir_all(games_dir.join("junk")).unwrap();
    fs::write(games_dir.join("junk").join("readme.txt"), "hi").unwrap();

    let titles: Vec<_> = Registry::new(&games_dir)
        .list_installed()
        .unwrap()
        .into_iter()
        .map(|g| g.manifest.title.unwrap())
        .collect();
    assert_eq!(titles, ["Alpha", "Zed"]);
}

#[test]
fn entry_point_lookup_defaults_to_main() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");

    let plain = games_dir.join("plain");
    fs::create_dir_all(&plain).unwrap();
    fs::write(plain.join("game.json"), r#"{"name":"plain"}"#).unwrap();

    let custom = games_dir.join("custom");
    fs::create_dir_all(&custom).unwrap();
    fs::write(
        custom.join("game.json"),
        r#"{"name":"custom","entry_point":"builtin:clicker"}"#,
    )
    .unwrap();

    let registry = Registry::new(&games_dir);
    assert_eq!(registry.entry_point("plain").unwrap(), "main");
    assert_eq!(registry.entry_point("custom").unwrap(), "builtin:clicker");
    assert!(matches!(
        registry.entry_point("absent").unwrap_err(),
        HostError::GameNotInstalled(_)
    ));
}

#[test]
fn unreadable_games_dir_reports_registry_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games");
    fs::write(&path, "a file, not a directory").unwrap();

    let err = Registry::new(&path).list_installed().unwrap_err();
    assert!(matches!(err, HostError::Registry(_)));
}

#[test]
fn thumbnail_found_under_assets() {
    let dir = tempdir().unwrap();
    let games_dir = dir.path().join("games");
    let assets = games_dir.join("mygame").join("assets");
    fs::create_dir_all(&assets).unwrap();
    fs::write(games_dir.join("mygame").join("game.json"), MYGAME_MANIFEST).unwrap();
    fs::write(assets.join("thumbnail.png"), [0u8; 4]).unwrap();

    let registry = Registry::new(&games_dir);
    assert_eq!(
        registry.thumbnail("mygame").unwrap(),
        assets.join("thumbnail.png")
    );
    assert!(registry.thumbnail("other").is_none());
}
