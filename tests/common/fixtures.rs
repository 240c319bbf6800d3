use r4rs::{LoaderConfig, install_defining_unit};
use std::fs;
use std::path::Path;
use std::sync::{Once, OnceLock};
use tempfile::TempDir;

pub const HELLO: &[u8] = b"hello";
/// "café" in windows-1252 followed by "é" in UTF-8.
pub const MIXED: &[u8] = b"caf\xE9 \xC3\xA9";
pub const BINARY: &[u8] = &[0, 159, 146, 150, 255];

static ROOT: OnceLock<TempDir> = OnceLock::new();
static INSTALL: Once = Once::new();

/// A directory laid out like a bundled resource tree:
///
/// ```text
/// fixtures/hello.txt
/// fixtures/mixed.txt
/// fixtures/data.bin
/// app/home.txt
/// ```
pub fn fixture_root() -> &'static Path {
    ROOT.get_or_init(|| {
        let dir = tempfile::tempdir().expect("create fixture root");
        let fixtures = dir.path().join("fixtures");
        fs::create_dir_all(&fixtures).unwrap();
        fs::write(fixtures.join("hello.txt"), HELLO).unwrap();
        fs::write(fixtures.join("mixed.txt"), MIXED).unwrap();
        fs::write(fixtures.join("data.bin"), BINARY).unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::write(dir.path().join("app/home.txt"), b"home").unwrap();
        dir
    })
    .path()
}

/// Installs a defining unit over [`fixture_root`] with home `app`, once per
/// test binary.
pub fn install_fixture_unit() {
    INSTALL.call_once(|| {
        let unit = LoaderConfig::new(fixture_root())
            .with_home("app")
            .into_defining_unit();
        install_defining_unit(unit).expect("defining unit installed before fixtures");
    });
}
