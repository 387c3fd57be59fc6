use std::fs;
use std::path::Path;

use comments::config::CommentsConfig;
use comments::tooling::cli::CliContext;
use tempfile::TempDir;

/// `root/{test1.txt, test2.txt, nested/doubleNest/}`
pub fn tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("nested/doubleNest")).unwrap();
    touch(&temp.path().join("test1.txt"));
    touch(&temp.path().join("test2.txt"));
    temp
}

pub fn touch(path: &Path) {
    fs::write(path, "").unwrap();
}

pub fn plain_config() -> CommentsConfig {
    let mut config = CommentsConfig::default();
    config.display.color = false;
    config
}

pub fn cli_in(dir: &Path) -> CliContext {
    CliContext::with_config(dir.to_path_buf(), plain_config()).unwrap()
}
