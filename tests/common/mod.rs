use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use urdu_notebook::storage::ChatStore;

#[allow(dead_code)]
pub fn create_temp_store() -> (ChatStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = ChatStore::new(tmp.path().join("chats.json"));
    (store, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
