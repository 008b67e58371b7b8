use paasdb_core::env::EnvSnapshot;
use paasdb_core::platform::DotcloudEnvFile;
use tempfile::TempDir;

/// Build a snapshot from literal pairs, preserving their order.
pub fn snapshot(pairs: &[(&str, &str)]) -> EnvSnapshot {
    pairs.iter().copied().collect()
}

/// Write a dotcloud-style environment file into a scratch directory and
/// return an overlay pointing at it.
///
/// Keep the returned `TempDir` guard alive for as long as the overlay is
/// used; dropping it deletes the file.
pub fn dotcloud_env_file(entries: &[(&str, &str)]) -> (TempDir, DotcloudEnvFile) {
    let object: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();

    let dir = tempfile::tempdir().expect("create scratch dir");
    let path = dir.path().join("environment.json");
    std::fs::write(&path, serde_json::Value::Object(object).to_string())
        .expect("write environment.json");
    (dir, DotcloudEnvFile::at(path))
}

/// Write arbitrary bytes as a dotcloud environment file, for exercising
/// unreadable/invalid source handling.
pub fn raw_env_file(contents: &str) -> (TempDir, DotcloudEnvFile) {
    let dir = tempfile::tempdir().expect("create scratch dir");
    let path = dir.path().join("environment.json");
    std::fs::write(&path, contents).expect("write environment.json");
    (dir, DotcloudEnvFile::at(path))
}
