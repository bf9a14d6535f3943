use photo_stylist::{Error, config};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::fs;

async fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).await.unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
server:
  host: "127.0.0.1"
  port: 9090
  max_upload_bytes: 1048576
  logs:
    level: "debug"

llm:
  base_url: "https://proxy.example.com"
  api_key: "file-key"
  image_model: "custom-image"
  text_model: "custom-text"
"#,
    )
    .await;

    let config = config::load_from(Some(path.as_str())).await.unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.max_upload_bytes, 1048576);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.llm.base_url, "https://proxy.example.com");
    assert_eq!(config.llm.api_key, "file-key");
    assert_eq!(config.llm.image_model, "custom-image");
    assert_eq!(config.llm.text_model, "custom-text");
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "server:\n  port: 3000\n").await;

    let config = config::load_from(Some(path.as_str())).await.unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.session_idle_minutes, 60);
    assert_eq!(config.llm.image_model, "gemini-2.5-flash-image");
    assert_eq!(config.llm.api_key, "");
}

#[tokio::test]
async fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = config::load_from(path.to_str())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_invalid_yaml_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "server:\n  port: \"not-a-number\"\n").await;

    let err = config::load_from(Some(path.as_str())).await.unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[tokio::test]
async fn test_file_without_key_and_no_env_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "llm:\n  image_model: \"x\"\n").await;

    let mut config = config::load_from(Some(path.as_str())).await.unwrap();
    let err = config::apply_api_key(&mut config, None).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
