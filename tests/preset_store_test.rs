//! Behaviour shared by every preset store, plus the JSON file format.

use greyroom::error::StoreError;
use greyroom::models::Preset;
use greyroom::services::{InMemoryPresetStore, JsonPresetStore, PresetStore};
use pretty_assertions::assert_eq;
use tone_pipeline::ParameterSet;

/// Run `check` against a fresh store of each kind.
async fn for_each_store<F, Fut>(check: F)
where
    F: Fn(Box<dyn PresetStore>) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    check(Box::new(InMemoryPresetStore::new())).await;

    let dir = tempfile::tempdir().unwrap();
    check(Box::new(JsonPresetStore::new(dir.path().join("presets.json")))).await;
}

#[tokio::test]
async fn test_save_list_load_delete() {
    for_each_store(|store| async move {
        assert!(store.list().await.unwrap().is_empty());

        let soft = ParameterSet::default().with_contrast(0.8);
        let hard = ParameterSet::default().with_contrast(1.4).with_shadows(0.05);
        let first = store.save(soft).await.unwrap();
        let second = store.save(hard).await.unwrap();
        assert_ne!(first.id, second.id);

        let listed: Vec<_> = store.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(listed, vec![second.id, first.id]);

        assert_eq!(store.load(&first).await.unwrap(), soft);
        assert_eq!(store.load(&second).await.unwrap(), hard);

        store.delete(&first).await.unwrap();
        assert_eq!(store.load(&first).await.unwrap_err(), StoreError::NotFound);
        assert_eq!(store.delete(&first).await.unwrap_err(), StoreError::NotFound);
        assert_eq!(store.list().await.unwrap().len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_unknown_preset_is_not_found() {
    for_each_store(|store| async move {
        let stranger = Preset::new(ParameterSet::default());
        assert_eq!(store.load(&stranger).await.unwrap_err(), StoreError::NotFound);
        assert_eq!(store.delete(&stranger).await.unwrap_err(), StoreError::NotFound);
    })
    .await;
}

#[tokio::test]
async fn test_identical_params_are_separate_presets() {
    for_each_store(|store| async move {
        let a = store.save(ParameterSet::default()).await.unwrap();
        let b = store.save(ParameterSet::default()).await.unwrap();
        store.delete(&a).await.unwrap();

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    })
    .await;
}

#[tokio::test]
async fn test_json_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    let store = JsonPresetStore::new(&path);

    let params = ParameterSet::default().with_brightness(-0.5).with_midtones(0.25);
    let preset = store.save(params).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    let stored = &json["presets"][0];
    assert_eq!(stored["id"], preset.id.to_string());
    assert!(stored["created_at"].is_string());
    assert_eq!(stored["params"]["brightness"], -0.5);
    assert_eq!(stored["params"]["contrast"], 1.0);
    assert_eq!(stored["params"]["midtones"], 0.25);
}

#[tokio::test]
async fn test_hand_edited_file_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    std::fs::write(
        &path,
        r#"{
  "version": 1,
  "presets": [
    {
      "id": "6f1c2f4e-8a5b-4c1d-9e3f-2a7b8c9d0e1f",
      "created_at": "2026-03-01T09:30:00Z",
      "params": { "brightness": 3.0, "shadows": 0.1 }
    }
  ]
}"#,
    )
    .unwrap();

    let store = JsonPresetStore::new(&path);
    let presets = store.list().await.unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(
        presets[0].params,
        ParameterSet::default().with_brightness(1.0).with_shadows(0.1)
    );
}

#[tokio::test]
async fn test_corrupt_file_is_an_error_not_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = JsonPresetStore::new(&path);
    assert!(matches!(store.list().await, Err(StoreError::Corrupt(_))));
    assert!(matches!(
        store.save(ParameterSet::default()).await,
        Err(StoreError::Corrupt(_))
    ));
    // The broken file is left for the user to inspect
    assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
}

#[tokio::test]
async fn test_preset_saved_from_another_store_survives_editor_save() {
    use greyroom::services::{EditSession, RenderService};
    use std::sync::Arc;
    use std::time::Duration;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    let mut editor = EditSession::new(
        RenderService::default(),
        Arc::new(JsonPresetStore::new(&path)),
        Duration::from_millis(10),
    );
    assert!(editor.list_presets().await.unwrap().is_empty());

    // A second process saves while the editor is open
    let outside = JsonPresetStore::new(&path)
        .save(ParameterSet::default().with_contrast(0.6))
        .await
        .unwrap();

    editor
        .set_params(ParameterSet::default().with_contrast(1.4))
        .unwrap();
    let own = editor.save_preset().await.unwrap();

    let on_disk: Vec<_> = JsonPresetStore::new(&path)
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(on_disk, vec![own.id, outside.id]);
    editor.shutdown().await;
}
