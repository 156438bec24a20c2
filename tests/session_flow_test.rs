//! End-to-end editing flows: load, adjust, presets, export.

mod common;

use common::fixtures::{self, SETTLE};
use common::{
    assert_neutral, assert_png, expect_rendered, rendered_params, CountingRenderer, GatedRenderer,
    TestSession,
};
use greyroom::error::{EditorError, StoreError};
use greyroom::services::{BytesSource, JsonPresetStore, PngFileSink, PresetStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tone_pipeline::{Parameter, ParameterSet, SourceImage};

#[tokio::test]
async fn test_complete_editing_flow() {
    let mut t = TestSession::new(CountingRenderer::new());
    let png = fixtures::color_png(12, 9);
    let decoded = SourceImage::decode(&png).unwrap();

    // Step 1: load renders once with default parameters
    t.session.load_image_bytes(png).await.unwrap();
    let initial = expect_rendered(t.next_event().await);
    assert_eq!(initial.params, ParameterSet::default());
    assert_eq!((initial.width(), initial.height()), (12, 9));
    t.settle().await;

    // Step 2: five slider moves, one render
    let params = fixtures::scenario_params();
    for parameter in Parameter::ALL {
        t.session.set_parameter(parameter, params.get(parameter)).unwrap();
    }
    t.settle().await;
    let events = t.drain_events();
    assert_eq!(rendered_params(&events), vec![params]);

    let frame = t.session.latest_frame().unwrap();
    assert_neutral(&frame.image);
    let expected = tone_pipeline::render(&decoded, &params).unwrap();
    assert_eq!(*frame.image, expected);

    // Step 3: one more change replaces the result
    t.session.set_parameter(Parameter::Shadows, 0.1).unwrap();
    t.settle().await;
    let events = t.drain_events();
    let revised = params.with_shadows(0.1);
    assert_eq!(rendered_params(&events), vec![revised]);
    assert_eq!(t.session.latest_frame().unwrap().params, revised);
    assert_eq!(t.renderer.count(), 3);

    t.session.shutdown().await;
}

#[tokio::test]
async fn test_preset_round_trip_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    let store = Arc::new(JsonPresetStore::new(&path));
    let mut t = TestSession::with_store(CountingRenderer::new(), store, SETTLE);

    let look = fixtures::scenario_params();
    t.session.set_params(look).unwrap();
    let saved = t.session.save_preset().await.unwrap();
    assert_eq!(saved.params, look);

    t.session.set_parameter(Parameter::Contrast, 0.7).unwrap();
    t.session.set_parameter(Parameter::Highlights, 0.55).unwrap();
    assert_ne!(t.session.params(), look);

    let applied = t.session.apply_preset(&saved).await.unwrap();
    assert_eq!(applied, look);
    assert_eq!(t.session.params(), look);

    // A fresh store over the same file sees the preset
    let reopened = JsonPresetStore::new(&path);
    let listed = reopened.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
    assert_eq!(reopened.load(&saved).await.unwrap(), look);

    t.session.delete_preset(&saved).await.unwrap();
    assert!(t.session.list_presets().await.unwrap().is_empty());
    assert_eq!(
        t.session.apply_preset(&saved).await.unwrap_err(),
        EditorError::Store(StoreError::NotFound)
    );
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_presets_list_newest_first() {
    let mut t = TestSession::new(CountingRenderer::new());
    for value in [0.2, 0.3, 0.4] {
        t.session.set_parameter(Parameter::Midtones, value).unwrap();
        t.session.save_preset().await.unwrap();
    }

    let midtones: Vec<f32> = t
        .session
        .list_presets()
        .await
        .unwrap()
        .iter()
        .map(|p| p.params.midtones())
        .collect();
    assert_eq!(midtones, vec![0.4, 0.3, 0.2]);
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_out_of_range_values_are_clamped() {
    let mut t = TestSession::new(CountingRenderer::new());

    let cases = [
        (Parameter::Brightness, 4.0, 1.0),
        (Parameter::Brightness, -4.0, -1.0),
        (Parameter::Contrast, 0.1, 0.5),
        (Parameter::Contrast, 2.0, 1.5),
        (Parameter::Shadows, 0.9, 0.5),
        (Parameter::Midtones, -0.2, 0.0),
        (Parameter::Highlights, 0.2, 0.5),
        (Parameter::Highlights, 1.7, 1.0),
    ];
    for (parameter, requested, expected) in cases {
        let stored = t.session.set_parameter(parameter, requested).unwrap();
        assert_eq!(stored, expected, "{parameter} from {requested}");
        assert_eq!(t.session.params().get(parameter), expected);
    }
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_extreme_brightness_saturates_output() {
    let mut t = TestSession::new(CountingRenderer::new());
    let source = fixtures::color_source(7, 5);

    t.session
        .set_params(ParameterSet::default().with_brightness(1.0).with_contrast(1.5))
        .unwrap();
    t.session.set_source(source.clone()).unwrap();
    let white = expect_rendered(t.next_event().await);
    for (px, alpha) in white.image.as_rgba8().chunks_exact(4).zip(source.alpha()) {
        assert_eq!(&px[..3], &[255, 255, 255]);
        assert_eq!(px[3], *alpha);
    }

    t.session.set_parameter(Parameter::Brightness, -1.0).unwrap();
    let black = expect_rendered(t.next_event().await);
    for px in black.image.as_rgba8().chunks_exact(4) {
        assert_eq!(&px[..3], &[0, 0, 0]);
    }
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_export_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export").join("final.png");
    let mut t = TestSession::new(CountingRenderer::new());
    let sink = PngFileSink::new(&out);

    assert_eq!(t.session.export(&sink).await.unwrap_err(), EditorError::NoImage);

    t.session
        .load_image(&BytesSource::new(fixtures::color_png(10, 6)))
        .await
        .unwrap();
    t.session.set_parameter(Parameter::Contrast, 1.3).unwrap();
    let frame = t.session.wait_for_frame().await.unwrap().unwrap();

    let exported = t.session.export(&sink).await.unwrap();
    assert_eq!(exported.generation, frame.generation);

    let bytes = std::fs::read(&out).unwrap();
    assert_png(&bytes, 10, 6);
    let round_trip = SourceImage::decode(&bytes).unwrap();
    let frame_source =
        SourceImage::from_rgba8(10, 6, frame.image.as_rgba8().to_vec()).unwrap();
    assert_eq!(round_trip, frame_source);
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_export_before_first_frame() {
    let (renderer, mut started) = GatedRenderer::new();
    let mut t = TestSession::new(renderer);
    let dir = tempfile::tempdir().unwrap();
    let sink = PngFileSink::new(dir.path().join("early.png"));

    t.session.set_source(fixtures::color_source(3, 3)).unwrap();
    started.recv().await.unwrap();
    assert_eq!(
        t.session.export(&sink).await.unwrap_err(),
        EditorError::NothingToExport
    );

    t.renderer.open();
    t.settle().await;
    t.session.export(&sink).await.unwrap();
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_bad_image_keeps_previous_photo() {
    let mut t = TestSession::new(CountingRenderer::new());
    t.session.set_source(fixtures::grey_source(4, 4, 90)).unwrap();
    let shown = expect_rendered(t.next_event().await);

    let err = t
        .session
        .load_image_bytes(b"GIF89a but not really".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::DecodeFailed(_)));
    assert!(err.to_string().starts_with("Failed to load image"));

    let missing = t
        .session
        .load_image_path("/definitely/not/here.jpg")
        .await
        .unwrap_err();
    assert!(missing.to_string().contains("here.jpg"), "{missing}");

    t.settle().await;
    assert!(t.session.has_image());
    assert_eq!(t.session.latest_frame().unwrap().generation, shown.generation);
    assert_eq!(t.renderer.count(), 1);
    t.session.shutdown().await;
}

#[tokio::test]
async fn test_reset_returns_to_defaults() {
    let mut t = TestSession::new(CountingRenderer::new());
    t.session.set_source(fixtures::color_source(4, 4)).unwrap();
    t.session.set_params(fixtures::scenario_params()).unwrap();
    t.settle().await;
    assert!(t.session.latest_frame().is_some());

    t.session.reset().unwrap();
    t.settle().await;
    assert!(t.session.params().is_default());
    assert!(!t.session.has_image());
    assert!(t.session.latest_frame().is_none());

    // Edits after a reset wait for the next photo
    let before = t.renderer.count();
    t.session.set_parameter(Parameter::Shadows, 0.2).unwrap();
    t.settle().await;
    assert_eq!(t.renderer.count(), before);
    t.session.shutdown().await;
}
