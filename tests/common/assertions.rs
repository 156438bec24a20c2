//! Assertion helpers for tests.

use greyroom::models::Frame;
use greyroom::services::RenderEvent;
use pretty_assertions::assert_eq;
use tone_pipeline::{ParameterSet, RenderedImage, SourceImage};

/// Assert every pixel has R == G == B
pub fn assert_neutral(image: &RenderedImage) {
    for (i, px) in image.as_rgba8().chunks_exact(4).enumerate() {
        assert!(
            px[0] == px[1] && px[1] == px[2],
            "Expected neutral pixel at index {i}, got {:?}",
            px
        );
    }
}

/// Assert `bytes` is a PNG that decodes to the given extent
pub fn assert_png(bytes: &[u8], width: u32, height: u32) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let decoded = SourceImage::decode(bytes).expect("exported PNG should decode");
    assert_eq!(decoded.dimensions(), (width, height));
}

/// Unwrap a `Rendered` event
pub fn expect_rendered(event: RenderEvent) -> Frame {
    match event {
        RenderEvent::Rendered(frame) => frame,
        RenderEvent::Failed { generation, error } => {
            panic!("Expected a rendered frame, got failure at generation {generation}: {error}")
        }
    }
}

/// Params of every `Rendered` event, in delivery order
pub fn rendered_params(events: &[RenderEvent]) -> Vec<ParameterSet> {
    events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::Rendered(frame) => Some(frame.params),
            RenderEvent::Failed { .. } => None,
        })
        .collect()
}
