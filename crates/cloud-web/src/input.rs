use cloud_core::{GestureSample, HandLandmarks, PointerSample};
use web_sys as web;

/// Floats per landmark in arrays handed over from the hand tracker (x, y, z).
pub const LANDMARK_STRIDE: usize = 3;

#[inline]
pub fn pointer_sample(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> PointerSample {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    PointerSample::from_pixels(x_css, y_css, rect.width() as f32, rect.height() as f32)
}

/// Decode a flat landmark array. Malformed snapshots become an absent hand.
pub fn landmark_sample(coords: &[f32]) -> GestureSample {
    match HandLandmarks::from_flat(coords, LANDMARK_STRIDE) {
        Ok(hand) => GestureSample::Hand(hand),
        Err(e) => {
            log::debug!("[input] dropping landmarks: {}", e);
            GestureSample::Absent
        }
    }
}
