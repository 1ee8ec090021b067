#![cfg(target_arch = "wasm32")]
use cloud_core::{
    parse_hex_color, CloudConfig, InputFailure, ParticleCloud, PatternKind, SampleMailbox, UiEvent,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

/// Shared handles reachable from the JS-facing exports.
struct Handles {
    mailbox: Rc<RefCell<SampleMailbox>>,
    ui_queue: events::UiQueue,
}

thread_local! {
    static HANDLES: RefCell<Option<Handles>> = const { RefCell::new(None) };
}

fn with_handles(f: impl FnOnce(&Handles)) {
    HANDLES.with(|h| match h.borrow().as_ref() {
        Some(handles) => f(handles),
        None => log::warn!("[cloud] input arrived before init; dropping"),
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cloud-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    wire_canvas_resize(&canvas);

    let mut seed_bytes = [0u8; 8];
    getrandom::getrandom(&mut seed_bytes).map_err(|e| anyhow::anyhow!("getrandom: {}", e))?;
    let config = CloudConfig {
        seed: u64::from_le_bytes(seed_bytes),
        ..CloudConfig::default()
    };
    let capacity = config.initial_count;
    let cloud = Rc::new(RefCell::new(ParticleCloud::new(config)));
    let mailbox = Rc::new(RefCell::new(SampleMailbox::new()));
    let ui_queue: events::UiQueue = Rc::new(RefCell::new(Vec::new()));

    HANDLES.with(|h| {
        *h.borrow_mut() = Some(Handles {
            mailbox: mailbox.clone(),
            ui_queue: ui_queue.clone(),
        });
    });

    events::wire_global_keydown(ui_queue.clone(), canvas.clone());
    events::wire_pattern_buttons(&document, &ui_queue);
    events::wire_pointer_handlers(&canvas, mailbox.clone());

    {
        let c = cloud.borrow();
        dom::set_text(&document, "status", c.status().label());
        dom::set_text(
            &document,
            "particle-count",
            &format!("{} particles", c.active_count()),
        );
    }

    let gpu = frame::init_gpu(&canvas, capacity).await;
    if gpu.is_none() {
        log::warn!("[cloud] running without a renderer");
    }
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        cloud,
        mailbox,
        ui_queue,
        status: frame::DomStatus { document },
        canvas,
        gpu,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);
    log::info!("[cloud] frame loop started");
    Ok(())
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
    }
    resize_closure.forget();
}

/// Latest hand landmarks from the tracker, flattened as `x, y, z` per point.
#[wasm_bindgen]
pub fn push_hand_landmarks(coords: &[f32]) {
    let sample = input::landmark_sample(coords);
    with_handles(|h| h.mailbox.borrow_mut().post_camera(sample));
}

/// The tracker ran but found no hand this frame.
#[wasm_bindgen]
pub fn clear_hand() {
    with_handles(|h| {
        h.mailbox
            .borrow_mut()
            .post_camera(cloud_core::GestureSample::Absent)
    });
}

/// Camera acquisition failed; `name` is the DOM error name.
#[wasm_bindgen]
pub fn report_camera_failure(name: &str) {
    let failure = InputFailure::from_dom_name(name);
    log::warn!("[camera] {} ({})", failure, name);
    with_handles(|h| h.mailbox.borrow_mut().fail(failure));
}

#[wasm_bindgen]
pub fn stop_camera() {
    with_handles(|h| h.mailbox.borrow_mut().stop());
}

#[wasm_bindgen]
pub fn set_pattern(name: &str) -> Result<(), JsValue> {
    let kind: PatternKind = name
        .parse()
        .map_err(|e: cloud_core::ParseError| JsValue::from_str(&e.to_string()))?;
    with_handles(|h| h.ui_queue.borrow_mut().push(UiEvent::SelectPattern(kind)));
    Ok(())
}

/// Particle color as `#rrggbb`.
#[wasm_bindgen]
pub fn set_color(hex: &str) -> Result<(), JsValue> {
    let rgb = parse_hex_color(hex).map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_handles(|h| h.ui_queue.borrow_mut().push(UiEvent::SelectColor(rgb)));
    Ok(())
}
