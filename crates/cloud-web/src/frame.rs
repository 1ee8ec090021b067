use crate::dom;
use crate::events::UiQueue;
use crate::overlay;
use crate::render;
use cloud_core::{HandStatus, ParticleCloud, RenderAdapter, SampleMailbox, StatusObserver};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Writes hand status into `#status` and shows camera guidance on failure.
pub struct DomStatus {
    pub document: web::Document,
}

impl StatusObserver for DomStatus {
    fn on_status(&mut self, status: HandStatus) {
        dom::set_text(&self.document, "status", status.label());
        match status {
            HandStatus::Unavailable(failure) => overlay::show(&self.document, failure.guidance()),
            HandStatus::Open | HandStatus::Closed | HandStatus::Neutral => {
                overlay::hide(&self.document)
            }
            HandStatus::NoHand | HandStatus::Pointer => {}
        }
    }
}

pub struct FrameContext<'a> {
    pub cloud: Rc<RefCell<ParticleCloud>>,
    pub mailbox: Rc<RefCell<SampleMailbox>>,
    pub ui_queue: UiQueue,
    pub status: DomStatus,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed_sec = (now - self.started).as_secs_f64();

        let mut cloud = self.cloud.borrow_mut();

        // Pending input first, then queued UI events.
        loop {
            let event = self.mailbox.borrow_mut().take();
            let Some(event) = event else { break };
            cloud.apply_input(event, &mut self.status);
        }
        let ui_events: Vec<_> = self.ui_queue.borrow_mut().drain(..).collect();
        for ev in ui_events {
            cloud.handle_ui(ev);
        }

        let report = cloud.update(dt_sec, elapsed_sec);
        if let Some(r) = report.reduction {
            dom::set_text(
                &self.status.document,
                "particle-count",
                &format!("{} particles", r.to),
            );
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if cloud.take_dirty() {
                if let Err(e) = g.draw(&cloud.frame_view(), cloud.style()) {
                    log::error!("render error: {:?}", e);
                }
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
