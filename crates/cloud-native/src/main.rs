use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use cloud_core::{
    CloudConfig, HandStatus, ParticleCloud, PatternKind, PointerSample, Reduction, RenderAdapter,
    SampleMailbox, UiEvent,
};

mod render;

fn pattern_for_key(key: &Key) -> Option<PatternKind> {
    match key {
        Key::Character(c) => match c.as_str() {
            "1" => Some(PatternKind::Sphere),
            "2" => Some(PatternKind::Spiral),
            "3" => Some(PatternKind::Heart),
            _ => None,
        },
        _ => None,
    }
}

fn window_title(particles: usize) -> String {
    format!("Gesture Cloud (native) - {} particles", particles)
}

fn describe_reduction(r: &Reduction) -> String {
    format!(
        "frame rate {:.1} fps, particles {} -> {}",
        r.fps, r.from, r.to
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Optional starting pattern: `cloud-native heart`
    let pattern = std::env::args()
        .nth(1)
        .map(|s| s.parse::<PatternKind>())
        .transpose()?
        .unwrap_or_default();
    let config = CloudConfig {
        pattern,
        ..CloudConfig::default()
    };
    let capacity = config.initial_count;
    let mut cloud = ParticleCloud::new(config);
    // No camera on desktop; the cursor drives the cloud.
    let mut mailbox = SampleMailbox::new();
    let mut log_status = |status: HandStatus| log::info!("[status] {}", status.label());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(capacity))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(render::GpuState::new(&window, capacity))?;
    let started = Instant::now();
    let mut last_frame = started;
    log::info!("[cloud] {} particles, pattern {}", capacity, pattern);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => gpu.resize(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let size = gpu.window.inner_size();
            mailbox.post_pointer(PointerSample::from_pixels(
                position.x as f32,
                position.y as f32,
                size.width as f32,
                size.height as f32,
            ));
        }
        Event::WindowEvent {
            event: WindowEvent::CursorLeft { .. },
            ..
        } => {
            mailbox.clear_pointer();
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if let Some(kind) = pattern_for_key(&logical_key) {
                cloud.handle_ui(UiEvent::SelectPattern(kind));
            } else if logical_key == Key::Named(NamedKey::Escape) {
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            let now = Instant::now();
            let dt_sec = (now - last_frame).as_secs_f32();
            last_frame = now;

            while let Some(input) = mailbox.take() {
                cloud.apply_input(input, &mut log_status);
            }
            let report = cloud.update(dt_sec, (now - started).as_secs_f64());
            if let Some(r) = report.reduction {
                gpu.window.set_title(&window_title(r.to));
                log::warn!("[cloud] {}", describe_reduction(&r));
            }
            if !cloud.take_dirty() {
                return;
            }
            match gpu.draw(&cloud.frame_view(), cloud.style()) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_is_described_with_counts_and_rate() {
        let r = Reduction {
            from: 5000,
            to: 4500,
            fps: 21.04,
        };
        assert_eq!(
            describe_reduction(&r),
            "frame rate 21.0 fps, particles 5000 -> 4500"
        );
        assert_eq!(window_title(r.to), "Gesture Cloud (native) - 4500 particles");
    }

    #[test]
    fn digit_keys_select_patterns() {
        assert_eq!(
            pattern_for_key(&Key::Character("3".into())),
            Some(PatternKind::Heart)
        );
        assert_eq!(pattern_for_key(&Key::Named(NamedKey::Enter)), None);
    }
}
