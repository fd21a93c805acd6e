// SPDX-License-Identifier: MPL-2.0
use drag_dismiss::config::{self, GestureSettings};
use drag_dismiss::domain::gesture::DismissThreshold;
use drag_dismiss::gesture::{
    DragLayout, DragListener, DragOrigin, Effect, Message, PointerEvent, Position,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

/// Prints every scale and accepts every dismissal.
struct Printer;

impl DragListener for Printer {
    fn on_position_changed(&mut self, content: Position, scale: f32) {
        println!("top={:>5} scale={scale:.3}", content.y);
    }

    fn on_released(&mut self) -> bool {
        println!("released below threshold: dismiss");
        true
    }

    fn on_settled(&mut self) {
        println!("settled at origin");
    }
}

fn main() -> Result<(), pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let mut settings: GestureSettings = config::load()
        .unwrap_or_default()
        .gesture_settings();
    if let Some(threshold) = args.opt_value_from_str::<_, f32>("--threshold")? {
        settings.threshold = DismissThreshold::new(threshold);
    }
    let height: i32 = args.opt_value_from_str("--height")?.unwrap_or(1000);
    let drag: f32 = args.opt_value_from_str("--drag")?.unwrap_or(400.0);
    let steps: u64 = args.opt_value_from_str("--steps")?.unwrap_or(10).max(1);

    let mut layout = DragLayout::with_listener(settings, Printer);
    layout.handle(Message::Layout {
        origin: DragOrigin::new(0, 0),
        height,
    });

    let mut time = 0;
    layout.handle(Message::Pointer(PointerEvent::down(0.0, 0.0, time)));
    for step in 1..=steps {
        time += 16;
        let y = drag * step as f32 / steps as f32;
        layout.handle(Message::Pointer(PointerEvent::moved(0.0, y, time)));
    }
    time += 16;
    let mut effect = layout.handle(Message::Pointer(PointerEvent::up(0.0, drag, time)));
    while effect == Effect::RequestFrame {
        effect = layout.handle(Message::Frame(FRAME));
    }
    Ok(())
}
