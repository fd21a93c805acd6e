// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss container.
//!
//! Bundles the [`GestureRouter`] and the [`DragController`] behind a single
//! message handler so a host only forwards layout passes, pointer events and
//! frame ticks, and reacts to the returned [`Effect`].

use crate::config::GestureSettings;
use crate::gesture::controller::{DragController, DragListener, DragOrigin, DragState, Outcome};
use crate::gesture::event::PointerEvent;
use crate::gesture::router::{GestureRouter, Routing};
use iced_core::touch;
use std::time::Duration;

/// Messages for the drag container.
#[derive(Debug, Clone)]
pub enum Message {
    /// The container was laid out; `origin` is the content's resting place.
    Layout { origin: DragOrigin, height: i32 },
    /// A raw pointer event.
    Pointer(PointerEvent),
    /// An `iced` touch event observed at the given time.
    Touch(touch::Event, Duration),
    /// A frame elapsed while settling.
    Frame(Duration),
}

/// Effects produced by the drag container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// The event is not part of a drag; deliver it to the content.
    PassToContent,
    /// Deliver the event to the content, then deliver a [`Message::Frame`].
    PassToContentAndRequestFrame,
    /// Deliver another [`Message::Frame`].
    RequestFrame,
    /// The release listener took over navigation.
    Dismissed,
}

impl From<Outcome> for Effect {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::None => Effect::None,
            Outcome::RequestFrame => Effect::RequestFrame,
            Outcome::Dismissed => Effect::Dismissed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragLayout<L> {
    router: GestureRouter,
    controller: DragController<L>,
}

impl<L: DragListener> DragLayout<L> {
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            router: GestureRouter::new(settings.touch_slop),
            controller: DragController::with_settings(settings),
        }
    }

    #[must_use]
    pub fn with_listener(settings: GestureSettings, listener: L) -> Self {
        let mut layout = Self::new(settings);
        layout.controller.set_listener(listener);
        layout
    }

    #[must_use]
    pub fn controller(&self) -> &DragController<L> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DragController<L> {
        &mut self.controller
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.controller.state()
    }

    /// Handle a container message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Layout { origin, height } => {
                self.controller.on_layout(origin, height);
                Effect::None
            }
            Message::Pointer(event) => self.pointer(&event),
            Message::Touch(event, time) => self.pointer(&PointerEvent::from_touch(event, time)),
            Message::Frame(elapsed) => {
                if self.controller.on_frame(elapsed) {
                    Effect::RequestFrame
                } else {
                    Effect::None
                }
            }
        }
    }

    fn pointer(&mut self, event: &PointerEvent) -> Effect {
        match self.router.route(event, &mut self.controller) {
            Routing::Passed => Effect::PassToContent,
            Routing::PassedSettling => Effect::PassToContentAndRequestFrame,
            Routing::Intercepted => Effect::None,
            Routing::Forwarded(outcome) => outcome.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::tracker::Position;
    use iced_core::Point;

    #[derive(Debug, Default)]
    struct Alpha(f32);

    impl DragListener for Alpha {
        fn on_position_changed(&mut self, _content: Position, scale: f32) {
            self.0 = scale;
        }

        fn on_released(&mut self) -> bool {
            true
        }
    }

    fn layout() -> DragLayout<Alpha> {
        let mut layout = DragLayout::with_listener(GestureSettings::default(), Alpha(1.0));
        layout.handle(Message::Layout {
            origin: DragOrigin::new(0, 0),
            height: 1000,
        });
        layout
    }

    #[test]
    fn taps_pass_to_content() {
        let mut layout = layout();
        assert_eq!(
            layout.handle(Message::Pointer(PointerEvent::down(5.0, 5.0, 0))),
            Effect::PassToContent
        );
        assert_eq!(
            layout.handle(Message::Pointer(PointerEvent::up(5.0, 5.0, 50))),
            Effect::PassToContent
        );
    }

    #[test]
    fn touch_events_drive_a_dismiss() {
        let mut layout = layout();
        let finger = touch::Finger(1);
        let events = [
            touch::Event::FingerPressed {
                id: finger,
                position: Point::new(0.0, 0.0),
            },
            touch::Event::FingerMoved {
                id: finger,
                position: Point::new(0.0, 200.0),
            },
            touch::Event::FingerMoved {
                id: finger,
                position: Point::new(0.0, 450.0),
            },
        ];
        for (i, event) in events.into_iter().enumerate() {
            layout.handle(Message::Touch(event, Duration::from_millis(16 * i as u64)));
        }
        assert!((layout.controller().listener().expect("listener").0 - 0.55).abs() < 1e-6);

        let effect = layout.handle(Message::Touch(
            touch::Event::FingerLifted {
                id: finger,
                position: Point::new(0.0, 450.0),
            },
            Duration::from_millis(64),
        ));
        assert_eq!(effect, Effect::Dismissed);
    }

    #[test]
    fn tap_during_settle_keeps_frames_coming() {
        let mut layout = layout();
        layout.controller_mut().take_listener();
        layout.handle(Message::Pointer(PointerEvent::down(0.0, 0.0, 0)));
        layout.handle(Message::Pointer(PointerEvent::moved(0.0, 200.0, 16)));
        layout.handle(Message::Pointer(PointerEvent::up(0.0, 200.0, 32)));
        layout.handle(Message::Frame(Duration::from_millis(16)));

        assert_eq!(
            layout.handle(Message::Pointer(PointerEvent::down(0.0, 0.0, 100))),
            Effect::PassToContent
        );
        assert_eq!(
            layout.handle(Message::Pointer(PointerEvent::up(0.0, 0.0, 120))),
            Effect::PassToContentAndRequestFrame
        );
        while layout.handle(Message::Frame(Duration::from_millis(16))) == Effect::RequestFrame {}
        assert_eq!(layout.controller().position(), Point::new(0, 0));
    }

    #[test]
    fn frames_are_requested_until_settled() {
        let mut layout = layout();
        layout.controller_mut().take_listener();
        layout.handle(Message::Pointer(PointerEvent::down(0.0, 0.0, 0)));
        layout.handle(Message::Pointer(PointerEvent::moved(0.0, 100.0, 16)));
        let effect = layout.handle(Message::Pointer(PointerEvent::up(0.0, 100.0, 32)));
        assert_eq!(effect, Effect::RequestFrame);

        let mut frames = 0;
        while layout.handle(Message::Frame(Duration::from_millis(16))) == Effect::RequestFrame {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(layout.state(), DragState::Idle);
        assert_eq!(layout.controller().position(), Point::new(0, 0));
    }
}
