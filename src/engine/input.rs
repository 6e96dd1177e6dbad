use crate::{
    engine::config::EngineConfig,
    foundation::core::Point,
    scene::event::{
        KeyEventKind, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
        TouchEvent, TouchEventKind, TouchPoint,
    },
};

/// Device input in client coordinates, as delivered by the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawInput {
    MouseDown {
        position: Point,
        #[serde(default)]
        button: Option<MouseButton>,
    },
    MouseUp {
        position: Point,
        #[serde(default)]
        button: Option<MouseButton>,
    },
    MouseMove {
        position: Point,
    },
    TouchStart {
        touches: Vec<TouchPoint>,
    },
    TouchEnd {
        touches: Vec<TouchPoint>,
    },
    TouchMove {
        touches: Vec<TouchPoint>,
    },
    TouchCancel {
        #[serde(default)]
        touches: Vec<TouchPoint>,
    },
    KeyDown(KeyInput),
    KeyUp(KeyInput),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub repeat: bool,
}

/// Typed event in scene coordinates.
#[derive(Clone, Debug)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Touch(TouchEvent),
    Keyboard(KeyboardEvent),
}

impl RawInput {
    /// Translate into a scene-space event using the viewport in `config`.
    pub fn normalize(&self, config: &EngineConfig) -> InputEvent {
        let mouse = |kind, position: &Point, button: Option<MouseButton>| {
            InputEvent::Mouse(
                MouseEvent::new(kind, config.normalize(*position)).with_button(button),
            )
        };
        let touch = |kind, touches: &[TouchPoint]| {
            let touches = touches
                .iter()
                .map(|t| TouchPoint {
                    id: t.id,
                    position: config.normalize(t.position),
                })
                .collect();
            InputEvent::Touch(TouchEvent::new(kind, touches))
        };
        let key = |kind, input: &KeyInput| {
            InputEvent::Keyboard(
                KeyboardEvent::new(kind, input.key.as_str(), input.code.as_str())
                    .with_modifiers(input.modifiers)
                    .with_repeat(input.repeat),
            )
        };

        match self {
            Self::MouseDown { position, button } => mouse(MouseEventKind::Down, position, *button),
            Self::MouseUp { position, button } => mouse(MouseEventKind::Up, position, *button),
            Self::MouseMove { position } => mouse(MouseEventKind::Move, position, None),
            Self::TouchStart { touches } => touch(TouchEventKind::Start, touches),
            Self::TouchEnd { touches } => touch(TouchEventKind::End, touches),
            Self::TouchMove { touches } => touch(TouchEventKind::Move, touches),
            Self::TouchCancel { touches } => touch(TouchEventKind::Cancel, touches),
            Self::KeyDown(input) => key(KeyEventKind::Down, input),
            Self::KeyUp(input) => key(KeyEventKind::Up, input),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/input.rs"]
mod tests;
