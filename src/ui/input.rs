//! Key and pointer bindings for the main screen.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::common::constants::SLIDER_STEP;
use crate::core::Intent;
use crate::ui::layout::{Hit, Layout};

/// What a main-screen event asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Intent(Intent),
    OpenTimerDialog,
    OpenColorDialog,
}

/// Slider currently held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Brightness,
    ScreenBrightness,
}

/// What the bindings need to know about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    pub is_on: bool,
    pub timer_active: bool,
    pub screen_capable: bool,
}

impl InputContext {
    fn timer_action(self) -> UiAction {
        if self.timer_active {
            UiAction::Intent(Intent::CancelTimer)
        } else {
            UiAction::OpenTimerDialog
        }
    }
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Map a key press. Controls other than on/off and quit are inert while the
/// light is off.
pub fn map_key(key: KeyEvent, context: InputContext) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_interrupt(&key) {
        return Some(UiAction::Intent(Intent::Quit));
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(UiAction::Intent(Intent::Quit)),
        KeyCode::Char(' ') | KeyCode::Enter => return Some(UiAction::Intent(Intent::Toggle)),
        _ => {}
    }
    if !context.is_on {
        return None;
    }

    let intent = match key.code {
        KeyCode::Left => Intent::AdjustBrightness(-SLIDER_STEP),
        KeyCode::Right => Intent::AdjustBrightness(SLIDER_STEP),
        KeyCode::Up if context.screen_capable => Intent::AdjustScreenBrightness(SLIDER_STEP),
        KeyCode::Down if context.screen_capable => Intent::AdjustScreenBrightness(-SLIDER_STEP),
        KeyCode::Char('c') => Intent::CycleColor,
        KeyCode::Char(c @ '1'..='8') => Intent::SelectColor(c as usize - '1' as usize),
        KeyCode::Char('s') => Intent::CycleStyle,
        KeyCode::Char('t') => return Some(context.timer_action()),
        KeyCode::Char('p') => return Some(UiAction::OpenColorDialog),
        _ => return None,
    };
    Some(UiAction::Intent(intent))
}

/// Map a pointer event, tracking slider drags in `drag`.
pub fn map_mouse(
    mouse: MouseEvent,
    layout: &Layout,
    context: InputContext,
    drag: &mut Option<DragTarget>,
) -> Option<UiAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = layout.hit(mouse.column, mouse.row, context.is_on)?;
            let action = match hit {
                Hit::Toggle => UiAction::Intent(Intent::Toggle),
                Hit::Brightness(value) => {
                    *drag = Some(DragTarget::Brightness);
                    UiAction::Intent(Intent::SetBrightness(value))
                }
                Hit::ScreenBrightness(value) => {
                    if !context.screen_capable {
                        return None;
                    }
                    *drag = Some(DragTarget::ScreenBrightness);
                    UiAction::Intent(Intent::SetScreenBrightness(value))
                }
                Hit::Color(index) => UiAction::Intent(Intent::SelectColor(index)),
                Hit::Style => UiAction::Intent(Intent::CycleStyle),
                Hit::Timer => context.timer_action(),
            };
            Some(action)
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !context.is_on {
                *drag = None;
                return None;
            }
            let intent = match (*drag)? {
                DragTarget::Brightness => {
                    Intent::SetBrightness(layout.brightness.value_at(mouse.column))
                }
                DragTarget::ScreenBrightness => {
                    Intent::SetScreenBrightness(layout.screen.value_at(mouse.column))
                }
            };
            Some(UiAction::Intent(intent))
        }
        MouseEventKind::Up(_) => {
            *drag = None;
            None
        }
        MouseEventKind::ScrollUp if context.is_on => {
            Some(UiAction::Intent(Intent::AdjustBrightness(SLIDER_STEP)))
        }
        MouseEventKind::ScrollDown if context.is_on => {
            Some(UiAction::Intent(Intent::AdjustBrightness(-SLIDER_STEP)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: InputContext = InputContext {
        is_on: true,
        timer_active: false,
        screen_capable: true,
    };
    const OFF: InputContext = InputContext {
        is_on: false,
        timer_active: false,
        screen_capable: true,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_bindings() {
        let quit = Some(UiAction::Intent(Intent::Quit));
        assert_eq!(map_key(key(KeyCode::Char('q')), OFF), quit);
        assert_eq!(map_key(key(KeyCode::Esc), ON), quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), ON),
            quit
        );
    }

    #[test]
    fn test_controls_hidden_while_off() {
        assert_eq!(
            map_key(key(KeyCode::Char(' ')), OFF),
            Some(UiAction::Intent(Intent::Toggle))
        );
        assert_eq!(map_key(key(KeyCode::Right), OFF), None);
        assert_eq!(map_key(key(KeyCode::Char('c')), OFF), None);
        assert_eq!(map_key(key(KeyCode::Char('t')), OFF), None);
    }

    #[test]
    fn test_light_bindings() {
        assert_eq!(
            map_key(key(KeyCode::Right), ON),
            Some(UiAction::Intent(Intent::AdjustBrightness(SLIDER_STEP)))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3')), ON),
            Some(UiAction::Intent(Intent::SelectColor(2)))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('8')), ON),
            Some(UiAction::Intent(Intent::SelectColor(7)))
        );
        assert_eq!(map_key(key(KeyCode::Char('9')), ON), None);
        assert_eq!(map_key(key(KeyCode::Char('p')), ON), Some(UiAction::OpenColorDialog));
    }

    #[test]
    fn test_screen_keys_need_capability() {
        let incapable = InputContext {
            screen_capable: false,
            ..ON
        };
        assert_eq!(map_key(key(KeyCode::Up), incapable), None);
        assert_eq!(
            map_key(key(KeyCode::Down), ON),
            Some(UiAction::Intent(Intent::AdjustScreenBrightness(-SLIDER_STEP)))
        );
    }

    #[test]
    fn test_timer_key_opens_or_cancels() {
        assert_eq!(map_key(key(KeyCode::Char('t')), ON), Some(UiAction::OpenTimerDialog));
        let armed = InputContext {
            timer_active: true,
            ..ON
        };
        assert_eq!(
            map_key(key(KeyCode::Char('t')), armed),
            Some(UiAction::Intent(Intent::CancelTimer))
        );
    }

    #[test]
    fn test_slider_drag() {
        let layout = Layout::compute(80, 30);
        let mut drag = None;
        let row = layout.brightness.row;

        let down = map_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), layout.brightness.x, row),
            &layout,
            ON,
            &mut drag,
        );
        assert_eq!(down, Some(UiAction::Intent(Intent::SetBrightness(0.1))));
        assert_eq!(drag, Some(DragTarget::Brightness));

        // Dragging off the track row still follows the held slider.
        let end = layout.brightness.x + layout.brightness.width + 10;
        let moved = map_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), end, row + 3),
            &layout,
            ON,
            &mut drag,
        );
        assert_eq!(moved, Some(UiAction::Intent(Intent::SetBrightness(1.0))));

        map_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), end, row),
            &layout,
            ON,
            &mut drag,
        );
        assert_eq!(drag, None);
    }

    #[test]
    fn test_screen_slider_ignored_without_capability() {
        let layout = Layout::compute(80, 30);
        let mut drag = None;
        let incapable = InputContext {
            screen_capable: false,
            ..ON
        };
        let action = map_mouse(
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                layout.screen.x,
                layout.screen.row,
            ),
            &layout,
            incapable,
            &mut drag,
        );
        assert_eq!(action, None);
        assert_eq!(drag, None);
    }

    #[test]
    fn test_click_swatch_and_toggle() {
        let layout = Layout::compute(80, 30);
        let mut drag = None;
        assert_eq!(
            map_mouse(
                mouse(
                    MouseEventKind::Down(MouseButton::Left),
                    layout.swatch_column(4),
                    layout.swatch_row
                ),
                &layout,
                ON,
                &mut drag,
            ),
            Some(UiAction::Intent(Intent::SelectColor(4)))
        );
        assert_eq!(
            map_mouse(
                mouse(MouseEventKind::Down(MouseButton::Left), 3, layout.toggle_row),
                &layout,
                OFF,
                &mut drag,
            ),
            Some(UiAction::Intent(Intent::Toggle))
        );
    }
}
