//! Terminal drawing of a light snapshot.
//!
//! The light is painted with upper-half blocks so each cell carries two
//! vertically stacked pixels, which keeps shapes round on ordinary 1:2
//! terminal cells. Everything is queued and flushed once per frame.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::common::constants::HALO_SCALE;
use crate::i18n::Labels;
use crate::state::{Glow, LightSnapshot, Rgb, Shape};
use crate::ui::Dialog;
use crate::ui::dialog::{ClockField, ColorField, TimerMode};
use crate::ui::layout::{Layout, Rect, SWATCH_STRIDE};
use crate::ui::slider::Slider;

const DIALOG_WIDTH: u16 = 56;
const DIALOG_BACKGROUND: Rgb = Rgb::new(0x1C, 0x1C, 0x1E);

/// Everything needed to paint one frame.
pub struct Frame<'a> {
    pub snapshot: &'a LightSnapshot,
    pub labels: &'static Labels,
    pub layout: &'a Layout,
    pub dialog: Option<&'a Dialog>,
    pub screen_capable: bool,
}

pub fn draw<W: Write>(out: &mut W, frame: &Frame<'_>) -> io::Result<()> {
    let snapshot = frame.snapshot;
    draw_light(out, snapshot.shape, snapshot.glow, snapshot.halo, frame.layout.light)?;
    draw_panel(out, frame)?;
    if let Some(dialog) = frame.dialog {
        draw_dialog(out, dialog, frame)?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Color of pixel (`px`, `py`) in a `width` x `height` pixel canvas.
///
/// The halo extends `HALO_SCALE` times past the shape; the shape is sized so
/// that the halo just fits the shorter side.
pub fn light_pixel(
    shape: Shape,
    glow: Glow,
    halo: Glow,
    px: u16,
    py: u16,
    width: u16,
    height: u16,
) -> Rgb {
    let radius = f32::from(width.min(height)) / 2.0 / HALO_SCALE;
    if radius < 1.0 {
        return Rgb::BLACK;
    }

    let x = (f32::from(px) + 0.5 - f32::from(width) / 2.0) / radius;
    let y = (f32::from(py) + 0.5 - f32::from(height) / 2.0) / radius;

    if shape.contains(x, y) {
        glow.composite()
    } else if shape.contains(x / HALO_SCALE, y / HALO_SCALE) {
        halo.composite()
    } else {
        Rgb::BLACK
    }
}

fn draw_light<W: Write>(out: &mut W, shape: Shape, glow: Glow, halo: Glow, area: Rect) -> io::Result<()> {
    let pixel_height = area.height.saturating_mul(2);
    let mut current: Option<(Rgb, Rgb)> = None;

    for row in 0..area.height {
        queue!(out, MoveTo(area.x, area.y + row))?;
        for column in 0..area.width {
            let top = light_pixel(shape, glow, halo, column, row * 2, area.width, pixel_height);
            let bottom = light_pixel(shape, glow, halo, column, row * 2 + 1, area.width, pixel_height);
            if current != Some((top, bottom)) {
                queue!(
                    out,
                    SetForegroundColor(term_color(top)),
                    SetBackgroundColor(term_color(bottom))
                )?;
                current = Some((top, bottom));
            }
            queue!(out, Print('▀'))?;
        }
    }
    Ok(())
}

fn draw_panel<W: Write>(out: &mut W, frame: &Frame<'_>) -> io::Result<()> {
    let layout = frame.layout;
    let labels = frame.labels;
    let snapshot = frame.snapshot;
    let accent = term_color(snapshot.accent);
    let dim = term_color(Rgb::NEUTRAL_GRAY);
    let text_width = layout.columns.saturating_sub(layout.panel_x).saturating_sub(1);

    queue!(out, SetBackgroundColor(Color::Black))?;
    for row in layout.light.height..layout.rows {
        queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
    }

    let marker = if snapshot.is_on { '●' } else { '○' };
    queue!(
        out,
        MoveTo(layout.panel_x, layout.toggle_row),
        SetForegroundColor(accent),
        Print(fit(&format!("{marker} {}", labels.on_off(snapshot.is_on)), text_width))
    )?;

    if snapshot.is_on {
        draw_slider(
            out,
            layout.panel_x,
            layout.columns,
            &layout.brightness,
            labels.brightness,
            snapshot.brightness,
            accent,
        )?;
        let (screen_label, screen_color) = if frame.screen_capable {
            (labels.screen_brightness, accent)
        } else {
            (labels.screen_brightness_unavailable, dim)
        };
        draw_slider(
            out,
            layout.panel_x,
            layout.columns,
            &layout.screen,
            screen_label,
            snapshot.screen_brightness,
            screen_color,
        )?;

        queue!(
            out,
            MoveTo(layout.panel_x, layout.swatch_row),
            SetForegroundColor(accent),
            Print(fit(
                labels.change_color,
                layout.swatch_x.saturating_sub(layout.panel_x + 1).min(text_width)
            ))
        )?;
        for (index, color) in snapshot.palette.iter().enumerate() {
            // A swatch takes four cells; skip the ones that would wrap.
            if layout.swatch_column(index).saturating_add(SWATCH_STRIDE) > layout.columns {
                break;
            }
            let (open, close) = if index == snapshot.color_index {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            queue!(
                out,
                MoveTo(layout.swatch_column(index), layout.swatch_row),
                SetForegroundColor(accent),
                Print(open),
                SetForegroundColor(term_color(color)),
                Print("██"),
                SetForegroundColor(accent),
                Print(close)
            )?;
        }

        let timer_text = match &snapshot.timer_text {
            Some(text) => format!("⏱ {text} · {}", labels.cancel),
            None => format!("⏱ {}", labels.set_timer),
        };
        queue!(
            out,
            MoveTo(layout.panel_x, layout.action_row),
            SetForegroundColor(accent),
            Print(fit(
                &format!("◆ {}: {}", labels.change_style, labels.style(snapshot.style)),
                layout.timer_x.saturating_sub(layout.panel_x + 1)
            )),
            MoveTo(layout.timer_x, layout.action_row),
            Print(fit(&timer_text, layout.columns.saturating_sub(layout.timer_x)))
        )?;
    }

    let hint = if frame.dialog.is_some() {
        labels.dialog_hint
    } else {
        labels.hint
    };
    queue!(
        out,
        MoveTo(layout.panel_x, layout.hint_row),
        SetForegroundColor(dim),
        Print(fit(hint, text_width))
    )?;
    Ok(())
}

fn draw_slider<W: Write>(
    out: &mut W,
    label_x: u16,
    columns: u16,
    slider: &Slider,
    label: &str,
    value: f32,
    color: Color,
) -> io::Result<()> {
    let label_columns = slider.x.min(columns).saturating_sub(label_x + 1);
    queue!(
        out,
        MoveTo(label_x, slider.row),
        SetForegroundColor(color),
        Print(fit(label, label_columns))
    )?;
    if slider.x >= columns {
        return Ok(());
    }
    let track = format!(
        "{} {:>3}%",
        slider.track(value),
        (value * 100.0).round() as i32
    );
    queue!(
        out,
        MoveTo(slider.x, slider.row),
        Print(fit(&track, columns - slider.x))
    )
}

/// A run of dialog text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub selected: bool,
    pub color: Option<Rgb>,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selected: false,
            color: None,
        }
    }

    fn choice(text: impl Into<String>, selected: bool) -> Self {
        Self {
            text: text.into(),
            selected,
            color: None,
        }
    }
}

/// Title plus body lines of a dialog.
pub fn dialog_lines(dialog: &Dialog, labels: &Labels) -> Vec<Vec<Span>> {
    let buttons = vec![Span::plain(format!(
        "⏎ {}   esc {}",
        labels.confirm, labels.cancel
    ))];

    match dialog {
        Dialog::Timer(timer) => {
            let modes = vec![
                Span::plain(format!("{}: ", labels.timer_mode)),
                Span::choice(labels.mode_duration, timer.mode == TimerMode::Duration),
                Span::plain(" "),
                Span::choice(labels.mode_clock_time, timer.mode == TimerMode::ClockTime),
            ];
            let picker = match timer.mode {
                TimerMode::Duration => {
                    let mut spans = vec![Span::plain(format!("{}: ", labels.choose_duration))];
                    for (index, name) in labels.presets.iter().enumerate() {
                        if index > 0 {
                            spans.push(Span::plain(" "));
                        }
                        spans.push(Span::choice(*name, index == timer.preset.index()));
                    }
                    spans
                }
                TimerMode::ClockTime => vec![
                    Span::plain(format!("{}: ", labels.choose_time)),
                    Span::choice(format!("{:02}", timer.hour), timer.field == ClockField::Hour),
                    Span::plain(":"),
                    Span::choice(
                        format!("{:02}", timer.minute),
                        timer.field == ClockField::Minute,
                    ),
                ],
            };
            vec![vec![Span::plain(labels.set_timer)], modes, picker, buttons]
        }
        Dialog::Color(color) => {
            let channels = vec![
                Span::choice(format!("R {:>3}", color.color.r), color.field == ColorField::Red),
                Span::plain("  "),
                Span::choice(format!("G {:>3}", color.color.g), color.field == ColorField::Green),
                Span::plain("  "),
                Span::choice(format!("B {:>3}", color.color.b), color.field == ColorField::Blue),
            ];
            let hex = vec![
                Span::choice(format!("#{:<6}", color.hex), color.field == ColorField::Hex),
                Span::plain("  "),
                Span {
                    text: "████".to_string(),
                    selected: false,
                    color: Some(color.color),
                },
            ];
            vec![vec![Span::plain(labels.custom_color)], channels, hex, buttons]
        }
    }
}

fn draw_dialog<W: Write>(out: &mut W, dialog: &Dialog, frame: &Frame<'_>) -> io::Result<()> {
    let layout = frame.layout;
    let lines = dialog_lines(dialog, frame.labels);
    let width = DIALOG_WIDTH.min(layout.columns.saturating_sub(2));
    let height = lines.len() as u16 + 2;
    if width < 4 || layout.rows < height {
        return Ok(());
    }
    let x = (layout.columns - width) / 2;
    let y = (layout.rows - height) / 2;
    let inner = usize::from(width - 2);
    let accent = term_color(frame.snapshot.accent);

    queue!(
        out,
        SetBackgroundColor(term_color(DIALOG_BACKGROUND)),
        SetForegroundColor(accent),
        MoveTo(x, y),
        Print(format!("┏{}┓", "━".repeat(inner))),
        MoveTo(x, y + height - 1),
        Print(format!("┗{}┛", "━".repeat(inner)))
    )?;

    for (offset, spans) in lines.iter().enumerate() {
        let row = y + 1 + offset as u16;
        queue!(
            out,
            MoveTo(x, row),
            SetForegroundColor(accent),
            Print(format!("┃{}┃", " ".repeat(inner))),
            MoveTo(x + 2, row)
        )?;

        let mut remaining = width.saturating_sub(4);
        for span in spans {
            if remaining == 0 {
                break;
            }
            let text = fit(&span.text, remaining);
            remaining = remaining.saturating_sub(display_width(&text));
            queue!(
                out,
                SetForegroundColor(span.color.map_or(accent, term_color))
            )?;
            if span.selected {
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(text),
                    SetAttribute(Attribute::NoReverse)
                )?;
            } else {
                queue!(out, Print(text))?;
            }
        }
    }
    Ok(())
}

fn char_width(c: char) -> u16 {
    c.width().map_or(0, |w| w as u16)
}

pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Truncate `text` to at most `columns` terminal columns.
pub fn fit(text: &str, columns: u16) -> String {
    let mut used = 0u16;
    text.chars()
        .take_while(|c| {
            used = used.saturating_add(char_width(*c));
            used <= columns
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LightStyle;
    use crate::ui::dialog::{ColorDialog, TimerDialog};
    use chrono::NaiveTime;

    fn glow(color: Rgb, opacity: f32) -> Glow {
        Glow { color, opacity }
    }

    #[test]
    fn test_light_pixel_regions() {
        let shape = LightStyle::Circle.shape();
        let core = glow(Rgb::WHITE, 1.0);
        let halo = glow(Rgb::WHITE, 0.3);

        // 40x40 canvas: radius 40/2/1.2 ~ 16.7
        assert_eq!(light_pixel(shape, core, halo, 20, 20, 40, 40), Rgb::WHITE);
        assert_eq!(
            light_pixel(shape, core, halo, 20, 2, 40, 40),
            Rgb::WHITE.blend_over(Rgb::BLACK, 0.3)
        );
        assert_eq!(light_pixel(shape, core, halo, 0, 0, 40, 40), Rgb::BLACK);
    }

    #[test]
    fn test_ring_has_dark_center() {
        let shape = LightStyle::Ring.shape();
        let core = glow(Rgb::WHITE, 1.0);
        let halo = glow(Rgb::WHITE, 0.3);
        assert_ne!(light_pixel(shape, core, halo, 20, 20, 40, 40), Rgb::WHITE);
    }

    #[test]
    fn test_tiny_canvas_is_dark() {
        let shape = LightStyle::Circle.shape();
        let core = glow(Rgb::WHITE, 1.0);
        assert_eq!(light_pixel(shape, core, core, 0, 0, 1, 2), Rgb::BLACK);
    }

    #[test]
    fn test_fit_counts_wide_characters() {
        assert_eq!(fit("Light on", 5), "Light");
        assert_eq!(fit("屏幕亮度", 5), "屏幕");
        assert_eq!(display_width("屏幕亮度"), 8);
        assert_eq!(fit("abc", 10), "abc");
    }

    #[test]
    fn test_fit_never_exceeds_columns() {
        for text in ["⏱ 30 minutes", "◆ 切换样式: 圆形", "屏幕亮度（不可用）", "Light on"] {
            for columns in 0..12 {
                let clipped = fit(text, columns);
                assert!(display_width(&clipped) <= columns, "{text:?} at {columns}");
                assert!(text.starts_with(&clipped));
            }
        }
        // Zero-width marks add no columns.
        assert_eq!(display_width("e\u{301}"), 1);
    }

    fn panel_output(columns: u16) -> String {
        let state = crate::state::LightState::new();
        let snapshot = state.snapshot(chrono::Local::now(), Labels::english());
        let layout = Layout::compute(columns, 16);
        let mut buffer: Vec<u8> = Vec::new();
        draw(
            &mut buffer,
            &Frame {
                snapshot: &snapshot,
                labels: Labels::english(),
                layout: &layout,
                dialog: None,
                screen_capable: true,
            },
        )
        .unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }

    #[test]
    fn test_panel_rows_are_clipped_on_narrow_terminals() {
        // 12 columns: 9 for full rows, 3 for the style entry.
        let narrow = panel_output(12);
        assert!(narrow.contains("Change co"));
        assert!(!narrow.contains("Change col"));
        assert!(narrow.contains("Brightnes"));
        assert!(!narrow.contains("Brightness"));
        assert!(narrow.contains("◆ C"));
        assert!(!narrow.contains("◆ Ch"));
        assert!(!narrow.contains("██"));

        let wide = panel_output(100);
        assert!(wide.contains("◆ Change style: Circle"));
        assert!(wide.contains("Change color"));
        assert!(wide.contains(" 50%"));
        assert_eq!(wide.matches("██").count(), 8);
    }

    #[test]
    fn test_timer_dialog_lines() {
        let labels = Labels::english();
        let dialog = Dialog::Timer(TimerDialog::new(NaiveTime::from_hms_opt(21, 0, 0).unwrap()));
        let lines = dialog_lines(&dialog, labels);

        assert_eq!(lines[0][0].text, "Set timer");
        let selected: Vec<&str> = lines[2]
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(selected, vec!["30 minutes"]);
    }

    #[test]
    fn test_color_dialog_preview() {
        let labels = Labels::chinese();
        let dialog = Dialog::Color(ColorDialog::new(Rgb::new(0xFF, 0xD1, 0xA4)));
        let lines = dialog_lines(&dialog, labels);

        assert_eq!(lines[0][0].text, "自定义颜色");
        assert_eq!(lines[2][0].text, "#FFD1A4");
        assert_eq!(lines[2][2].color, Some(Rgb::new(0xFF, 0xD1, 0xA4)));
        assert!(lines[1][0].selected);
    }
}
