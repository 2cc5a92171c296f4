//! Terminal presentation of the light.
//!
//! The UI owns only presentation state (layout, open dialog, held slider).
//! It turns terminal events into `Intent`s for the controller and paints
//! `LightSnapshot`s; it never mutates the light itself.

pub mod dialog;
pub mod input;
pub mod layout;
pub mod render;
pub mod slider;

use chrono::NaiveTime;
use crossterm::event::{Event, KeyEventKind};
use std::io::{self, Write};

use crate::core::Intent;
use crate::i18n::Labels;
use crate::state::LightSnapshot;
use dialog::{ColorDialog, DialogOutcome, TimerDialog};
use input::{DragTarget, InputContext, UiAction};
use layout::Layout;
use render::Frame;

/// An open modal dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Timer(TimerDialog),
    Color(ColorDialog),
}

pub struct Ui {
    layout: Layout,
    dialog: Option<Dialog>,
    drag: Option<DragTarget>,
}

impl Ui {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            layout: Layout::compute(columns, rows),
            dialog: None,
            drag: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.layout = Layout::compute(columns, rows);
        self.drag = None;
    }

    /// Translate one terminal event into at most one intent.
    ///
    /// `now` seeds the clock picker when the timer dialog opens.
    pub fn handle_event(
        &mut self,
        event: &Event,
        snapshot: &LightSnapshot,
        screen_capable: bool,
        now: NaiveTime,
    ) -> Option<Intent> {
        let context = InputContext {
            is_on: snapshot.is_on,
            timer_active: snapshot.timer_text.is_some(),
            screen_capable,
        };

        if let Event::Resize(columns, rows) = *event {
            self.resize(columns, rows);
            return None;
        }

        if let Some(dialog) = self.dialog.as_mut() {
            let Event::Key(key) = event else {
                return None;
            };
            if key.kind == KeyEventKind::Release {
                return None;
            }
            // Ctrl+C always ends the session, dialog or not.
            if input::is_interrupt(key) {
                return Some(Intent::Quit);
            }
            let (intent, close) = match dialog {
                Dialog::Timer(timer) => match timer.handle_key(*key) {
                    DialogOutcome::Pending => (None, false),
                    DialogOutcome::Commit(request) => (Some(Intent::RequestTimer(request)), true),
                    DialogOutcome::Cancel => (None, true),
                },
                Dialog::Color(color) => match color.handle_key(*key) {
                    DialogOutcome::Pending => (None, false),
                    DialogOutcome::Commit(rgb) => (Some(Intent::SetCustomColor(rgb)), true),
                    DialogOutcome::Cancel => (None, true),
                },
            };
            if close {
                self.dialog = None;
            }
            return intent;
        }

        let action = match event {
            Event::Key(key) => input::map_key(*key, context),
            Event::Mouse(mouse) => input::map_mouse(*mouse, &self.layout, context, &mut self.drag),
            _ => None,
        }?;

        match action {
            UiAction::Intent(intent) => Some(intent),
            UiAction::OpenTimerDialog => {
                self.dialog = Some(Dialog::Timer(TimerDialog::new(now)));
                None
            }
            UiAction::OpenColorDialog => {
                self.dialog = Some(Dialog::Color(ColorDialog::new(snapshot.palette.custom())));
                None
            }
        }
    }

    /// Drop presentation state the new snapshot no longer supports.
    pub fn sync(&mut self, snapshot: &LightSnapshot) {
        if !snapshot.is_on {
            self.dialog = None;
            self.drag = None;
        }
    }

    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        snapshot: &LightSnapshot,
        labels: &'static Labels,
        screen_capable: bool,
    ) -> io::Result<()> {
        render::draw(
            out,
            &Frame {
                snapshot,
                labels,
                layout: &self.layout,
                dialog: self.dialog.as_ref(),
                screen_capable,
            },
        )
    }
}
