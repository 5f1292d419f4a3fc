use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::form::{BedCapacityForm, FormField, MessageKind};

use super::helpers::{centered_rect, focus_style};

/// Longest count a numeric field accepts.
pub(crate) const MAX_COUNT_DIGITS: usize = 6;

/// Focusable elements of the form, in Tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Focus {
    Field(FormField),
    Cancel,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Field(FormField::Category),
        Focus::Field(FormField::TotalCapacity),
        Focus::Field(FormField::CurrentOccupancy),
        Focus::Cancel,
        Focus::Submit,
    ];

    fn step(self, offset: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + offset).rem_euclid(len) as usize]
    }
}

/// The form plus the terminal-only focus state.
pub(crate) struct FormScreen {
    pub(crate) form: BedCapacityForm,
    pub(crate) focus: Focus,
}

impl FormScreen {
    pub(crate) fn new(form: BedCapacityForm) -> Self {
        // Category can't be changed while editing, so start on the first count.
        let focus = if form.is_edit() {
            Focus::Field(FormField::TotalCapacity)
        } else {
            Focus::Field(FormField::Category)
        };
        Self { form, focus }
    }

    fn move_focus(&mut self, offset: isize) {
        let mut next = self.focus.step(offset);
        if self.form.is_edit() && next == Focus::Field(FormField::Category) {
            next = next.step(offset);
        }
        self.focus = next;
    }

    /// Keys are ignored while a backend call is queued. Enter only queues a save;
    /// the caller resolves it after the loading frame is drawn.
    pub(crate) fn handle_key(&mut self, code: KeyCode) {
        if self.form.is_loading() {
            return;
        }

        match code {
            KeyCode::Esc => {
                if self.form.message().is_some() {
                    self.form.dismiss_message();
                } else {
                    self.form.cancel();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
            KeyCode::Left | KeyCode::Right => {
                let step = if code == KeyCode::Left { -1 } else { 1 };
                match self.focus {
                    Focus::Field(FormField::Category) => self.form.cycle_category(step),
                    Focus::Cancel => self.focus = Focus::Submit,
                    Focus::Submit => self.focus = Focus::Cancel,
                    Focus::Field(_) => {}
                }
            }
            KeyCode::Backspace => {
                if let Focus::Field(field) = self.focus {
                    if field != FormField::Category {
                        let mut value = self.form.values().get(field).to_string();
                        value.pop();
                        self.form.set_field(field, value);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if let Focus::Field(field) = self.focus {
                    let value = self.form.values().get(field);
                    if field != FormField::Category
                        && ch.is_ascii_digit()
                        && value.chars().count() < MAX_COUNT_DIGITS
                    {
                        let mut value = value.to_string();
                        value.push(ch);
                        self.form.set_field(field, value);
                    }
                }
            }
            KeyCode::Enter => match self.focus {
                Focus::Cancel => self.form.cancel(),
                _ => {
                    self.form.request_submit();
                }
            },
            _ => {}
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 90, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(self.form.header_text())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if self.form.is_loading() {
            let loading = Paragraph::new("Loading...").alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        let mut lines = Vec::new();
        if let Some(message) = self.form.message() {
            let color = match message.kind {
                MessageKind::Success => Color::Green,
                MessageKind::Error => Color::Red,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    message.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(""));
        }

        let mut cursor = None;
        for field in FormField::ALL {
            lines.push(Line::from(Span::styled(
                field.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let focused = self.focus == Focus::Field(field);
            if field == FormField::Category {
                lines.push(self.category_line(focused));
                lines.push(self.options_line());
            } else {
                let value = self.form.values().get(field);
                if focused {
                    let offset = u16::try_from(value.chars().count() + 2).unwrap_or(u16::MAX);
                    let row = u16::try_from(lines.len()).unwrap_or(u16::MAX);
                    cursor = Some((
                        inner.x.saturating_add(offset),
                        inner.y.saturating_add(row),
                    ));
                }
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(value.to_string(), focus_style(focused)),
                ]));
            }
            let error = self.form.errors().get(field);
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        lines.push(self.buttons_line());

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    fn category_line(&self, focused: bool) -> Line<'static> {
        let options = self.form.categories();
        let current = options
            .get(self.form.selected_category_index())
            .map(|option| option.label.clone())
            .unwrap_or_default();

        if self.form.is_edit() {
            return Line::from(vec![
                Span::raw("  "),
                Span::styled(current, Style::default().fg(Color::DarkGray)),
                Span::styled(" (locked)", Style::default().fg(Color::DarkGray)),
            ]);
        }

        Line::from(vec![
            Span::raw("  < "),
            Span::styled(current, focus_style(focused)),
            Span::raw(" >"),
        ])
    }

    /// Every real category, used ones dimmed and struck through.
    fn options_line(&self) -> Line<'static> {
        let selected = self.form.selected_category_index();
        let mut spans = vec![Span::raw("  ")];
        for (idx, option) in self.form.categories().iter().enumerate() {
            if option.is_placeholder() {
                continue;
            }
            let style = if option.disabled {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if idx == selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(option.label.clone(), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    fn buttons_line(&self) -> Line<'static> {
        let button = |label: &str, focused: bool| {
            let style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Span::styled(format!("[ {label} ]"), style)
        };

        Line::from(vec![
            button("Cancel", self.focus == Focus::Cancel),
            Span::raw("   "),
            button(self.form.submit_label(), self.focus == Focus::Submit),
        ])
    }
}
