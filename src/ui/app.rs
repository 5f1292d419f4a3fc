use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

use crate::api::CapacityApi;
use crate::form::{BedCapacityForm, FormProps, MessageKind};
use crate::routes::Route;

use super::form_view::FormScreen;
use super::helpers::{key_style, surface_error};
use super::overview::OverviewScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which route is currently on screen.
enum Screen {
    Overview(OverviewScreen),
    Form(FormScreen),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application shell: owns the backend, routes between screens and keeps the
/// footer status.
pub struct App<A: CapacityApi> {
    api: A,
    screen: Screen,
    status: Option<StatusMessage>,
    finished: Option<Route>,
}

impl<A: CapacityApi> App<A> {
    /// Build the shell and open `start`.
    pub fn new(api: A, start: Route) -> Result<Self> {
        let mut app = Self {
            api,
            screen: Screen::Overview(OverviewScreen::new(start.facility_id(), Vec::new())),
            status: None,
            finished: None,
        };
        app.navigate(start)?;
        Ok(app)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Route of the screen being shown.
    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Overview(overview) => Route::FacilityOverview {
                facility_id: overview.facility_id,
            },
            Screen::Form(screen) => {
                let props = screen.form.props();
                Route::BedCapacity {
                    facility_id: props.facility_id,
                    record_id: props.record_id,
                }
            }
        }
    }

    /// Route outside this application that ended the session, if any.
    pub fn finished(&self) -> Option<Route> {
        self.finished
    }

    /// Current footer text.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn navigate(&mut self, route: Route) -> Result<()> {
        info!(path = %route, "navigate");
        match route {
            Route::FacilityOverview { facility_id } => {
                let listed = self
                    .api
                    .list_capacity(facility_id)
                    .with_context(|| format!("failed to list capacity for facility {facility_id}"));
                let records = match listed {
                    Ok(response) => response.data.unwrap_or_default(),
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Vec::new()
                    }
                };
                self.screen = Screen::Overview(OverviewScreen::new(facility_id, records));
            }
            Route::BedCapacity {
                facility_id,
                record_id,
            } => {
                let mut form = BedCapacityForm::new(FormProps {
                    facility_id,
                    record_id,
                });
                form.begin_load();
                self.screen = Screen::Form(FormScreen::new(form));
            }
            Route::DoctorAssignment { .. } => {
                self.finished = Some(route);
            }
        }
        Ok(())
    }

    /// Whether the form on screen is waiting for a backend call.
    pub fn is_loading(&self) -> bool {
        matches!(&self.screen, Screen::Form(screen) if screen.form.is_loading())
    }

    /// Run the backend call the form queued, then follow any navigation it
    /// asked for. Called after the loading frame is drawn; `Ok(true)` ends the
    /// event loop.
    pub fn finish_loading(&mut self) -> Result<bool> {
        let Screen::Form(screen) = &mut self.screen else {
            return Ok(self.finished.is_some());
        };
        let outcome = screen.form.resolve(&self.api);
        let redirected_on_load = outcome.is_none() && screen.form.navigation().is_some();
        self.follow_form_navigation()?;
        if redirected_on_load {
            self.set_status(
                "Every bed type already has a capacity entry.",
                StatusKind::Info,
            );
        }
        Ok(self.finished.is_some())
    }

    /// Leave the form when it requested a route, carrying its banner into the
    /// footer.
    fn follow_form_navigation(&mut self) -> Result<()> {
        let Screen::Form(screen) = &mut self.screen else {
            return Ok(());
        };
        let Some(route) = screen.form.take_navigation() else {
            return Ok(());
        };
        match screen.form.message().cloned() {
            Some(message) => {
                let kind = match message.kind {
                    MessageKind::Success => StatusKind::Info,
                    MessageKind::Error => StatusKind::Error,
                };
                self.set_status(message.text, kind);
            }
            None => self.clear_status(),
        }
        self.navigate(route)
    }

    /// Process one key press; `Ok(true)` ends the event loop.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut status_to_set: Option<(String, StatusKind)> = None;

        let next = match &mut self.screen {
            Screen::Overview(overview) => match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                KeyCode::Up => {
                    overview.move_selection(-1);
                    None
                }
                KeyCode::Down => {
                    overview.move_selection(1);
                    None
                }
                KeyCode::Char('+') | KeyCode::Char('a') => {
                    if overview.all_categories_configured() {
                        status_to_set = Some((
                            "Every bed type already has a capacity entry.".to_string(),
                            StatusKind::Error,
                        ));
                        None
                    } else {
                        Some(Route::BedCapacity {
                            facility_id: overview.facility_id,
                            record_id: None,
                        })
                    }
                }
                KeyCode::Char('e') | KeyCode::Enter => match overview.current_record() {
                    Some(record) => Some(Route::BedCapacity {
                        facility_id: overview.facility_id,
                        record_id: Some(record.id),
                    }),
                    None => {
                        status_to_set =
                            Some(("No record selected to edit.".to_string(), StatusKind::Error));
                        None
                    }
                },
                _ => None,
            },
            Screen::Form(screen) => {
                screen.handle_key(code);
                None
            }
        };

        if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        } else if next.is_some() {
            self.clear_status();
        }

        if let Some(route) = next {
            self.navigate(route)?;
        }
        self.follow_form_navigation()?;

        Ok(self.finished.is_some())
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Overview(overview) => overview.draw(frame, content_area),
            Screen::Form(screen) => screen.draw(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = key_style();
        match &self.screen {
            Screen::Overview(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[e]", key_style),
                Span::raw(" Edit   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Screen::Form(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next field   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Bed type   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
