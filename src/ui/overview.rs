use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{CapacityRecord, BED_TYPES};

/// Capacity records of one facility, the target of `/facility/{id}`.
pub(crate) struct OverviewScreen {
    pub(crate) facility_id: i64,
    pub(crate) records: Vec<CapacityRecord>,
    pub(crate) selected: usize,
}

impl OverviewScreen {
    pub(crate) fn new(facility_id: i64, records: Vec<CapacityRecord>) -> Self {
        Self {
            facility_id,
            records,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.records.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.records.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }

    pub(crate) fn current_record(&self) -> Option<&CapacityRecord> {
        self.records.get(self.selected)
    }

    pub(crate) fn all_categories_configured(&self) -> bool {
        self.records.len() >= BED_TYPES.len()
    }

    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Facility {} : Bed Capacity ({}/{})",
            self.facility_id,
            self.records.len(),
            BED_TYPES.len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);

        if self.records.is_empty() {
            let message = Paragraph::new("No bed capacity yet. Press '+' to add one.")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<36}", record.category_label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        "total {:>5}   occupied {:>5}",
                        record.total_capacity, record.current_occupancy
                    )),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> CapacityRecord {
        CapacityRecord {
            id,
            facility_id: 1,
            category_id: 1,
            total_capacity: 1,
            current_occupancy: 0,
        }
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = OverviewScreen::new(1, vec![record(1), record(2)]);
        screen.move_selection(-3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.current_record().map(|r| r.id), Some(2));

        let mut empty = OverviewScreen::new(1, Vec::new());
        empty.move_selection(1);
        assert!(empty.current_record().is_none());
    }
}
