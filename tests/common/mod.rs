#![allow(dead_code)]

use bed_capacity_manager::api::CapacityApi;
use bed_capacity_manager::{open_in_memory, App, CapacityPayload, CapacityStore, Route};
use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

pub const FACILITY: i64 = 3;

pub fn store() -> CapacityStore {
    CapacityStore::new(open_in_memory().expect("in-memory database"))
}

/// Store a record directly, returning its id.
pub fn seed(store: &CapacityStore, category_id: i64, total: i64, occupied: i64) -> i64 {
    let payload = CapacityPayload {
        category_id,
        total_capacity: total,
        current_occupancy: occupied,
    };
    store
        .create_capacity(FACILITY, None, payload)
        .expect("seed record")
        .data
        .expect("seeded record data")
        .id
}

/// Open `route` and let any queued load finish, as the event loop would.
pub fn open(store: CapacityStore, route: Route) -> App<CapacityStore> {
    let mut app = App::new(store, route).expect("app starts");
    settle(&mut app);
    app
}

/// Run queued backend calls until the screen stops loading.
pub fn settle<A: CapacityApi>(app: &mut App<A>) -> bool {
    let mut exit = false;
    while app.is_loading() {
        exit = app.finish_loading().expect("backend call resolved");
    }
    exit
}

pub fn press<A: CapacityApi>(app: &mut App<A>, keys: &[KeyCode]) -> bool {
    let mut exit = false;
    for key in keys {
        exit = app.handle_key(*key).expect("key handled");
        exit |= settle(app);
    }
    exit
}

pub fn type_text<A: CapacityApi>(app: &mut App<A>, text: &str) {
    press(app, &text.chars().map(KeyCode::Char).collect::<Vec<_>>());
}

/// Draw one frame and flatten the buffer into lines of text.
pub fn render<A: CapacityApi>(app: &App<A>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
