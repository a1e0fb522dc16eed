use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::action::{Action, Direction};
use crate::app::App;
use crate::config::Config;
use crate::host::ResourceKind;
use crate::host::sim::SimulatedEngine;
use crate::ui::theme::Theme;
use crate::ui::{help, overlay, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_app() -> App {
    let mut engine = SimulatedEngine::new(3);
    engine.load_batch();
    let mut app = App::with_engine(Config::default(), engine);
    app.on_frame();
    app
}

#[test]
fn full_draw_shows_labels_and_live_column() {
    let app = make_app();
    let output = render_to_string(120, 30, |frame| super::draw(frame, &app));

    assert!(output.contains("memcheck"));
    assert!(output.contains("Used heap"));
    assert!(output.contains("Audio clips"));
    assert!(output.contains(" live "));
    assert!(output.contains("Managed heap"));
}

#[test]
fn pinned_columns_get_titles() {
    let mut app = make_app();
    app.dispatch(Action::PinCurrent);
    app.dispatch(Action::PinCurrent);
    app.status_message = None;
    let output = render_to_string(120, 30, |frame| super::draw(frame, &app));

    assert!(output.contains(" #1 "));
    assert!(output.contains(" #2 "));
    assert!(output.contains("Pinned: 2"));
}

#[test]
fn delta_column_title_marks_selection() {
    let mut app = make_app();
    app.dispatch(Action::PinCurrent);
    app.dispatch(Action::Navigate(Direction::Right));
    app.dispatch(Action::ToggleDelta);
    let output = render_to_string(120, 30, |frame| super::draw(frame, &app));

    assert!(output.contains(" \u{0394}1 "));
    assert!(output.contains("0:00"));
}

#[test]
fn narrow_terminal_drops_oldest_columns() {
    let mut app = make_app();
    for _ in 0..6 {
        app.dispatch(Action::PinCurrent);
    }
    let output = render_to_string(50, 30, |frame| super::draw(frame, &app));

    assert!(output.contains(" live "));
    assert!(!output.contains(" #6 "));
}

#[test]
fn statusbar_pills_show_kind_and_mode() {
    let theme = Theme::dark();
    let output = render_to_string(100, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 100, 1),
            None,
            ResourceKind::Mesh,
            false,
            &theme,
        );
    });
    assert!(output.contains("Pin"));
    assert!(output.contains("Meshes"));
    assert!(output.contains("Delta"));
}

#[test]
fn statusbar_message_takes_priority() {
    let theme = Theme::dark();
    let message = (
        "Cannot unpin: the live census cannot be unpinned".to_string(),
        std::time::Instant::now(),
    );
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            Some(&message),
            ResourceKind::Texture,
            false,
            &theme,
        );
    });
    assert!(output.starts_with(" Cannot unpin"));
    assert!(!output.contains("Quit"));
}

#[test]
fn help_overlay_lists_keybinds() {
    let app = make_app();
    let entries = app.help_entries();
    let output = render_to_string(60, 20, |frame| {
        help::render(frame, frame.area(), &entries, &app.theme);
    });
    assert!(output.contains("Keybinds"));
    assert!(output.contains("Pin live census"));
    assert!(output.contains("Unload oldest batch"));
    assert!(output.contains("lower / same / higher"));
}

#[test]
fn overlay_without_columns_draws_labels_only() {
    let theme = Theme::light();
    let labels = crate::format::labels();
    let output = render_to_string(40, 26, |frame| {
        overlay::render(frame, frame.area(), &labels, &[], 0, &theme);
    });
    assert!(output.contains("Time"));
    assert!(output.contains("Audio clips"));
    assert!(!output.contains(" live "));
}
