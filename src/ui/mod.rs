pub mod header;
pub mod help;
pub mod overlay;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let history = app.inspector.history();
    header::render(
        frame,
        chunks[0],
        history.current(),
        history.pinned_len(),
        app.inspector.host().loaded_batches(),
        &app.theme,
    );

    if let Some(overlay_frame) = &app.frame {
        overlay::render(
            frame,
            chunks[1],
            &overlay_frame.labels,
            &app.display_columns(),
            app.selected_slot,
            &app.theme,
        );
    }

    statusbar::render(
        frame,
        chunks[2],
        app.status_message.as_ref(),
        app.selected_kind,
        app.show_delta,
        &app.theme,
    );

    // Help overlay goes last so it sits on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

#[cfg(test)]
mod tests;
