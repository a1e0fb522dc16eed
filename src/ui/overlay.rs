use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::DisplayColumn;
use crate::ui::theme::Theme;

/// Minimum width of one value column, borders included.
pub const MIN_COLUMN_WIDTH: u16 = 10;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Draws the label column followed by one column per history slot.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    labels: &[&str],
    columns: &[DisplayColumn],
    selected_slot: usize,
    theme: &Theme,
) {
    let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 2;
    let value_width = columns
        .iter()
        .flat_map(|c| c.column.lines.iter())
        .map(|l| l.text.width())
        .max()
        .unwrap_or(0) as u16
        + 4;
    let value_width = value_width.max(MIN_COLUMN_WIDTH);

    // Drop the oldest columns that do not fit.
    let room = area.width.saturating_sub(label_width) / value_width;
    let visible = columns.len().min(room as usize);

    let mut constraints = vec![Constraint::Length(label_width)];
    constraints.extend(std::iter::repeat_n(Constraint::Length(value_width), visible));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::horizontal(constraints).split(area);

    let label_lines: Vec<Line> = labels
        .iter()
        .map(|label| {
            Line::from(Span::styled(
                format!(" {label}"),
                Style::default().fg(theme.text_secondary),
            ))
        })
        .collect();
    let label_block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
    frame.render_widget(
        Paragraph::new(label_lines)
            .block(label_block.border_style(Style::default().fg(theme.overlay_border)))
            .style(Style::default().bg(theme.overlay_bg)),
        chunks[0],
    );

    for (display, chunk) in columns.iter().take(visible).zip(chunks.iter().skip(1)) {
        render_column(frame, *chunk, display, display.slot == selected_slot, theme);
    }
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    display: &DisplayColumn,
    selected: bool,
    theme: &Theme,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = display
        .column
        .lines
        .iter()
        .map(|line| {
            let color = match line.tone {
                Some(tone) => theme.tones.color(tone),
                None if display.is_delta => theme.delta_fg,
                None => theme.text_primary,
            };
            let text = truncate_unicode(&line.text, inner_width);
            Line::from(Span::styled(
                format!("{text:>inner_width$}"),
                Style::default().fg(color),
            ))
        })
        .collect();

    let title = match (display.slot, display.is_delta) {
        (0, _) => " live ".to_string(),
        (slot, true) => format!(" \u{0394}{slot} "),
        (slot, false) => format!(" #{slot} "),
    };
    let border_style = if selected {
        Style::default()
            .fg(theme.selection_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.overlay_border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, Style::default().fg(theme.accent)));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(theme.overlay_bg)),
        area,
    );
}
