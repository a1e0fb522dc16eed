use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::theme::Theme;

const WIDTH: u16 = 44;

/// Centered keybind list drawn over the census columns, with a tone legend.
pub fn render(frame: &mut Frame, area: Rect, entries: &[(String, &str)], theme: &Theme) {
    let footer = footer_lines(theme);
    // +2 borders, +1 spacer before the footer
    let wanted = entries.len() + footer.len() + 3;
    let width = WIDTH.min(area.width.saturating_sub(4));
    let height = (wanted as u16).min(area.height.saturating_sub(2));

    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Keybinds ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let key_width = entries
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(1);
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:>key_width$} "),
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.extend(footer);

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn footer_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled("lower", Style::default().fg(theme.tones.low)),
            Span::raw(" / "),
            Span::styled("same", Style::default().fg(theme.tones.neutral)),
            Span::raw(" / "),
            Span::styled("higher", Style::default().fg(theme.tones.high)),
            Span::styled(" vs. older", Style::default().fg(theme.text_secondary)),
        ]),
        Line::from(Span::styled(
            " Esc closes",
            Style::default().fg(theme.text_secondary),
        )),
    ]
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
