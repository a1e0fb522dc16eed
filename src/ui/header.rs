use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::census::{Metric, ResourceCensus};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    live: &ResourceCensus,
    pinned: usize,
    batches: usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_branding(frame, chunks[0], live, pinned, batches, theme);
    render_mono_gauge(frame, chunks[1], live, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    live: &ResourceCensus,
    pinned: usize,
    batches: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let secondary = Style::default().fg(theme.text_secondary);
    let line = Line::from(vec![
        Span::styled(
            " memcheck ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(theme.name, secondary),
        Span::raw("  "),
        Span::styled(format!("Pinned: {pinned}"), secondary),
        Span::raw("  "),
        Span::styled(
            format!("Objects: {}", live.value(Metric::ObjectCount)),
            secondary,
        ),
        Span::raw("  "),
        Span::styled(format!("Batches: {batches}"), secondary),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_mono_gauge(frame: &mut Frame, area: Rect, live: &ResourceCensus, theme: &Theme) {
    let used = live.value(Metric::MonoUsed);
    let heap = live.value(Metric::MonoHeap);
    let ratio = if heap > 0 {
        (used as f64 / heap as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Managed heap ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(theme.accent).bg(theme.surface_bg))
        .ratio(ratio)
        .label(format!("{used} / {heap} MB"));
    frame.render_widget(gauge, area);
}
