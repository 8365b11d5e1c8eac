//! Terminal view that draws each panel as a bordered ratatui widget
//!
//! Panels are rendered into an off-screen `Buffer` and printed line by line,
//! so the output scrolls like a log and also works when piped.

use std::io::{self, Write};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Row, Table, Widget},
};

use super::{ContainerId, DashboardView, MonthGrid, Panel, PanelItem};

/// Width of every rendered panel, borders included
pub const PANEL_WIDTH: u16 = 78;

const WEEKDAYS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Prints every rendered panel to stdout
///
/// All containers are considered present.
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }
}

impl DashboardView for TerminalView {
    fn has_dashboard(&self) -> bool {
        true
    }

    fn has_container(&self, _id: ContainerId) -> bool {
        true
    }

    fn render(&self, id: ContainerId, panel: Panel) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = write_panel(&mut stdout, id, &panel) {
            tracing::warn!(
                event = "ui.terminal.write_failed",
                container = id.id(),
                error = %e,
                "Could not write panel to stdout"
            );
        }
    }

    fn bind_tabs(&self) {
        tracing::debug!(event = "ui.terminal.tabs_skipped", "Tabs are not interactive in the terminal view");
    }

    fn bind_filters(&self) {
        tracing::debug!(event = "ui.terminal.filters_skipped", "Filters are set with --status");
    }
}

/// Draws a panel into a buffer sized to fit its content
pub fn panel_buffer(id: ContainerId, panel: &Panel) -> Buffer {
    match panel {
        Panel::Items(items) => {
            let list_items: Vec<ListItem> = items.iter().map(item_text).map(ListItem::new).collect();
            let height = list_items.iter().map(ListItem::height).sum::<usize>();
            draw(List::new(list_items).block(panel_block(id.title())), height)
        }
        Panel::NoData(message) => {
            let line = Line::styled(
                format!("({})", message),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            );
            draw(Paragraph::new(line).block(panel_block(id.title())), 1)
        }
        Panel::Calendar(grid) => {
            let title = format!("{}: {}", id.title(), grid.title);
            let rows = grid.weeks().len() + 1;
            draw(month_table(grid).block(panel_block(&title)), rows)
        }
        Panel::Hidden => {
            let line = Line::styled("(hidden)", Style::default().fg(Color::DarkGray));
            draw(Paragraph::new(line).block(panel_block(id.title())), 1)
        }
    }
}

/// Renders a panel and flattens it to plain text, one line per buffer row
pub fn render_panel(id: ContainerId, panel: &Panel) -> String {
    buffer_text(&panel_buffer(id, panel))
}

/// Writes the rendered panel followed by a newline
pub fn write_panel<W: Write>(out: &mut W, id: ContainerId, panel: &Panel) -> io::Result<()> {
    writeln!(out, "{}", render_panel(id, panel))?;
    out.flush()
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .padding(Padding::horizontal(1))
}

fn item_text(item: &PanelItem) -> Text<'static> {
    let mut first = Vec::new();
    if let Some(badge) = &item.badge {
        first.push(Span::styled(
            format!("[{}] ", badge),
            Style::default().fg(Color::Cyan),
        ));
    }
    first.push(Span::styled(
        item.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if let Some(link) = &item.link {
        first.push(Span::styled(
            format!(" <{}>", link),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(first)];
    for extra in [&item.meta, &item.detail].into_iter().flatten() {
        lines.push(Line::styled(
            format!("  {}", extra),
            Style::default().fg(Color::Gray),
        ));
    }

    Text::from(lines)
}

fn month_table(grid: &MonthGrid) -> Table<'static> {
    let header = Row::new(WEEKDAYS.iter().map(|day| Line::from(*day).alignment(Alignment::Right)))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = grid.weeks().into_iter().map(|week| {
        Row::new(week.into_iter().map(|cell| match cell {
            Some(day) if day == grid.today => Line::styled(
                format!("*{}", day),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED),
            )
            .alignment(Alignment::Right),
            Some(day) => Line::from(day.to_string()).alignment(Alignment::Right),
            None => Line::from(""),
        }))
    });

    Table::new(rows, [Constraint::Length(3); 7])
        .header(header)
        .column_spacing(1)
}

/// Renders `widget` inside a full-width area tall enough for `content_rows`
/// plus the block border
fn draw<W: Widget>(widget: W, content_rows: usize) -> Buffer {
    let height = u16::try_from(content_rows.max(1) + 2).unwrap_or(u16::MAX);
    let area = Rect::new(0, 0, PANEL_WIDTH, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buf
}

fn buffer_text(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    buf.content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_render_items_with_badge_link_and_meta() {
        let panel = Panel::Items(vec![PanelItem::new("Printer offline")
            .badge("open")
            .link("/requests/7")
            .meta("Updated 2 hours ago")]);

        let text = render_panel(ContainerId::MyTickets, &panel);
        let rows = lines(&text);

        assert_eq!(rows.len(), 4, "Two content rows plus borders: {}", text);
        assert!(rows[0].contains(" My Tickets "));
        assert!(rows[1].contains("[open] Printer offline </requests/7>"));
        assert!(rows[2].contains("  Updated 2 hours ago"));
    }

    #[test]
    fn test_items_panel_grows_with_item_lines() {
        let panel = Panel::Items(vec![
            PanelItem::new("One"),
            PanelItem::new("Two").meta("m").detail("d"),
        ]);

        let buf = panel_buffer(ContainerId::RecentArticles, &panel);

        assert_eq!(buf.area.height, 6);
        assert_eq!(buf.area.width, PANEL_WIDTH);
    }

    #[test]
    fn test_render_no_data() {
        let text = render_panel(ContainerId::CountyTickets, &Panel::no_data("No county tickets"));
        let rows = lines(&text);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains(" County Tickets "));
        assert!(rows[1].contains("(No county tickets)"));
    }

    #[test]
    fn test_render_calendar_marks_today() {
        let grid = MonthGrid {
            title: "June 2025".to_string(),
            leading_blanks: 0,
            days_in_month: 30,
            today: 2,
        };

        let text = render_panel(ContainerId::CalendarWidget, &Panel::Calendar(grid));

        assert!(text.contains("Calendar: June 2025"));
        assert!(text.contains("*2"));
        assert!(!text.contains("*1 "));
        assert!(text.contains("30"));
    }

    #[test]
    fn test_render_panel_output_has_no_trailing_spaces() {
        let text = render_panel(ContainerId::UpdatesFeed, &Panel::no_data("No updates"));
        assert!(text.lines().all(|line| !line.ends_with(' ')));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_panel_appends_newline() {
        let mut out = Vec::new();
        write_panel(&mut out, ContainerId::DueThisWeek, &Panel::no_data("Nothing due this week")).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("(Nothing due this week)"));
    }

    #[test]
    fn test_write_panel_reports_closed_pipe() {
        let err = write_panel(&mut BrokenPipe, ContainerId::MyTickets, &Panel::Hidden).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_terminal_view_exposes_every_container() {
        let view = TerminalView::new();
        assert!(view.has_dashboard());
        assert!(ContainerId::ALL.iter().all(|id| view.has_container(*id)));
    }
}
