use ratatui::{
    prelude::*,
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, List, ListItem, Paragraph, Wrap,
    },
};

use crate::app::event::NavItem;
use crate::app::state::DashboardState;
use crate::records::Transaction;
use crate::ui::components::utils::{centered_fixed, centered_rect};
use crate::ui::styles::{
    amount_style, disabled_style, secondary_line, selection_style, title_span,
};
use crate::utils::{format_amount, format_file_modified, format_size};

const HELP: &[(&str, &str)] = &[
    ("← / h, → / l", "Previous / next page"),
    ("Home / g, End / G", "First / last page"),
    ("p", "Cycle records per page"),
    ("↑ / k, ↓ / j", "Move selection"),
    ("Enter", "Transaction details"),
    ("/", "Search ID, name, address, amount"),
    ("< / >", "Edit min / max amount"),
    ("Tab", "Next filter field"),
    ("c", "Clear filters"),
    ("1 / 2 / 3", "Sort by name / amount / ID"),
    ("e / E", "Export CSV / streamed CSV"),
    ("s", "Saved exports"),
    ("r", "Reload page"),
    ("m", "Menu"),
    ("q", "Quit"),
];

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(selection_style())
        .title(title_span(title))
        .title(Title::from(secondary_line(" Esc close ")).position(Position::Bottom))
}

fn field_line<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().bold()),
        value,
    ])
}

pub fn render_detail(f: &mut Frame, area: Rect, txn: &Transaction) {
    let popup = centered_fixed(64, 8, area);
    let lines = vec![
        field_line("ID", Span::raw(txn.id.as_str())),
        field_line("Name", Span::raw(txn.name.as_str())),
        field_line(
            "Amount",
            Span::styled(format_amount(txn.amount), amount_style(txn.amount)),
        ),
        field_line("Address", Span::raw(txn.address.as_str())),
    ];
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(modal_block(" Transaction ")),
        popup,
    );
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_fixed(56, HELP.len() as u16 + 2, area);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:<20}"), selection_style()),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(modal_block(" Keys ")), popup);
}

pub fn render_exports(f: &mut Frame, area: Rect, state: &DashboardState) {
    let popup = centered_rect(70, 60, area);
    let mut lines = Vec::new();
    if let Some(receipt) = state.exports.last_receipt() {
        lines.push(Line::from(Span::styled(
            format!("Last: {}", receipt.summary()),
            Style::default().bold(),
        )));
        lines.push(Line::from(""));
    }

    if state.saved_exports.is_empty() {
        lines.push(secondary_line("No exports saved yet."));
    } else {
        for entry in &state.saved_exports {
            lines.push(Line::from(vec![
                Span::raw(entry.name.clone()),
                Span::raw("  "),
                Span::styled(
                    format!(
                        "{}  {}",
                        format_file_modified(entry.modified),
                        format_size(entry.size)
                    ),
                    Style::default().dim(),
                ),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(secondary_line("r refresh"));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(modal_block(" Saved exports ")),
        popup,
    );
}

/// Collapsible action menu anchored to the top-left of `area`. Export entries are
/// dimmed while `exports_busy`.
pub fn render_nav(f: &mut Frame, area: Rect, selected: usize, exports_busy: bool) {
    let width = NavItem::ALL
        .iter()
        .map(|item| item.label().len() as u16)
        .max()
        .unwrap_or(10)
        + 6;
    let popup = Rect {
        x: area.x + 1,
        y: area.y,
        width: width.min(area.width.saturating_sub(1)),
        height: (NavItem::ALL.len() as u16 + 2).min(area.height),
    };

    let items: Vec<ListItem> = NavItem::ALL
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let marker = if idx == selected { "›" } else { " " };
            let text = format!("{marker} {}", item.label());
            if exports_busy && item.is_export() {
                ListItem::new(text).style(disabled_style())
            } else if idx == selected {
                ListItem::new(text).style(selection_style())
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    f.render_widget(Clear, popup);
    f.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(selection_style())
                .title(title_span(" Menu ")),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn detail_lists_every_field() {
        let txn = Transaction {
            id: "64f1a2".into(),
            name: "Alice Smith".into(),
            amount: -1234.5,
            address: "1 Main St".into(),
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.size();
                render_detail(f, area, &txn)
            })
            .expect("draw");

        let text = screen_text(&terminal);
        for expected in ["64f1a2", "Alice Smith", "-$1,234.50", "1 Main St"] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn exports_modal_handles_empty_directory() {
        let state = DashboardState::new(10);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.size();
                render_exports(f, area, &state)
            })
            .expect("draw");
        assert!(screen_text(&terminal).contains("No exports saved yet."));
    }

    #[test]
    fn nav_dims_export_entries_while_busy() {
        let export_row_fg = |busy: bool| {
            let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
            terminal
                .draw(|f| {
                    let area = f.size();
                    render_nav(f, area, 0, busy)
                })
                .expect("draw");
            let buffer = terminal.backend().buffer().clone();
            let width = buffer.area.width as usize;
            let row = buffer
                .content
                .chunks(width)
                .find(|row| {
                    row.iter()
                        .map(|cell| cell.symbol())
                        .collect::<String>()
                        .contains(NavItem::BufferedExport.label())
                })
                .expect("export entry drawn")
                .to_vec();
            row.iter()
                .find(|cell| cell.symbol() == "E")
                .map(|cell| cell.fg)
                .expect("label cell")
        };

        assert_eq!(export_row_fg(true), disabled_style().fg.expect("disabled colour"));
        assert_ne!(export_row_fg(false), disabled_style().fg.expect("disabled colour"));
    }
}
