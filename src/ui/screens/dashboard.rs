use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::event::{Focus, Modal};
use crate::app::state::{DashboardState, StatusLevel};
use crate::fetch::ExportKind;
use crate::records::parse_bound;
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::{skeleton_table, transaction_table, TableLayout};
use crate::ui::screens::modals;
use crate::ui::styles::{
    disabled_style, error_style, focused_border, secondary_line, secondary_span,
    selection_style, title_span, ACCENT,
};
use crate::utils::format_amount;

/// Below this many columns the stat cards collapse and actions move into the menu.
pub const NARROW_WIDTH: u16 = 100;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let area = f.size();
    let narrow = area.width < NARROW_WIDTH;
    let stats_height = if narrow { 1 } else { 4 };

    let chunks = split_vertical(
        area,
        &[
            Constraint::Length(3),
            Constraint::Length(stats_height),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );

    render_header(f, chunks[0], state, narrow);
    if narrow {
        render_stats_line(f, chunks[1], state);
    } else {
        render_stat_cards(f, chunks[1], state);
    }
    render_filters(f, chunks[2], state);
    render_body(f, chunks[3], state);
    render_pagination(f, chunks[4], state);
    render_status(f, chunks[5], state);

    if state.nav.open {
        modals::render_nav(
            f,
            chunks[3],
            state.nav.selected,
            state.exports.any_active(),
        );
    }
    match &state.modal {
        Some(Modal::Detail(txn)) => modals::render_detail(f, area, txn),
        Some(Modal::Help) => modals::render_help(f, area),
        Some(Modal::Exports) => modals::render_exports(f, area, state),
        None => {}
    }
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState, narrow: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title_span(" Ledger Dash "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = split_horizontal(inner, &[Constraint::Min(20), Constraint::Length(34)]);

    let busy = state.exports.any_active();
    let action = |key: &'static str, label: &'static str, enabled: bool| -> Vec<Span<'static>> {
        let style = if enabled {
            Style::default().fg(ACCENT)
        } else {
            disabled_style()
        };
        vec![
            Span::styled(key, style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {label}   "), if enabled { Style::default() } else { style }),
        ]
    };

    let mut spans = vec![Span::styled("Transactions   ", Style::default().bold())];
    if state.search.searching {
        spans.push(Span::styled("searching…   ", Style::default().fg(Color::Yellow)));
    }
    if narrow {
        spans.extend(action("m", "menu", true));
    } else {
        spans.extend(action("e", ExportKind::Buffered.label(), !busy));
        spans.extend(action("E", ExportKind::Streamed.label(), !busy));
        spans.extend(action("s", "saved", true));
        spans.extend(action("?", "help", true));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), parts[0]);

    let running = ExportKind::ALL
        .iter()
        .map(|kind| state.exports.job(*kind))
        .find(|job| job.active);
    if let Some(job) = running {
        let label = if job.is_finished() {
            "Done".to_string()
        } else {
            format!("{}%", job.progress)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(ACCENT))
            .percent(u16::from(job.progress.min(100)))
            .label(label);
        f.render_widget(gauge, parts[1]);
    }
}

fn stat_values(state: &DashboardState) -> [(&'static str, String); 4] {
    let summary = state.summary();
    let page_rows = state.loader.transactions().len();
    [
        ("Total records", state.pagination.total_records.to_string()),
        ("Rows shown", format!("{} of {}", summary.rows, page_rows)),
        ("Page volume", format_amount(summary.volume)),
        (
            "Average",
            summary
                .average()
                .map(format_amount)
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

fn render_stat_cards(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cards = split_horizontal(area, &[Constraint::Ratio(1, 4); 4]);
    for ((label, value), card) in stat_values(state).into_iter().zip(cards) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(value, Style::default().bold())),
            secondary_line(label),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, card);
    }
}

fn render_stats_line(f: &mut Frame, area: Rect, state: &DashboardState) {
    let mut spans = Vec::new();
    for (idx, (label, value)) in stat_values(state).into_iter().enumerate() {
        if idx > 0 {
            spans.push(secondary_span(" · "));
        }
        spans.push(Span::styled(value, Style::default().bold()));
        spans.push(secondary_span(format!(" {}", label.to_lowercase())));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn input_box<'a>(
    title: &'a str,
    hint: &'a str,
    value: &'a str,
    focused: bool,
    note: Option<&'a str>,
) -> Paragraph<'a> {
    let mut title_spans = vec![Span::raw(format!(" {title} ")), secondary_span(format!("({hint}) "))];
    if let Some(note) = note {
        title_spans.push(Span::styled(format!("{note} "), Style::default().fg(Color::Yellow)));
    }

    let border = if focused {
        focused_border()
    } else {
        Style::default()
    };
    let mut text = vec![Span::raw(value)];
    if focused {
        text.push(Span::styled("▏", focused_border()));
    }

    Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Line::from(title_spans)),
    )
}

fn bound_note(raw: &str) -> Option<&'static str> {
    if !raw.trim().is_empty() && parse_bound(raw).is_none() {
        Some("ignored")
    } else {
        None
    }
}

fn render_filters(f: &mut Frame, area: Rect, state: &DashboardState) {
    let parts = split_horizontal(
        area,
        &[
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    );
    let filters = &state.filters;
    let searching = state.search.searching.then_some("searching…");

    f.render_widget(
        input_box(
            "Search",
            "/",
            &filters.query,
            state.focus == Focus::Search,
            searching,
        ),
        parts[0],
    );
    f.render_widget(
        input_box(
            "Min amount",
            "<",
            &filters.min_amount,
            state.focus == Focus::MinAmount,
            bound_note(&filters.min_amount),
        ),
        parts[1],
    );
    f.render_widget(
        input_box(
            "Max amount",
            ">",
            &filters.max_amount,
            state.focus == Focus::MaxAmount,
            bound_note(&filters.max_amount),
        ),
        parts[2],
    );
}

fn render_body(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.loader.is_loading() {
        let rows = usize::from(area.height.saturating_sub(3))
            .min(state.pagination.records_per_page as usize);
        f.render_widget(skeleton_table(rows, state.sort), area);
        return;
    }

    if let Some(message) = state.loader.error() {
        let text = vec![
            Line::from(Span::styled("Failed to load transactions", error_style())),
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", selection_style()),
                Span::raw(" to retry"),
            ]),
        ];
        let panel = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(error_style())
                    .title(" Error "),
            );
        f.render_widget(panel, area);
        return;
    }

    let rows = state.visible_rows();
    if rows.is_empty() {
        let text = if !state.filters.is_active() {
            vec![Line::from("No transactions on this page.")]
        } else {
            vec![
                Line::from("No transactions match the current filters."),
                secondary_line("Press c to clear filters"),
            ]
        };
        let panel = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title_span(" Transactions ")));
        f.render_widget(panel, area);
        return;
    }

    let selected = state.selected_index();
    let layout = TableLayout::compute(&rows, selected, area.height.saturating_sub(2));
    let title = format!(
        " Transactions · sorted by {} {} ",
        state.sort.field.label(),
        state.sort.direction.icon()
    );
    f.render_widget(
        transaction_table(&rows, selected, &layout, state.sort, title),
        area,
    );
}

fn render_pagination(f: &mut Frame, area: Rect, state: &DashboardState) {
    let pagination = &state.pagination;
    let arrow = |glyph: &'static str, enabled: bool| {
        Span::styled(
            glyph,
            if enabled {
                Style::default().fg(ACCENT)
            } else {
                disabled_style()
            },
        )
    };

    let mut spans = vec![
        arrow("« ", pagination.has_previous()),
        arrow("‹ ", pagination.has_previous()),
    ];
    for page in pagination.window() {
        if page == pagination.current_page {
            spans.push(Span::styled(format!("[{page}]"), selection_style()));
        } else {
            spans.push(Span::raw(format!(" {page} ")));
        }
    }
    spans.push(arrow(" ›", pagination.has_next()));
    spans.push(arrow(" »", pagination.has_next()));
    spans.push(Span::raw(format!("   {}", pagination.summary())));
    spans.push(secondary_span(format!(
        "   {} per page (p)",
        pagination.records_per_page
    )));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let line = match &state.status {
        Some(status) if status.level == StatusLevel::Error => {
            Line::from(Span::styled(status.text.clone(), error_style()))
        }
        Some(status) => Line::from(status.text.clone()),
        None => secondary_line("q quit · ←/→ pages · 1/2/3 sort · Enter details · ? help"),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::app::event::Event;
    use crate::app::state::DashboardState;
    use crate::records::{PageResult, Transaction};

    fn txn(i: usize) -> Transaction {
        Transaction {
            id: format!("id{i:03}"),
            name: format!("Customer {i:03}"),
            amount: 10.0 * i as f64,
            address: format!("{i} Harbour Road"),
        }
    }

    fn loaded(page: u32, total_pages: u32, total: u64, rows: usize) -> DashboardState {
        let mut state = DashboardState::new(25);
        state.start();
        // Navigation needs totals, so load page one first when asked for a later page.
        let request = state.loader.begin();
        state.update(Event::PageLoaded {
            request,
            outcome: Ok(PageResult {
                total,
                page: 1,
                total_pages,
                transactions: (0..rows).map(txn).collect(),
            }),
        });
        if page > 1 {
            state.update(Event::GoToPage(page));
            let request = state.loader.begin();
            state.update(Event::PageLoaded {
                request,
                outcome: Ok(PageResult {
                    total,
                    page,
                    total_pages,
                    transactions: (0..rows).map(txn).collect(),
                }),
            });
        }
        state
    }

    fn render(state: &DashboardState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|f| render_dashboard(f, state))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn footer_shows_page_window_and_summary() {
        let state = loaded(2, 5, 120, 25);
        let text = screen_text(&render(&state, 120, 40));

        assert!(text.contains("Page 2 of 5 (120 total records)"), "{text}");
        assert!(text.contains(" 1 [2] 3  4  5 "), "{text}");
        assert!(text.contains("Customer 000"));
    }

    #[test]
    fn loading_state_draws_skeleton() {
        let mut state = DashboardState::new(10);
        state.start();
        let text = screen_text(&render(&state, 120, 40));
        assert!(text.contains("Loading transactions"));
        assert!(text.contains("░░░"));
    }

    #[test]
    fn failed_load_offers_retry() {
        let mut state = DashboardState::new(10);
        state.start();
        let request = state.loader.begin();
        state.update(Event::PageLoaded {
            request,
            outcome: Err("The server responded with 500 Internal Server Error".into()),
        });

        let text = screen_text(&render(&state, 120, 40));
        assert!(text.contains("Failed to load transactions"));
        assert!(text.contains("Press r to retry"));
        assert!(!text.contains("Customer"));
    }

    #[test]
    fn filtered_out_page_shows_empty_message() {
        let mut state = loaded(1, 1, 3, 3);
        state.update(Event::SearchChanged("nobody".into()));
        let text = screen_text(&render(&state, 120, 40));
        assert!(text.contains("No transactions match the current filters."));
    }

    #[test]
    fn narrow_layout_collapses_stats_and_offers_menu() {
        let mut state = loaded(1, 1, 3, 3);
        let text = screen_text(&render(&state, 80, 30));
        assert!(text.contains("m menu"));
        assert!(text.contains("3 total records"));

        state.update(Event::ToggleNav);
        let text = screen_text(&render(&state, 80, 30));
        assert!(text.contains("Saved exports"));
    }

    #[test]
    fn active_export_shows_progress() {
        let mut state = loaded(1, 1, 3, 3);
        state.update(Event::StartExport(ExportKind::Streamed));
        let text = screen_text(&render(&state, 120, 40));
        assert!(text.contains("0%"));
        assert!(text.contains("started"));
    }
}
