use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use crate::records::{SortField, SortSpec, Transaction};
use crate::ui::styles::{amount_style, header_style, skeleton_style, title_span};
use crate::utils::{format_amount, truncate_to_width};

const SKELETON_CELL: &str = "░░░░░░░░";
const AMOUNT_WIDTH: u16 = 14;
const ID_CAP: usize = 26;
const NAME_CAP: usize = 28;

/// Column widths and scroll window for a table drawn into a fixed area.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub widths: [Constraint; 4],
    pub offset: usize,
    pub capacity: usize,
}

impl TableLayout {
    /// `inner_height` excludes borders; one line goes to the header row.
    pub fn compute(rows: &[&Transaction], selected: usize, inner_height: u16) -> Self {
        let capacity = usize::from(inner_height.saturating_sub(1)).max(1);
        let offset = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };

        let id_width = rows
            .iter()
            .map(|txn| txn.id.width())
            .max()
            .unwrap_or(0)
            .clamp(SortField::Id.label().width() + 2, ID_CAP);
        let name_width = rows
            .iter()
            .map(|txn| txn.name.width())
            .max()
            .unwrap_or(0)
            .clamp(SortField::Name.label().width() + 2, NAME_CAP);

        Self {
            widths: [
                Constraint::Length(id_width as u16),
                Constraint::Length(name_width as u16),
                Constraint::Length(AMOUNT_WIDTH),
                Constraint::Min(10),
            ],
            offset,
            capacity,
        }
    }
}

fn header_cell(field: SortField, sort: SortSpec) -> String {
    if sort.field == field {
        format!("{} {}", field.label(), sort.direction.icon())
    } else {
        field.label().to_string()
    }
}

fn header_row(sort: SortSpec) -> Row<'static> {
    Row::new(vec![
        header_cell(SortField::Id, sort),
        header_cell(SortField::Name, sort),
        format!("{:>width$}", header_cell(SortField::Amount, sort), width = AMOUNT_WIDTH as usize),
        "Address".to_string(),
    ])
    .style(header_style().add_modifier(Modifier::BOLD))
}

fn transaction_row<'a>(txn: &Transaction, highlighted: bool) -> Row<'a> {
    let amount = format!(
        "{:>width$}",
        format_amount(txn.amount),
        width = AMOUNT_WIDTH as usize
    );
    let row = Row::new(vec![
        Line::from(truncate_to_width(&txn.id, ID_CAP)),
        Line::from(truncate_to_width(&txn.name, NAME_CAP)),
        Line::from(Span::styled(amount, amount_style(txn.amount))),
        Line::from(txn.address.clone()),
    ]);
    if highlighted {
        row.reversed()
    } else {
        row
    }
}

pub fn transaction_table<'a>(
    rows: &[&Transaction],
    selected: usize,
    layout: &TableLayout,
    sort: SortSpec,
    title: String,
) -> Table<'a> {
    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(layout.offset)
        .take(layout.capacity)
        .map(|(idx, txn)| transaction_row(txn, idx == selected))
        .collect();

    Table::new(body, layout.widths)
        .header(header_row(sort))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title_span(title)),
        )
        .column_spacing(2)
}

/// Placeholder rows drawn while a page is in flight.
pub fn skeleton_rows(count: usize) -> Vec<Row<'static>> {
    (0..count)
        .map(|_| Row::new(vec![SKELETON_CELL; 4]).style(skeleton_style()))
        .collect()
}

pub fn skeleton_table(count: usize, sort: SortSpec) -> Table<'static> {
    Table::new(
        skeleton_rows(count),
        [
            Constraint::Length(ID_CAP as u16 / 2),
            Constraint::Length(NAME_CAP as u16 / 2),
            Constraint::Length(AMOUNT_WIDTH),
            Constraint::Min(10),
        ],
    )
    .header(header_row(sort))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title_span("Loading transactions…")),
    )
    .column_spacing(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, name: &str) -> Transaction {
        Transaction {
            id: id.into(),
            name: name.into(),
            amount: 1.0,
            address: "somewhere".into(),
        }
    }

    #[test]
    fn offset_keeps_selection_in_view() {
        let a = txn("a", "Alice");
        let b = txn("b", "Bob");
        let rows = vec![&a, &b, &a, &b, &a, &b];

        let layout = TableLayout::compute(&rows, 1, 5);
        assert_eq!(layout.capacity, 4);
        assert_eq!(layout.offset, 0);

        let layout = TableLayout::compute(&rows, 5, 5);
        assert_eq!(layout.offset, 2);
    }

    #[test]
    fn header_marks_active_sort_column() {
        let sort = SortSpec::default();
        assert_eq!(header_cell(sort.field, sort), format!("{} ↓", sort.field.label()));
        let other = SortField::ALL
            .iter()
            .copied()
            .find(|field| *field != sort.field)
            .expect("more than one field");
        assert_eq!(header_cell(other, sort), other.label());
    }

    #[test]
    fn skeleton_rows_match_requested_count() {
        assert_eq!(skeleton_rows(7).len(), 7);
    }
}
