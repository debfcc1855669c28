use std::cmp::Ordering;

use super::Transaction;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortField {
    Name,
    Amount,
    Id,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Name, SortField::Amount, SortField::Id];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Amount => "Amount",
            SortField::Id => "ID",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Amount => a.amount.total_cmp(&b.amount),
            SortField::Id => a.id.cmp(&b.id),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    /// Re-selecting the active field flips the direction; a new field starts descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Search text and amount bounds exactly as the user typed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub min_amount: String,
    pub max_amount: String,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || parse_bound(&self.min_amount).is_some()
            || parse_bound(&self.max_amount).is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse an amount bound; blank or malformed input means "no bound".
pub fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn matches_query(txn: &Transaction, needle: &str) -> bool {
    txn.id.to_lowercase().contains(needle)
        || txn.name.to_lowercase().contains(needle)
        || txn.address.to_lowercase().contains(needle)
        || txn.amount_text().to_lowercase().contains(needle)
}

/// Filter and sort the loaded page. Only the rows passed in are considered.
pub fn derive_view<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
    sort: SortSpec,
) -> Vec<&'a Transaction> {
    let needle = criteria.query.to_lowercase();
    let min = parse_bound(&criteria.min_amount);
    let max = parse_bound(&criteria.max_amount);

    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| needle.is_empty() || matches_query(txn, &needle))
        .filter(|txn| min.map_or(true, |lower| txn.amount >= lower))
        .filter(|txn| max.map_or(true, |upper| txn.amount <= upper))
        .collect();

    rows.sort_by(|a, b| sort.compare(a, b));
    rows
}

/// Figures shown on the stat cards for the rows currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewSummary {
    pub rows: usize,
    pub volume: f64,
}

impl ViewSummary {
    pub fn of(rows: &[&Transaction]) -> Self {
        Self {
            rows: rows.len(),
            volume: rows.iter().map(|txn| txn.amount).sum(),
        }
    }

    pub fn average(&self) -> Option<f64> {
        (self.rows > 0).then(|| self.volume / self.rows as f64)
    }
}
