use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::event::{Event, Focus, Modal};
use crate::app::state::DashboardState;
use crate::fetch::ExportKind;
use crate::records::SortField;

/// Translate a key press into a dashboard event for the current input mode.
pub fn map_key(state: &DashboardState, key: KeyEvent) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    if state.modal.is_some() {
        return map_modal_key(state, key);
    }
    if state.nav.open {
        return map_nav_key(key);
    }
    match state.focus {
        Focus::Table => map_table_key(state, key),
        field => map_input_key(state, field, key),
    }
}

fn map_modal_key(state: &DashboardState, key: KeyEvent) -> Option<Event> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Event::CloseModal),
        KeyCode::Char('r') if matches!(state.modal, Some(Modal::Exports)) => {
            Some(Event::OpenModal(Modal::Exports))
        }
        _ => None,
    }
}

fn map_nav_key(key: KeyEvent) -> Option<Event> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Event::NavPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Event::NavNext),
        KeyCode::Enter => Some(Event::NavActivate),
        KeyCode::Esc | KeyCode::Char('m') => Some(Event::ToggleNav),
        _ => None,
    }
}

fn map_table_key(state: &DashboardState, key: KeyEvent) -> Option<Event> {
    let pagination = &state.pagination;
    let event = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Event::Quit,

        KeyCode::Char('/') => Event::Focus(Focus::Search),
        KeyCode::Char('<') => Event::Focus(Focus::MinAmount),
        KeyCode::Char('>') => Event::Focus(Focus::MaxAmount),
        KeyCode::Char('c') => Event::ClearFilters,
        KeyCode::Char('1') => Event::SortBy(SortField::Name),
        KeyCode::Char('2') => Event::SortBy(SortField::Amount),
        KeyCode::Char('3') => Event::SortBy(SortField::Id),

        KeyCode::Left | KeyCode::Char('h') if pagination.has_previous() => Event::PreviousPage,
        KeyCode::Right | KeyCode::Char('l') if pagination.has_next() => Event::NextPage,
        KeyCode::Home | KeyCode::Char('g') if pagination.has_previous() => Event::FirstPage,
        KeyCode::End | KeyCode::Char('G') if pagination.has_next() => Event::LastPage,
        KeyCode::Char('p') => Event::CycleRecordsPerPage,

        KeyCode::Up | KeyCode::Char('k') => Event::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Event::SelectNext,
        KeyCode::Enter => Event::OpenDetail,
        KeyCode::Char('r') => Event::Reload,

        KeyCode::Char('e') => Event::StartExport(ExportKind::Buffered),
        KeyCode::Char('E') => Event::StartExport(ExportKind::Streamed),
        KeyCode::Char('s') => Event::OpenModal(Modal::Exports),
        KeyCode::Char('?') => Event::OpenModal(Modal::Help),
        KeyCode::Char('m') => Event::ToggleNav,
        _ => return None,
    };
    Some(event)
}

fn map_input_key(state: &DashboardState, field: Focus, key: KeyEvent) -> Option<Event> {
    let current = match field {
        Focus::Search => &state.filters.query,
        Focus::MinAmount => &state.filters.min_amount,
        Focus::MaxAmount => &state.filters.max_amount,
        Focus::Table => return None,
    };

    let edited = match key.code {
        KeyCode::Esc | KeyCode::Enter => return Some(Event::Focus(Focus::Table)),
        KeyCode::Tab => return Some(Event::Focus(next_field(field))),
        KeyCode::Backspace => {
            let mut value = current.clone();
            value.pop()?;
            value
        }
        KeyCode::Char(ch) => {
            let mut value = current.clone();
            value.push(ch);
            value
        }
        _ => return None,
    };

    Some(match field {
        Focus::MinAmount => Event::MinAmountChanged(edited),
        Focus::MaxAmount => Event::MaxAmountChanged(edited),
        _ => Event::SearchChanged(edited),
    })
}

fn next_field(field: Focus) -> Focus {
    match field {
        Focus::Search => Focus::MinAmount,
        Focus::MinAmount => Focus::MaxAmount,
        Focus::MaxAmount | Focus::Table => Focus::Search,
    }
}
