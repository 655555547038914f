//! Table screen layout rendering.
//!
//! Header bar, record table with a checkbox column, paginator and status bar.
//! Checkbox state is derived from the selection on every frame; nothing about
//! a page's checked rows is remembered between visits.

use crate::model::Page;
use crate::state::{AppState, StatusMessage};
use crate::view::select_popup;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Static view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Heading shown in the header bar.
    pub title: String,
    /// Record attributes shown as columns, in order.
    pub columns: Vec<String>,
}

/// Checkbox glyph for one row.
pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Header checkbox glyph: all, some or none of the page checked.
pub fn page_checkbox(checked: usize, rows: usize) -> &'static str {
    match checked {
        0 => "[ ]",
        n if n == rows => "[x]",
        _ => "[-]",
    }
}

/// Column heading for an attribute name: `place_of_origin` -> `Place Of Origin`.
pub fn column_heading(attribute: &str) -> String {
    attribute
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paginator text, e.g. `Page 2 of 10 · 120 records`.
pub fn paginator_text(state: &AppState) -> String {
    let current = state.current_index().page_number();
    match (state.total_pages(), state.page()) {
        (Some(pages), Some(page)) => format!(
            "Page {current} of {pages} · {} records",
            page.total_count()
        ),
        _ => format!("Page {current}"),
    }
}

/// Render the full screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, view: &ViewConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Paginator
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, view);
    render_table(frame, chunks[1], state, view);
    render_paginator(frame, chunks[2], state);
    render_status_bar(frame, chunks[3], state);

    if state.select_input.is_open() {
        select_popup::render_select_popup(frame, &state.select_input);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, view: &ViewConfig) {
    let mut spans = vec![
        Span::styled(
            view.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Selected: "),
        Span::styled(
            state.selected_count().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if state.is_loading() {
        spans.push(Span::styled(
            "   Loading…",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState, view: &ViewConfig) {
    let block = Block::default().borders(Borders::ALL);

    let Some(page) = state.page() else {
        let message = if state.is_loading() {
            "Loading records…"
        } else {
            "No records loaded"
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    };

    let visible = state.visible_selection();
    let header = header_row(page, visible.len(), view);
    let rows = page.records().iter().map(|record| {
        let mut cells = vec![Cell::from(checkbox(visible.contains(&record.id())))];
        cells.extend(view.columns.iter().map(|col| Cell::from(record.display(col))));
        Row::new(cells)
    });

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(view.columns.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn header_row<'a>(page: &Page, checked: usize, view: &ViewConfig) -> Row<'a> {
    let mut cells = vec![Cell::from(page_checkbox(checked, page.len()))];
    cells.extend(
        view.columns
            .iter()
            .map(|col| Cell::from(column_heading(col))),
    );
    Row::new(cells).style(Style::default().add_modifier(Modifier::BOLD))
}

fn render_paginator(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled("« g  ‹ h   ", Style::default().fg(Color::DarkGray)),
        Span::raw(paginator_text(state)),
        Span::styled("   l ›  G »", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status {
        Some(StatusMessage::Error(text)) => {
            Line::from(Span::styled(text.clone(), Style::default().fg(Color::Red)))
        }
        Some(StatusMessage::Info(text)) => {
            Line::from(Span::styled(text.clone(), Style::default().fg(Color::Green)))
        }
        None => Line::from(Span::styled(
            "space: toggle row  a: toggle page  s: select N  r: reload  q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
