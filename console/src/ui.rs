use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Notice;
use crate::grid::{self, Column, EditState, SortOrder, COLUMNS, PAGE_SIZE};
use crate::AppState;

pub fn render<B: Backend>(frame: &mut Frame<B>, app: &AppState) {
    let constraints = if app.grid.edit.is_some() {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(13),
            Constraint::Length(3),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    let title = Paragraph::new("Client Manager")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_table(frame, app, chunks[1]);

    if let Some(edit) = &app.grid.edit {
        render_edit_form(frame, edit, chunks[2]);
    }

    let footer_area = *chunks.last().expect("layout always has a footer");
    render_footer(frame, app, footer_area);
}

fn render_table<B: Backend>(frame: &mut Frame<B>, app: &AppState, area: tui::layout::Rect) {
    let visible = app.grid.visible();
    let page = app.grid.page();
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(visible.len());

    let header_cells = std::iter::once(Cell::from("Id")).chain(COLUMNS.iter().map(|column| {
        let mut title = column.title().to_string();
        if let Some((sorted, order)) = app.grid.sort {
            if sorted == *column {
                title.push_str(match order {
                    SortOrder::Ascending => " ^",
                    SortOrder::Descending => " v",
                });
            }
        }
        Cell::from(title)
    }));
    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows = visible[start..end].iter().map(|client| {
        let id = if client.client_id < 0 {
            "new".to_string()
        } else {
            client.client_id.to_string()
        };
        Row::new(vec![
            Cell::from(id),
            Cell::from(client.first_name.clone()),
            Cell::from(client.last_name.clone()),
            Cell::from(client.email.clone().unwrap_or_default()),
            Cell::from(client.phone.clone().unwrap_or_default()),
            Cell::from(client.company_name.clone().unwrap_or_default()),
            Cell::from(client.client_type.clone().unwrap_or_default()),
            Cell::from(grid::display_date(client.registration_date)),
            Cell::from(client.status.clone().unwrap_or_default()),
            Cell::from(client.notes.clone().unwrap_or_default()),
        ])
    });

    let block_title = format!(
        "Clients (page {}/{}, {} records)",
        page + 1,
        app.grid.page_count(),
        visible.len()
    );

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(20),
    ];
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(block_title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .widths(&widths);

    let mut table_state = TableState::default();
    if end > start {
        table_state.select(Some(app.grid.selected - start));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_edit_form<B: Backend>(frame: &mut Frame<B>, edit: &EditState, area: tui::layout::Rect) {
    let mut items: Vec<ListItem> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = edit.form.value(*column);
            let style = if i == edit.field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let hint = match column {
                Column::ClientType | Column::Status => " (space cycles)",
                Column::RegistrationDate => " (YYYY-MM-DD)",
                _ => "",
            };
            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", column.title()), style),
                Span::styled(value.to_string(), style),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    if let Some(error) = edit.error {
        items.push(ListItem::new(Span::styled(
            error,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let title = if edit.is_new {
        "New Client".to_string()
    } else {
        format!("Edit Client {}", edit.client_id)
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn render_footer<B: Backend>(frame: &mut Frame<B>, app: &AppState, area: tui::layout::Rect) {
    let content = if let Some((notice, _)) = &app.notice {
        match notice {
            Notice::Success(message) => {
                Spans::from(Span::styled(message.clone(), Style::default().fg(Color::Green)))
            }
            Notice::Failure(message) => {
                Spans::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
            }
        }
    } else if app.filtering {
        Spans::from(format!("Filter: {}_  (Enter keep, Esc clear)", app.grid.filter))
    } else if app.grid.edit.is_some() {
        Spans::from("Tab/Down next field  Enter save  Esc cancel")
    } else {
        Spans::from("a add  e edit  d delete  / filter  1-9 sort  Left/Right page  q quit")
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
