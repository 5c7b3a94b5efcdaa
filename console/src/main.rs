mod api;
mod grid;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::sync::mpsc;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use api::{ApiClient, Notice};
use common::models::Client;
use grid::{GridState, SaveAction, COLUMNS};

const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Messages sent back from in-flight requests. The grid state never waits on
/// them; they only drive toasts and the id swap after a successful add.
enum AppEvent {
    Notice(Notice),
    Created { placeholder_id: i32, created: Client },
}

pub struct AppState {
    pub grid: GridState,
    pub filtering: bool,
    pub notice: Option<(Notice, Instant)>,
}

impl AppState {
    fn new() -> Self {
        Self {
            grid: GridState::new(),
            filtering: false,
            notice: None,
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now()));
    }

    fn expire_notice(&mut self) {
        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() > NOTICE_TTL {
                self.notice = None;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let client = ApiClient::from_env();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut app = AppState::new();

    // Initial mount: fetch everything once, no retry on failure.
    match client.get_all().await {
        Ok(clients) => {
            app.grid.replace_all(clients);
            app.notify(Notice::Success("All clients fetched".to_string()));
        }
        Err(_) => app.notify(Notice::Failure("Error fetching clients".to_string())),
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        println!("Error: {}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Notice(notice) => app.notify(notice),
                AppEvent::Created {
                    placeholder_id,
                    created,
                } => app.grid.adopt_assigned(placeholder_id, created),
            }
        }
        app.expire_notice();

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.filtering {
                handle_filter_input(app, key.code);
            } else if app.grid.edit.is_some() {
                handle_edit_input(app, client, tx, key.code);
            } else if !handle_browse_input(app, client, tx, key.code) {
                return Ok(());
            }
        }
    }
}

fn handle_filter_input(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Enter => app.filtering = false,
        KeyCode::Esc => {
            app.filtering = false;
            app.grid.set_filter(String::new());
        }
        KeyCode::Char(c) => {
            let mut filter = app.grid.filter.clone();
            filter.push(c);
            app.grid.set_filter(filter);
        }
        KeyCode::Backspace => {
            let mut filter = app.grid.filter.clone();
            filter.pop();
            app.grid.set_filter(filter);
        }
        _ => {}
    }
}

fn handle_edit_input(
    app: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
    key: KeyCode,
) {
    let Some(edit) = app.grid.edit.as_mut() else {
        return;
    };
    match key {
        KeyCode::Tab | KeyCode::Down => edit.next_field(),
        KeyCode::BackTab | KeyCode::Up => edit.previous_field(),
        KeyCode::Char(c) => edit.input(c),
        KeyCode::Backspace => edit.backspace(),
        KeyCode::Esc => app.grid.cancel_edit(),
        KeyCode::Enter => {
            if let Some(action) = app.grid.save_edit() {
                fire_save(client, tx, action);
            }
        }
        _ => {}
    }
}

fn handle_browse_input(
    app: &mut AppState,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
    key: KeyCode,
) -> bool {
    match key {
        KeyCode::Char('q') => return false,
        KeyCode::Down | KeyCode::Char('j') => app.grid.next(),
        KeyCode::Up | KeyCode::Char('k') => app.grid.previous(),
        KeyCode::Right => app.grid.next_page(),
        KeyCode::Left => app.grid.previous_page(),
        KeyCode::Char('a') => app.grid.begin_add(),
        KeyCode::Char('e') => app.grid.begin_edit(),
        KeyCode::Char('d') => {
            if let Some(client_id) = app.grid.delete_selected() {
                fire_delete(client, tx, client_id);
            }
        }
        KeyCode::Char('/') => app.filtering = true,
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10).filter(|d| *d >= 1) {
                if let Some(column) = COLUMNS.get(digit as usize - 1) {
                    app.grid.sort_by(*column);
                }
            }
        }
        _ => {}
    }
    true
}

/// Fire-and-forget: the optimistic commit already happened, the response only
/// produces a toast (and the assigned id for adds).
fn fire_save(client: &ApiClient, tx: &mpsc::UnboundedSender<AppEvent>, action: SaveAction) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        match action {
            SaveAction::Add(candidate) => match client.add(&candidate).await {
                Ok(created) => {
                    let _ = tx.send(AppEvent::Created {
                        placeholder_id: candidate.client_id,
                        created,
                    });
                    let _ = tx.send(AppEvent::Notice(Notice::Success(
                        "Successfully added".to_string(),
                    )));
                }
                Err(_) => {
                    let _ = tx.send(AppEvent::Notice(Notice::Failure(
                        "Error adding client".to_string(),
                    )));
                }
            },
            SaveAction::Update(candidate) => match client.update(&candidate).await {
                Ok(_) => {
                    let _ = tx.send(AppEvent::Notice(Notice::Success(
                        "Successfully updated".to_string(),
                    )));
                }
                Err(_) => {
                    let _ = tx.send(AppEvent::Notice(Notice::Failure(
                        "Error updating client".to_string(),
                    )));
                }
            },
        }
    });
}

/// Local removal already happened and is never reverted, even on failure.
fn fire_delete(client: &ApiClient, tx: &mpsc::UnboundedSender<AppEvent>, client_id: i32) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        match client.delete(client_id).await {
            Ok(_) => {
                let _ = tx.send(AppEvent::Notice(Notice::Success(
                    "Successfully deleted".to_string(),
                )));
            }
            Err(_) => {
                let _ = tx.send(AppEvent::Notice(Notice::Failure(
                    "Error deleting client".to_string(),
                )));
            }
        }
    });
}
