use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use common::models::{Client, ClientStatus, ClientType};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FirstName,
    LastName,
    Email,
    Phone,
    CompanyName,
    ClientType,
    RegistrationDate,
    Status,
    Notes,
}

pub const COLUMNS: [Column; 9] = [
    Column::FirstName,
    Column::LastName,
    Column::Email,
    Column::Phone,
    Column::CompanyName,
    Column::ClientType,
    Column::RegistrationDate,
    Column::Status,
    Column::Notes,
];

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Email => "Email",
            Column::Phone => "Phone",
            Column::CompanyName => "Company Name",
            Column::ClientType => "Client Type",
            Column::RegistrationDate => "Registration Date",
            Column::Status => "Status",
            Column::Notes => "Notes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Editable string projection of a [`Client`]. Empty optional fields become
/// empty strings and back again on save.
#[derive(Debug, Clone, Default)]
pub struct ClientForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub client_type: String,
    pub registration_date: String,
    pub status: String,
    pub notes: String,
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            email: client.email.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            company_name: client.company_name.clone().unwrap_or_default(),
            client_type: client.client_type.clone().unwrap_or_default(),
            registration_date: client
                .registration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status: client.status.clone().unwrap_or_default(),
            notes: client.notes.clone().unwrap_or_default(),
        }
    }

    pub fn to_client(&self, client_id: i32) -> Client {
        Client {
            client_id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            company_name: optional(&self.company_name),
            client_type: optional(&self.client_type),
            registration_date: parse_date(&self.registration_date),
            status: optional(&self.status),
            notes: optional(&self.notes),
        }
    }

    pub fn value(&self, column: Column) -> &str {
        match column {
            Column::FirstName => &self.first_name,
            Column::LastName => &self.last_name,
            Column::Email => &self.email,
            Column::Phone => &self.phone,
            Column::CompanyName => &self.company_name,
            Column::ClientType => &self.client_type,
            Column::RegistrationDate => &self.registration_date,
            Column::Status => &self.status,
            Column::Notes => &self.notes,
        }
    }

    fn value_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::FirstName => &mut self.first_name,
            Column::LastName => &mut self.last_name,
            Column::Email => &mut self.email,
            Column::Phone => &mut self.phone,
            Column::CompanyName => &mut self.company_name,
            Column::ClientType => &mut self.client_type,
            Column::RegistrationDate => &mut self.registration_date,
            Column::Status => &mut self.status,
            Column::Notes => &mut self.notes,
        }
    }
}

fn optional(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Grid cells show today's date when a registration date is absent.
pub fn display_date(date: Option<DateTime<Utc>>) -> String {
    date.unwrap_or_else(Utc::now).format("%Y/%m/%d").to_string()
}

/// Values offered for the enum-backed columns, cycled through while editing.
/// The leading empty string clears the field.
fn choices(column: Column) -> Option<Vec<String>> {
    match column {
        Column::ClientType => {
            let mut values = vec![String::new()];
            values.extend(ClientType::VALUES.iter().map(|v| v.to_string()));
            Some(values)
        }
        Column::Status => {
            let mut values = vec![String::new()];
            values.extend(ClientStatus::VALUES.iter().map(|v| v.to_string()));
            Some(values)
        }
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct EditState {
    pub client_id: i32,
    pub is_new: bool,
    pub form: ClientForm,
    pub field: usize,
    pub error: Option<&'static str>,
}

impl EditState {
    pub fn current_column(&self) -> Column {
        COLUMNS[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % COLUMNS.len();
    }

    pub fn previous_field(&mut self) {
        self.field = (self.field + COLUMNS.len() - 1) % COLUMNS.len();
    }

    pub fn input(&mut self, c: char) {
        let column = self.current_column();
        if let Some(values) = choices(column) {
            // Enum columns cycle through their allowed values instead of
            // taking free-form text.
            if c == ' ' {
                let current = self.form.value(column).to_string();
                let position = values.iter().position(|v| *v == current).unwrap_or(0);
                let next = &values[(position + 1) % values.len()];
                *self.form.value_mut(column) = next.clone();
            }
            return;
        }
        self.form.value_mut(column).push(c);
    }

    pub fn backspace(&mut self) {
        let column = self.current_column();
        if choices(column).is_some() {
            self.form.value_mut(column).clear();
            return;
        }
        self.form.value_mut(column).pop();
    }
}

/// Request the row commit produced: placeholder-id rows go to Add, everything
/// else to Update.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    Add(Client),
    Update(Client),
}

#[derive(Debug, Clone)]
struct Row {
    client: Client,
    pending: bool,
}

/// Local grid state. All sorting, filtering and pagination happens here; the
/// server always serves and receives full records.
pub struct GridState {
    rows: Vec<Row>,
    pub selected: usize,
    pub edit: Option<EditState>,
    pub filter: String,
    pub sort: Option<(Column, SortOrder)>,
    next_placeholder_id: i32,
}

impl GridState {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            edit: None,
            filter: String::new(),
            sort: None,
            next_placeholder_id: -1,
        }
    }

    /// Wholesale replacement from the initial fetch.
    pub fn replace_all(&mut self, clients: Vec<Client>) {
        self.rows = clients
            .into_iter()
            .map(|client| Row {
                client,
                pending: false,
            })
            .collect();
        self.selected = 0;
        self.edit = None;
    }

    /// The filtered, sorted projection the table renders from.
    pub fn visible(&self) -> Vec<&Client> {
        let needle = self.filter.to_lowercase();
        let mut clients: Vec<&Client> = self
            .rows
            .iter()
            .map(|row| &row.client)
            .filter(|client| matches_filter(client, &needle))
            .collect();

        if let Some((column, order)) = self.sort {
            clients.sort_by(|a, b| {
                let ordering = compare(a, b, column);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        clients
    }

    pub fn page(&self) -> usize {
        self.selected / PAGE_SIZE
    }

    pub fn page_count(&self) -> usize {
        let pages = (self.visible().len() + PAGE_SIZE - 1) / PAGE_SIZE;
        pages.max(1)
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.visible().get(self.selected).copied()
    }

    pub fn next(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + PAGE_SIZE).min(len - 1);
    }

    pub fn previous_page(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_SIZE);
    }

    /// Same column again flips ascending to descending, then back to the
    /// store-native order.
    pub fn sort_by(&mut self, column: Column) {
        self.sort = match self.sort {
            Some((current, SortOrder::Ascending)) if current == column => {
                Some((column, SortOrder::Descending))
            }
            Some((current, SortOrder::Descending)) if current == column => None,
            _ => Some((column, SortOrder::Ascending)),
        };
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.clamp_selection();
    }

    /// Creates an unsaved row with a fresh placeholder id and puts it
    /// straight into edit mode.
    pub fn begin_add(&mut self) {
        let placeholder_id = self.next_placeholder_id;
        self.next_placeholder_id -= 1;

        let client = Client {
            client_id: placeholder_id,
            ..Default::default()
        };
        self.rows.push(Row {
            client: client.clone(),
            pending: true,
        });
        self.edit = Some(EditState {
            client_id: placeholder_id,
            is_new: true,
            form: ClientForm::from_client(&client),
            field: 0,
            error: None,
        });
    }

    pub fn begin_edit(&mut self) {
        let Some(client) = self.selected_client().cloned() else {
            return;
        };
        let is_new = self
            .row_index(client.client_id)
            .map(|i| self.rows[i].pending)
            .unwrap_or(false);
        self.edit = Some(EditState {
            client_id: client.client_id,
            is_new,
            form: ClientForm::from_client(&client),
            field: 0,
            error: None,
        });
    }

    /// Discards in-row changes; a never-saved row disappears entirely.
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            if edit.is_new {
                if let Some(i) = self.row_index(edit.client_id) {
                    self.rows.remove(i);
                }
                self.clamp_selection();
            }
        }
    }

    /// Validates and commits the edit buffer into local state, returning the
    /// request to fire. The commit is optimistic: the grid shows the new
    /// values whether or not the request later succeeds.
    pub fn save_edit(&mut self) -> Option<SaveAction> {
        let edit = self.edit.as_mut()?;
        if edit.form.first_name.trim().is_empty() || edit.form.last_name.trim().is_empty() {
            edit.error = Some("First and last name are required");
            return None;
        }

        let edit = self.edit.take()?;
        let client = edit.form.to_client(edit.client_id);
        if let Some(i) = self.row_index(edit.client_id) {
            self.rows[i].client = client.clone();
            self.rows[i].pending = false;
        }

        if client.client_id < 0 {
            Some(SaveAction::Add(client))
        } else {
            Some(SaveAction::Update(client))
        }
    }

    /// Swaps a placeholder id for the record the store returned on Add.
    pub fn adopt_assigned(&mut self, placeholder_id: i32, created: Client) {
        if let Some(i) = self.row_index(placeholder_id) {
            self.rows[i].client = created;
        }
    }

    /// Removes the selected row locally right away. Returns the id to fire a
    /// delete request for, or `None` when the row never reached the store.
    pub fn delete_selected(&mut self) -> Option<i32> {
        let client_id = self.selected_client()?.client_id;
        if let Some(i) = self.row_index(client_id) {
            self.rows.remove(i);
        }
        self.clamp_selection();

        if client_id > 0 {
            Some(client_id)
        } else {
            None
        }
    }

    fn row_index(&self, client_id: i32) -> Option<usize> {
        self.rows.iter().position(|row| row.client.client_id == client_id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

fn matches_filter(client: &Client, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let mut haystacks = vec![client.first_name.as_str(), client.last_name.as_str()];
    for field in [
        &client.email,
        &client.phone,
        &client.company_name,
        &client.client_type,
        &client.status,
        &client.notes,
    ] {
        if let Some(value) = field {
            haystacks.push(value.as_str());
        }
    }
    haystacks
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}

fn compare(a: &Client, b: &Client, column: Column) -> Ordering {
    fn text(value: &Option<String>) -> String {
        value.as_deref().unwrap_or("").to_lowercase()
    }

    match column {
        Column::FirstName => a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()),
        Column::LastName => a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase()),
        Column::Email => text(&a.email).cmp(&text(&b.email)),
        Column::Phone => text(&a.phone).cmp(&text(&b.phone)),
        Column::CompanyName => text(&a.company_name).cmp(&text(&b.company_name)),
        Column::ClientType => text(&a.client_type).cmp(&text(&b.client_type)),
        Column::RegistrationDate => a.registration_date.cmp(&b.registration_date),
        Column::Status => text(&a.status).cmp(&text(&b.status)),
        Column::Notes => text(&a.notes).cmp(&text(&b.notes)),
    }
}
