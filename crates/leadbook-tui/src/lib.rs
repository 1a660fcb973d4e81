// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use leadbook_app::{
    AddOutcome, AppCommand, AppMode, AppState, CONTACT_COLUMNS, CategoryBrowser, ContactDraft,
    ContactManager, ContactRow, DraftField, FormKind, SaveOutcome, StatusTone, Toast,
    ToastLevel, ToastQueue, ViewKind,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::macros::format_description;

const LOADING_CATEGORIES: &str = "Loading categories...";
const LOADING_CONTACTS: &str = "Loading contacts...";
const NO_CATEGORIES: &str = "No categories yet. Create one above to get started!";
const NO_CONTACTS: &str = "No contacts yet. Press \"a\" to add a contact.";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    browser: CategoryBrowser,
    contacts: Option<ContactManager>,
    category_cursor: usize,
    contact_cursor: usize,
    field: DraftField,
    toasts: ToastQueue,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            browser: CategoryBrowser::default(),
            contacts: None,
            category_cursor: 0,
            contact_cursor: 0,
            field: DraftField::BusinessName,
            toasts: ToastQueue::default(),
            status_token: 0,
        }
    }
}

impl ViewData {
    fn contact_count(&self) -> usize {
        self.contacts
            .as_ref()
            .map_or(0, |manager| manager.contacts().len())
    }

    fn clamp_cursors(&mut self) {
        self.category_cursor = clamp(self.category_cursor, self.browser.categories().len());
        self.contact_cursor = clamp(self.contact_cursor, self.contact_count());
    }
}

/// Runs the full-screen contact manager against `repo` until the user quits.
pub fn run_app<R>(state: &mut AppState, repo: &mut R, label: &str) -> Result<()>
where
    R: leadbook_app::Backend + ?Sized,
{
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    view_data.browser.load_categories(repo);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data, label)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, repo, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    toast: Toast,
) {
    state.dispatch(AppCommand::ShowToast(toast));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

// Toasts raised by the controllers during one key press reach the status
// line in order; the last one stays visible.
fn flush_toasts(state: &mut AppState, view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    for toast in view_data.toasts.drain() {
        emit_status(state, view_data, internal_tx, toast);
    }
}

fn handle_key_event<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool
where
    R: leadbook_app::Backend + ?Sized,
{
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            state.dispatch(AppCommand::ToggleHelp);
        }
        return false;
    }

    let quit = match (state.view, state.mode) {
        (ViewKind::Categories, AppMode::Form(FormKind::Category)) => {
            handle_category_input_key(state, repo, view_data, key);
            false
        }
        (ViewKind::Categories, _) => handle_category_nav_key(state, repo, view_data, key),
        (ViewKind::Contacts, AppMode::Form(kind)) => {
            handle_contact_form_key(state, repo, view_data, kind, key);
            false
        }
        (ViewKind::Contacts, AppMode::Nav) => handle_contact_nav_key(state, repo, view_data, key),
    };

    view_data.clamp_cursors();
    flush_toasts(state, view_data, internal_tx);
    quit
}

fn handle_category_nav_key<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool
where
    R: leadbook_app::Backend + ?Sized,
{
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            state.dispatch(AppCommand::ToggleHelp);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.category_cursor = view_data.category_cursor.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.category_cursor = view_data.category_cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            state.dispatch(AppCommand::OpenForm(FormKind::Category));
        }
        KeyCode::Char('r') => {
            view_data.browser.load_categories(repo);
        }
        KeyCode::Char('d') => {
            if let Some(category) = view_data
                .browser
                .categories()
                .get(view_data.category_cursor)
            {
                let id = category.id.clone();
                view_data.browser.delete_category(repo, &id);
            }
        }
        KeyCode::Enter => open_selected_category(state, repo, view_data),
        _ => {}
    }
    false
}

fn handle_category_input_key<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) where
    R: leadbook_app::Backend + ?Sized,
{
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Enter => {
            if view_data.browser.add_category(repo).is_some() {
                view_data.category_cursor = 0;
            }
        }
        KeyCode::Backspace => {
            view_data.browser.new_category_name.pop();
        }
        KeyCode::Char(ch) => {
            view_data.browser.new_category_name.push(ch);
        }
        _ => {}
    }
}

fn open_selected_category<R>(state: &mut AppState, repo: &mut R, view_data: &mut ViewData)
where
    R: leadbook_app::Backend + ?Sized,
{
    let Some(category) = view_data
        .browser
        .categories()
        .get(view_data.category_cursor)
    else {
        return;
    };
    let id = category.id.clone();
    view_data.browser.select_category(Some(id.clone()));
    match view_data.contacts.as_mut() {
        Some(manager) => {
            manager.scope_to(repo, id);
        }
        None => {
            let mut manager = ContactManager::new(id);
            manager.load_contacts(repo);
            view_data.contacts = Some(manager);
        }
    }
    view_data.contact_cursor = 0;
    state.dispatch(AppCommand::OpenContacts);
}

fn handle_contact_nav_key<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool
where
    R: leadbook_app::Backend + ?Sized,
{
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            state.dispatch(AppCommand::ToggleHelp);
        }
        KeyCode::Esc | KeyCode::Char('b') => {
            view_data.browser.select_category(None);
            state.dispatch(AppCommand::BackToCategories);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.contact_cursor = view_data.contact_cursor.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.contact_cursor = view_data.contact_cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            if !view_data.browser.is_adding_contact() {
                view_data.browser.set_adding_contact(true);
                view_data.field = DraftField::BusinessName;
                state.dispatch(AppCommand::OpenForm(FormKind::NewContact));
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            let cursor = view_data.contact_cursor;
            if begin_edit_at(view_data, cursor) {
                view_data.field = DraftField::BusinessName;
                state.dispatch(AppCommand::OpenForm(FormKind::EditContact));
            }
        }
        KeyCode::Char('d') => {
            let cursor = view_data.contact_cursor;
            if let Some(manager) = view_data.contacts.as_mut()
                && let Some(contact) = manager.contacts().get(cursor)
            {
                let id = contact.id.clone();
                manager.delete_contact(repo, &mut view_data.toasts, &id);
            }
        }
        KeyCode::Char('r') => {
            if let Some(manager) = view_data.contacts.as_mut() {
                manager.load_contacts(repo);
            }
        }
        _ => {}
    }
    false
}

fn begin_edit_at(view_data: &mut ViewData, index: usize) -> bool {
    let Some(manager) = view_data.contacts.as_mut() else {
        return false;
    };
    let Some(contact) = manager.contacts().get(index) else {
        return false;
    };
    let id = contact.id.clone();
    manager.begin_edit(&id, &mut view_data.toasts)
}

fn handle_contact_form_key<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    kind: FormKind,
    key: KeyEvent,
) where
    R: leadbook_app::Backend + ?Sized,
{
    match key.code {
        KeyCode::Esc => {
            match kind {
                FormKind::EditContact => {
                    if let Some(manager) = view_data.contacts.as_mut() {
                        manager.cancel_edit();
                    }
                }
                _ => view_data.browser.set_adding_contact(false),
            }
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Enter => submit_contact_form(state, repo, view_data, kind),
        KeyCode::Tab => view_data.field = view_data.field.step(1),
        KeyCode::BackTab => view_data.field = view_data.field.step(-1),
        KeyCode::Up | KeyCode::Down if kind == FormKind::EditContact => {
            let target = if key.code == KeyCode::Up {
                view_data.contact_cursor.checked_sub(1)
            } else {
                Some(view_data.contact_cursor + 1)
            };
            if let Some(target) = target
                && target < view_data.contact_count()
                && begin_edit_at(view_data, target)
            {
                view_data.contact_cursor = target;
            }
        }
        code => {
            let field = view_data.field;
            if let Some(draft) = active_draft_mut(view_data, kind) {
                edit_draft_field(draft, field, code);
            }
        }
    }
}

fn submit_contact_form<R>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    kind: FormKind,
) where
    R: leadbook_app::Backend + ?Sized,
{
    let Some(manager) = view_data.contacts.as_mut() else {
        return;
    };
    match kind {
        FormKind::EditContact => {
            if manager.save_edit(repo, &mut view_data.toasts) == SaveOutcome::Saved {
                state.dispatch(AppCommand::ExitToNav);
            }
        }
        _ => {
            if let AddOutcome::Added(_) = manager.add_contact(repo, &mut view_data.toasts) {
                view_data.browser.set_adding_contact(false);
                view_data.contact_cursor = 0;
                state.dispatch(AppCommand::ExitToNav);
            }
        }
    }
}

fn active_draft_mut(view_data: &mut ViewData, kind: FormKind) -> Option<&mut ContactDraft> {
    let manager = view_data.contacts.as_mut()?;
    match kind {
        FormKind::EditContact => manager.edit_draft_mut(),
        _ => Some(&mut manager.new_contact),
    }
}

fn edit_draft_field(draft: &mut ContactDraft, field: DraftField, code: KeyCode) {
    if field == DraftField::Status {
        match code {
            KeyCode::Right | KeyCode::Char(' ') => draft.status = draft.status.cycle(1),
            KeyCode::Left => draft.status = draft.status.cycle(-1),
            _ => {}
        }
        return;
    }
    let Some(text) = draft.text_mut(field) else {
        return;
    };
    match code {
        KeyCode::Char(ch) => text.push(ch),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    if len == 0 { 0 } else { cursor.min(len - 1) }
}

fn tone_color(tone: Option<StatusTone>) -> Option<Color> {
    tone.map(|tone| match tone {
        StatusTone::Green => Color::Green,
        StatusTone::Yellow => Color::Yellow,
        StatusTone::Red => Color::Red,
    })
}

fn toast_color(level: ToastLevel) -> Color {
    match level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Error => Color::Red,
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData, label: &str) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = if label.is_empty() {
        "leadbook".to_owned()
    } else {
        format!("leadbook ({label})")
    };
    let breadcrumb = Paragraph::new(render_breadcrumb_text(state, view_data))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(breadcrumb, layout[0]);

    match state.view {
        ViewKind::Categories => render_categories(frame, layout[1], state, view_data),
        ViewKind::Contacts => render_contacts(frame, layout[1], state, view_data),
    }

    let status_style = state
        .status_level()
        .map_or(Style::default().fg(Color::DarkGray), |level| {
            Style::default().fg(toast_color(level))
        });
    let status_widget = Paragraph::new(status_text(state))
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if state.show_help {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_categories(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let typing = state.mode == AppMode::Form(FormKind::Category);
    let input_style = if typing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let input = Paragraph::new(category_input_text(state, view_data)).block(
        Block::default()
            .title("new category")
            .borders(Borders::ALL)
            .style(input_style),
    );
    frame.render_widget(input, layout[0]);

    let block = Block::default().title("categories").borders(Borders::ALL);
    if let Some(message) = category_placeholder(&view_data.browser) {
        frame.render_widget(Paragraph::new(message).block(block), layout[1]);
        return;
    }

    let rows = view_data
        .browser
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let style = if index == view_data.category_cursor && !typing {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(category.name.clone()),
                Cell::from(created_label(category.created_at)),
            ])
            .style(style)
        });
    let header = Row::new(vec!["Name", "Created"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(12)])
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, layout[1]);
}

fn render_contacts(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let title = view_data
        .browser
        .selected_category()
        .map_or_else(|| "contacts".to_owned(), |category| category.name.clone());
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(manager) = &view_data.contacts else {
        frame.render_widget(Paragraph::new(String::new()).block(block), area);
        return;
    };
    let adding = view_data.browser.is_adding_contact();
    if let Some(message) = contact_placeholder(manager, adding) {
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let focus = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut rows = Vec::new();
    if adding {
        rows.push(draft_row(&manager.new_contact, view_data.field, focus));
    }
    for (index, contact) in manager.contacts().iter().enumerate() {
        if manager.editing_id() == Some(&contact.id)
            && let Some(draft) = manager.edit_draft()
        {
            rows.push(draft_row(draft, view_data.field, focus));
            continue;
        }
        let row = ContactRow::from_contact(contact);
        let selected = state.mode == AppMode::Nav && index == view_data.contact_cursor;
        let cells = row
            .cells
            .iter()
            .enumerate()
            .map(|(column, text)| {
                let mut style = Style::default();
                if column == ContactRow::STATUS_COLUMN
                    && let Some(color) = tone_color(row.tone)
                {
                    style = style.fg(color);
                }
                if selected {
                    style = style.bg(Color::DarkGray);
                }
                Cell::from(text.clone()).style(style)
            })
            .collect::<Vec<_>>();
        rows.push(Row::new(cells));
    }

    let header = Row::new(CONTACT_COLUMNS.to_vec()).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Min(16),
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(15),
        Constraint::Min(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn draft_row(draft: &ContactDraft, field: DraftField, focus: Style) -> Row<'static> {
    let cells = DraftField::ALL
        .iter()
        .map(|candidate| {
            let text = draft_cell_text(draft, *candidate);
            let mut style = Style::default().add_modifier(Modifier::UNDERLINED);
            if *candidate == DraftField::Status
                && let Some(color) = tone_color(draft.status.tone())
            {
                style = style.fg(color);
            }
            if *candidate == field {
                style = focus;
            }
            Cell::from(text).style(style)
        })
        .collect::<Vec<_>>();
    Row::new(cells)
}

fn draft_cell_text(draft: &ContactDraft, field: DraftField) -> String {
    match field {
        DraftField::Status => format!("< {} >", draft.status.as_str()),
        _ => {
            let text = draft.text(field);
            if text.is_empty() {
                field.placeholder().to_owned()
            } else {
                text.to_owned()
            }
        }
    }
}

fn category_placeholder(browser: &CategoryBrowser) -> Option<&'static str> {
    if browser.is_loading() {
        Some(LOADING_CATEGORIES)
    } else if browser.categories().is_empty() {
        Some(NO_CATEGORIES)
    } else {
        None
    }
}

fn contact_placeholder(manager: &ContactManager, adding: bool) -> Option<&'static str> {
    if manager.is_loading() {
        Some(LOADING_CONTACTS)
    } else if manager.contacts().is_empty() && !adding {
        Some(NO_CONTACTS)
    } else {
        None
    }
}

fn category_input_text(state: &AppState, view_data: &ViewData) -> String {
    let name = &view_data.browser.new_category_name;
    if state.mode == AppMode::Form(FormKind::Category) {
        format!("{name}_")
    } else if name.is_empty() {
        "press a to type a category name".to_owned()
    } else {
        name.clone()
    }
}

fn created_label(created_at: time::OffsetDateTime) -> String {
    created_at
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn render_breadcrumb_text(state: &AppState, view_data: &ViewData) -> String {
    match (state.view, view_data.browser.selected_category()) {
        (ViewKind::Contacts, Some(category)) => format!("Categories > {}", category.name),
        _ => "Categories".to_owned(),
    }
}

/// Plain-text rendering of the contact table, one line per row, used by the
/// key-script tests.
fn contact_table_lines(view_data: &ViewData) -> Vec<String> {
    let Some(manager) = &view_data.contacts else {
        return Vec::new();
    };
    let adding = view_data.browser.is_adding_contact();
    if let Some(message) = contact_placeholder(manager, adding) {
        return vec![message.to_owned()];
    }
    let mut lines = Vec::new();
    if adding {
        lines.push(format!("+ {}", draft_line(&manager.new_contact)));
    }
    for contact in manager.contacts() {
        if manager.editing_id() == Some(&contact.id)
            && let Some(draft) = manager.edit_draft()
        {
            lines.push(format!("* {}", draft_line(draft)));
        } else {
            lines.push(format!("  {}", ContactRow::from_contact(contact).cells.join(" | ")));
        }
    }
    lines
}

fn draft_line(draft: &ContactDraft) -> String {
    DraftField::ALL
        .iter()
        .map(|field| draft_cell_text(draft, *field))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn status_text(state: &AppState) -> String {
    if let Some(toast) = &state.status {
        return toast.message.clone();
    }
    match (state.view, state.mode) {
        (_, AppMode::Form(FormKind::Category)) => "enter add | esc done".to_owned(),
        (_, AppMode::Form(FormKind::NewContact)) => {
            "tab field | left/right status | enter add | esc cancel".to_owned()
        }
        (_, AppMode::Form(FormKind::EditContact)) => {
            "tab field | left/right status | up/down row | enter save | esc cancel".to_owned()
        }
        (ViewKind::Categories, AppMode::Nav) => {
            "a new | enter open | d delete | r reload | ? help | q quit".to_owned()
        }
        (ViewKind::Contacts, AppMode::Nav) => {
            "a add | e edit | d delete | r reload | b back | ? help | q quit".to_owned()
        }
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
categories: j/k move | a type new name | enter open | d delete | r reload | q quit\n\
category input: type name | enter add | backspace erase | esc done\n\
contacts: j/k move | a add row | e/enter edit row | d delete | r reload | b/esc back\n\
contact row: tab/shift+tab field | left/right/space status | enter save | esc cancel\n\
editing: up/down move edit to the next row when nothing changed"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
