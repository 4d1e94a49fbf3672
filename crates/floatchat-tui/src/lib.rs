// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use floatchat_app::{
    AppCommand, AppEvent, AppMode, AppState, AssistantReply, Bounds, ChatRole, ChatSession,
    DateRangePatch, FilterScope, FilterState, FilterStore, FilterUpdate, FloatId,
    FleetCounts, FloatOptionsPatch, FloatRecord, MapMode, PageSize, PanelVisibility, ParamCode,
    Profile, ProfileParameter, RequestId, SortDirection, SortKey, SubmitOutcome, TableInsights,
    TableQuery, TableResult, ViewKind, clamp_page, filter_records, profiles_in_scope,
};
use floatchat_assistant::Surface;
use floatchat_data::{Dataset, export_selection};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::cell::Cell as FlagCell;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{debug, info, warn};

const LAT_STEP: f64 = 10.0;
const LNG_STEP: f64 = 10.0;
const DEPTH_STEP: f64 = 100.0;
const LAT_LIMIT: Bounds = Bounds::new(-90.0, 90.0);
const LNG_LIMIT: Bounds = Bounds::new(-180.0, 180.0);
const DEPTH_LIMIT: Bounds = Bounds::new(0.0, 3000.0);
const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 15;
const PROFILE_BAR_WIDTH: usize = 30;
const MESSAGE_KEEP: usize = 8;
const CLOCK: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

const TABLE_COLUMNS: [SortKey; 11] = [
    SortKey::Id,
    SortKey::Date,
    SortKey::Lat,
    SortKey::Lng,
    SortKey::Temperature,
    SortKey::Salinity,
    SortKey::Depth,
    SortKey::Qc,
    SortKey::Status,
    SortKey::Platform,
    SortKey::Region,
];

pub trait AppRuntime {
    fn dataset(&self) -> &Dataset;
    fn startup_filters(&self) -> FilterState {
        FilterState::default()
    }
    fn page_size(&self) -> PageSize {
        PageSize::default()
    }
    fn greeting(&self, surface: Surface) -> AssistantReply;
    fn reply(&mut self, surface: Surface, query: &str) -> AssistantReply;
    fn reply_delay(&mut self, surface: Surface) -> Duration;
    fn suggest_completions(&self, surface: Surface, input: &str) -> Vec<String>;
    fn export_rows(&mut self, rows: &[FloatRecord]) -> Result<PathBuf>;
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
    /// Deliver `reply` on `tx` once `delay` has passed. The UI keeps running
    /// in the meantime.
    fn spawn_reply(
        &mut self,
        surface: Surface,
        request_id: RequestId,
        reply: AssistantReply,
        delay: Duration,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        thread::spawn(move || {
            thread::sleep(delay);
            let event = InternalEvent::AssistantReply {
                surface,
                request_id,
                reply,
            };
            if tx.send(event).is_err() {
                debug!(request_id = request_id.get(), "reply dropped after shutdown");
            }
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    AssistantReply {
        surface: Surface,
        request_id: RequestId,
        reply: AssistantReply,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ChatUiState {
    session: ChatSession,
    input: String,
    completions: Vec<String>,
    completion_cursor: usize,
}

impl ChatUiState {
    fn greeted(greeting: AssistantReply, now: OffsetDateTime) -> Self {
        Self {
            session: ChatSession::with_greeting(greeting, now),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ChatUi {
    page: ChatUiState,
    side: ChatUiState,
    quick: ChatUiState,
    side_focused: bool,
}

impl ChatUi {
    const fn focused_surface(&self) -> Surface {
        if self.side_focused {
            Surface::SidePanel
        } else {
            Surface::AssistantPage
        }
    }

    fn surface(&self, surface: Surface) -> &ChatUiState {
        match surface {
            Surface::QuickPanel => &self.quick,
            Surface::AssistantPage => &self.page,
            Surface::SidePanel => &self.side,
        }
    }

    fn surface_mut(&mut self, surface: Surface) -> &mut ChatUiState {
        match surface {
            Surface::QuickPanel => &mut self.quick,
            Surface::AssistantPage => &mut self.page,
            Surface::SidePanel => &mut self.side,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TableUiState {
    query: TableQuery,
    cursor: usize,
    column: usize,
    selected: BTreeSet<FloatId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct MapUiState {
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfilesUiState {
    cursor: usize,
    selected: BTreeSet<FloatId>,
    parameter: ProfileParameter,
}

impl Default for ProfilesUiState {
    fn default() -> Self {
        Self {
            cursor: 0,
            selected: BTreeSet::new(),
            parameter: ProfileParameter::Temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterRow {
    LatMin,
    LatMax,
    LngMin,
    LngMax,
    DepthMin,
    DepthMax,
    DateStart,
    DateEnd,
    Param(ParamCode),
    Trajectory,
    Adjusted,
    QcFilter,
    BgcOnly,
    MapMode,
}

const FILTER_ROWS: [FilterRow; 20] = [
    FilterRow::LatMin,
    FilterRow::LatMax,
    FilterRow::LngMin,
    FilterRow::LngMax,
    FilterRow::DepthMin,
    FilterRow::DepthMax,
    FilterRow::DateStart,
    FilterRow::DateEnd,
    FilterRow::Param(ParamCode::Temp),
    FilterRow::Param(ParamCode::Psal),
    FilterRow::Param(ParamCode::Pres),
    FilterRow::Param(ParamCode::Doxy),
    FilterRow::Param(ParamCode::Chla),
    FilterRow::Param(ParamCode::Bbp),
    FilterRow::Param(ParamCode::Cdom),
    FilterRow::Trajectory,
    FilterRow::Adjusted,
    FilterRow::QcFilter,
    FilterRow::BgcOnly,
    FilterRow::MapMode,
];

#[derive(Debug)]
struct ViewData {
    dataset: Dataset,
    filters: FilterStore,
    filters_dirty: Rc<FlagCell<bool>>,
    chat: ChatUi,
    table: TableUiState,
    map: MapUiState,
    profiles: ProfilesUiState,
    filter_cursor: usize,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new<R: AppRuntime>(runtime: &R) -> Self {
        let now = runtime.now();
        let mut filters = FilterStore::new(runtime.startup_filters());
        let filters_dirty = Rc::new(FlagCell::new(false));
        let flag = Rc::clone(&filters_dirty);
        filters.subscribe(Box::new(move |_: &FilterState| flag.set(true)));

        let mut view_data = Self {
            dataset: runtime.dataset().clone(),
            filters,
            filters_dirty,
            chat: ChatUi {
                page: ChatUiState::greeted(runtime.greeting(Surface::AssistantPage), now),
                side: ChatUiState::greeted(runtime.greeting(Surface::SidePanel), now),
                quick: ChatUiState::greeted(runtime.greeting(Surface::QuickPanel), now),
                side_focused: false,
            },
            table: TableUiState {
                query: TableQuery {
                    page: 1,
                    page_size: runtime.page_size(),
                    ..TableQuery::default()
                },
                ..TableUiState::default()
            },
            map: MapUiState::default(),
            profiles: ProfilesUiState::default(),
            filter_cursor: 0,
            help_visible: false,
            status_token: 0,
        };
        for surface in Surface::ALL {
            refresh_completions(runtime, &mut view_data, surface);
        }
        view_data
    }

    fn table_result(&self) -> TableResult {
        self.table
            .query
            .run(self.dataset.floats(), self.filters.filters())
    }

    fn map_records(&self) -> Vec<FloatRecord> {
        filter_records(
            self.dataset.floats(),
            self.filters.filters(),
            FilterScope::MAP,
            "",
        )
    }

    fn visible_profiles(&self) -> Vec<Profile> {
        profiles_in_scope(
            self.dataset.profiles(),
            self.dataset.floats(),
            self.filters.filters(),
        )
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(runtime);
    let (internal_tx, internal_rx) = mpsc::channel();
    info!(
        view = state.active_view.label(),
        floats = view_data.dataset.floats().len(),
        "ui started"
    );

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(state, runtime, view_data, event);
    }
}

fn handle_internal_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    event: InternalEvent,
) {
    match event {
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            state.dispatch(AppCommand::ClearStatus);
        }
        InternalEvent::ClearStatus { .. } => {}
        InternalEvent::AssistantReply {
            surface,
            request_id,
            reply,
        } => {
            let now = runtime.now();
            let chat = view_data.chat.surface_mut(surface);
            if chat.session.complete(request_id, reply, now) {
                info!(
                    surface = surface.label(),
                    request_id = request_id.get(),
                    "assistant reply delivered"
                );
                refresh_completions(runtime, view_data, surface);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Dispatch `command`, arming the status clear when it left a message.
fn dispatch_with_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

/// Reset paging and cursors after any filter store update.
fn sync_filters(view_data: &mut ViewData) {
    if !view_data.filters_dirty.replace(false) {
        return;
    }
    view_data.table.query.page = 1;
    view_data.table.cursor = 0;
    let mapped = view_data.map_records().len();
    view_data.map.cursor = view_data.map.cursor.min(mapped.saturating_sub(1));
    let profiles = view_data.visible_profiles().len();
    view_data.profiles.cursor = view_data.profiles.cursor.min(profiles.saturating_sub(1));
}

fn refresh_completions<R: AppRuntime>(runtime: &R, view_data: &mut ViewData, surface: Surface) {
    let chat = view_data.chat.surface_mut(surface);
    let follow_ups = chat
        .session
        .messages()
        .last()
        .filter(|message| message.role == ChatRole::Assistant)
        .map(|message| message.suggestions.clone())
        .unwrap_or_default();
    chat.completions = if chat.input.trim().is_empty() && !follow_ups.is_empty() {
        follow_ups
    } else {
        runtime.suggest_completions(surface, &chat.input)
    };
    chat.completion_cursor = 0;
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    let quit = if state.quick_chat == PanelVisibility::Visible {
        handle_compose_key(
            state,
            runtime,
            view_data,
            internal_tx,
            Surface::QuickPanel,
            key,
        );
        false
    } else {
        match state.mode {
            AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
            AppMode::Search => {
                handle_search_key(state, view_data, internal_tx, key);
                false
            }
            AppMode::Compose => {
                let surface = view_data.chat.focused_surface();
                handle_compose_key(state, runtime, view_data, internal_tx, surface, key);
                false
            }
            AppMode::Filters => {
                handle_filter_panel_key(state, view_data, internal_tx, key);
                false
            }
        }
    };
    sync_filters(view_data);
    quit
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Tab => {
            state.dispatch(AppCommand::NextView);
        }
        KeyCode::BackTab => {
            state.dispatch(AppCommand::PrevView);
        }
        KeyCode::Char(digit @ '1'..='4') => {
            let index = usize::from(digit as u8 - b'1');
            if let Some(view) = ViewKind::ALL.get(index) {
                state.dispatch(AppCommand::SelectView(*view));
            }
        }
        KeyCode::Char('?') => {
            view_data.help_visible = true;
        }
        KeyCode::Char('f') => {
            dispatch_with_status(state, view_data, internal_tx, AppCommand::OpenFilters);
        }
        KeyCode::Char('@') => {
            if state.active_view == ViewKind::Chat {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    "quick query opens from data views",
                );
            } else {
                dispatch_with_status(state, view_data, internal_tx, AppCommand::OpenQuickChat);
                refresh_completions(runtime, view_data, Surface::QuickPanel);
            }
        }
        _ => match state.active_view {
            ViewKind::Chat => handle_chat_view_key(state, view_data, internal_tx, key),
            ViewKind::Map => handle_map_key(state, view_data, internal_tx, key),
            ViewKind::Profiles => handle_profiles_key(state, view_data, internal_tx, key),
            ViewKind::Table => handle_table_key(state, runtime, view_data, internal_tx, key),
        },
    }
    false
}

fn handle_chat_view_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            state.dispatch(AppCommand::StartCompose);
        }
        KeyCode::Char('s') => {
            view_data.chat.side_focused = !view_data.chat.side_focused;
            let message = format!("{} focused", view_data.chat.focused_surface().label());
            emit_status(state, view_data, internal_tx, message);
        }
        _ => {}
    }
}

fn handle_compose_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    surface: Surface,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            let command = if surface == Surface::QuickPanel {
                AppCommand::CloseQuickChat
            } else {
                AppCommand::ExitToNav
            };
            dispatch_with_status(state, view_data, internal_tx, command);
        }
        KeyCode::Enter => submit_chat(state, runtime, view_data, internal_tx, surface),
        KeyCode::Backspace => {
            view_data.chat.surface_mut(surface).input.pop();
            refresh_completions(runtime, view_data, surface);
        }
        KeyCode::Up => {
            let chat = view_data.chat.surface_mut(surface);
            chat.completion_cursor = chat.completion_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            let chat = view_data.chat.surface_mut(surface);
            chat.completion_cursor =
                (chat.completion_cursor + 1).min(chat.completions.len().saturating_sub(1));
        }
        KeyCode::Tab => {
            let chat = view_data.chat.surface_mut(surface);
            if let Some(completion) = chat.completions.get(chat.completion_cursor).cloned() {
                chat.input = completion;
                refresh_completions(runtime, view_data, surface);
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.chat.surface_mut(surface).input.push(ch);
            refresh_completions(runtime, view_data, surface);
        }
        _ => {}
    }
}

fn submit_chat<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    surface: Surface,
) {
    let now = runtime.now();
    let chat = view_data.chat.surface_mut(surface);
    let outcome = chat.session.submit(&chat.input, now);
    let pending = match outcome {
        SubmitOutcome::Ignored => return,
        SubmitOutcome::Busy => {
            emit_status(state, view_data, internal_tx, "still waiting for a reply");
            return;
        }
        SubmitOutcome::Sent(pending) => pending,
    };
    chat.input.clear();

    let reply = runtime.reply(surface, &pending.query);
    let delay = runtime.reply_delay(surface);
    info!(
        surface = surface.label(),
        request_id = pending.request_id.get(),
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "assistant reply scheduled"
    );
    if let Err(error) = runtime.spawn_reply(
        surface,
        pending.request_id,
        reply,
        delay,
        internal_tx.clone(),
    ) {
        warn!(error = %error, "reply scheduling failed");
        let failure = AssistantReply {
            content: format!("Unable to schedule a reply: {error:#}"),
            suggestions: Vec::new(),
        };
        view_data
            .chat
            .surface_mut(surface)
            .session
            .complete(pending.request_id, failure, now);
        emit_status(state, view_data, internal_tx, "reply failed");
    }
    refresh_completions(runtime, view_data, surface);
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let table = &mut view_data.table;
    match key.code {
        KeyCode::Enter => {
            dispatch_with_status(state, view_data, internal_tx, AppCommand::ExitToNav);
            return;
        }
        KeyCode::Esc => {
            table.query.search.clear();
            table.query.page = 1;
            table.cursor = 0;
            dispatch_with_status(state, view_data, internal_tx, AppCommand::ExitToNav);
            return;
        }
        KeyCode::Backspace => {
            table.query.search.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            table.query.search.push(ch);
        }
        _ => return,
    }
    table.query.page = 1;
    table.cursor = 0;
}

fn handle_map_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let count = view_data.map_records().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.map.cursor = (view_data.map.cursor + 1).min(count.saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.map.cursor = view_data.map.cursor.saturating_sub(1);
        }
        KeyCode::Char('m') => {
            let mode = view_data.filters.filters().map_mode.toggled();
            view_data.filters.update(FilterUpdate::map_mode(mode));
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("map mode {}", mode.as_str()),
            );
        }
        KeyCode::Char('t') => {
            toggle_filter(&mut view_data.filters, FilterRow::Trajectory);
            let message = if view_data.filters.filters().float_options.trajectory {
                "trajectories on"
            } else {
                "trajectories off"
            };
            emit_status(state, view_data, internal_tx, message);
        }
        _ => {}
    }
}

fn handle_profiles_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let profiles = view_data.visible_profiles();
    let ui = &mut view_data.profiles;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            ui.cursor = (ui.cursor + 1).min(profiles.len().saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ui.cursor = ui.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(profile) = profiles.get(ui.cursor) {
                if !ui.selected.remove(&profile.float_id) {
                    ui.selected.insert(profile.float_id);
                }
            }
        }
        KeyCode::Char('p') => {
            ui.parameter = ui.parameter.next();
            let message = format!("parameter {}", ui.parameter.label());
            emit_status(state, view_data, internal_tx, message);
        }
        _ => {}
    }
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let result = view_data.table_result();
    let rows = result.page.rows.len();
    let table = &mut view_data.table;
    let mut status = None;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            table.cursor = (table.cursor + 1).min(rows.saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            table.cursor = table.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            table.column = table.column.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            table.column = (table.column + 1).min(TABLE_COLUMNS.len() - 1);
        }
        KeyCode::Char('s') => {
            let column = TABLE_COLUMNS[table.column.min(TABLE_COLUMNS.len() - 1)];
            table.query.sort = table.query.sort.toggled(column);
            table.query.page = 1;
            table.cursor = 0;
            status = Some(format!(
                "sorted by {} {}",
                column.label(),
                table.query.sort.direction.as_str()
            ));
        }
        KeyCode::Char(']') | KeyCode::PageDown => {
            table.query.page = clamp_page(
                result.page.page + 1,
                result.page.total_rows,
                table.query.page_size,
            );
            table.cursor = 0;
        }
        KeyCode::Char('[') | KeyCode::PageUp => {
            table.query.page = result.page.page.saturating_sub(1).max(1);
            table.cursor = 0;
        }
        KeyCode::Char('p') => {
            table.query.page_size = table.query.page_size.next();
            table.query.page = 1;
            table.cursor = 0;
            status = Some(format!("{} rows per page", table.query.page_size.get()));
        }
        KeyCode::Char(' ') => {
            if let Some(record) = result.page.rows.get(table.cursor) {
                if !table.selected.remove(&record.id) {
                    table.selected.insert(record.id);
                }
            }
        }
        KeyCode::Char('a') => {
            let page_ids: Vec<FloatId> = result.page.rows.iter().map(|row| row.id).collect();
            if page_ids.iter().all(|id| table.selected.contains(id)) {
                for id in &page_ids {
                    table.selected.remove(id);
                }
            } else {
                table.selected.extend(page_ids);
            }
        }
        KeyCode::Char('c') => {
            table.selected.clear();
            status = Some("selection cleared".to_owned());
        }
        KeyCode::Char('x') => {
            let rows = export_selection(&result.filtered, &table.selected);
            status = Some(match runtime.export_rows(&rows) {
                Ok(path) => format!("exported {} rows to {}", rows.len(), path.display()),
                Err(error) => {
                    warn!(error = %error, "export failed");
                    format!("export failed: {error:#}")
                }
            });
        }
        KeyCode::Char('/') => {
            state.dispatch(AppCommand::StartSearch);
        }
        _ => {}
    }
    if let Some(message) = status {
        emit_status(state, view_data, internal_tx, message);
    }
}

fn handle_filter_panel_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let row = FILTER_ROWS[view_data.filter_cursor.min(FILTER_ROWS.len() - 1)];
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') => {
            dispatch_with_status(state, view_data, internal_tx, AppCommand::ExitToNav);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.filter_cursor = (view_data.filter_cursor + 1).min(FILTER_ROWS.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.filter_cursor = view_data.filter_cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => adjust_filter(&mut view_data.filters, row, -1),
        KeyCode::Char('l') | KeyCode::Right => adjust_filter(&mut view_data.filters, row, 1),
        KeyCode::Char(' ') | KeyCode::Enter => toggle_filter(&mut view_data.filters, row),
        KeyCode::Char('r') => {
            view_data.filters.update(reset_update(&FilterState::default()));
            emit_status(state, view_data, internal_tx, "filters reset");
        }
        _ => {}
    }
}

fn nudge_min(bounds: Bounds, delta: f64, limit: Bounds) -> Bounds {
    let min = (bounds.min + delta).max(limit.min).min(bounds.max);
    Bounds::new(min, bounds.max)
}

fn nudge_max(bounds: Bounds, delta: f64, limit: Bounds) -> Bounds {
    let max = (bounds.max + delta).min(limit.max).max(bounds.min);
    Bounds::new(bounds.min, max)
}

fn adjust_filter(store: &mut FilterStore, row: FilterRow, step: i32) {
    let current = store.filters();
    let delta = f64::from(step);
    let range = current.date_range;
    let update = match row {
        FilterRow::LatMin => {
            FilterUpdate::latitude(nudge_min(current.latitude, delta * LAT_STEP, LAT_LIMIT))
        }
        FilterRow::LatMax => {
            FilterUpdate::latitude(nudge_max(current.latitude, delta * LAT_STEP, LAT_LIMIT))
        }
        FilterRow::LngMin => {
            FilterUpdate::longitude(nudge_min(current.longitude, delta * LNG_STEP, LNG_LIMIT))
        }
        FilterRow::LngMax => {
            FilterUpdate::longitude(nudge_max(current.longitude, delta * LNG_STEP, LNG_LIMIT))
        }
        FilterRow::DepthMin => FilterUpdate::depth_range(nudge_min(
            current.depth_range,
            delta * DEPTH_STEP,
            DEPTH_LIMIT,
        )),
        FilterRow::DepthMax => FilterUpdate::depth_range(nudge_max(
            current.depth_range,
            delta * DEPTH_STEP,
            DEPTH_LIMIT,
        )),
        FilterRow::DateStart => FilterUpdate::date_range(DateRangePatch {
            start: Some(range.start.shifted(step).min(range.end)),
            end: None,
        }),
        FilterRow::DateEnd => FilterUpdate::date_range(DateRangePatch {
            start: None,
            end: Some(range.end.shifted(step).max(range.start)),
        }),
        FilterRow::Param(_)
        | FilterRow::Trajectory
        | FilterRow::Adjusted
        | FilterRow::QcFilter
        | FilterRow::BgcOnly
        | FilterRow::MapMode => {
            toggle_filter(store, row);
            return;
        }
    };
    store.update(update);
}

fn toggle_filter(store: &mut FilterStore, row: FilterRow) {
    let current = store.filters();
    let options = current.float_options;
    let update = match row {
        FilterRow::Param(code) => FilterUpdate::selected_params(current.params_toggling(code)),
        FilterRow::Trajectory => FilterUpdate::float_options(FloatOptionsPatch {
            trajectory: Some(!options.trajectory),
            ..FloatOptionsPatch::default()
        }),
        FilterRow::Adjusted => FilterUpdate::float_options(FloatOptionsPatch {
            adjusted: Some(!options.adjusted),
            ..FloatOptionsPatch::default()
        }),
        FilterRow::QcFilter => FilterUpdate::float_options(FloatOptionsPatch {
            qc_filter: Some(!options.qc_filter),
            ..FloatOptionsPatch::default()
        }),
        FilterRow::BgcOnly => FilterUpdate::float_options(FloatOptionsPatch {
            bgc_only: Some(!options.bgc_only),
            ..FloatOptionsPatch::default()
        }),
        FilterRow::MapMode => FilterUpdate::map_mode(current.map_mode.toggled()),
        _ => return,
    };
    store.update(update);
}

fn reset_update(defaults: &FilterState) -> FilterUpdate {
    let options = defaults.float_options;
    FilterUpdate {
        date_range: Some(DateRangePatch {
            start: Some(defaults.date_range.start),
            end: Some(defaults.date_range.end),
        }),
        latitude: Some(defaults.latitude),
        longitude: Some(defaults.longitude),
        depth_range: Some(defaults.depth_range),
        selected_params: Some(defaults.selected_params.clone()),
        float_options: Some(FloatOptionsPatch {
            trajectory: Some(options.trajectory),
            adjusted: Some(options.adjusted),
            qc_filter: Some(options.qc_filter),
            bgc_only: Some(options.bgc_only),
        }),
        map_mode: Some(defaults.map_mode),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = ViewKind::ALL
        .iter()
        .position(|view| *view == state.active_view)
        .unwrap_or(0);
    let titles = ViewKind::ALL
        .iter()
        .enumerate()
        .map(|(index, view)| format!("{} {}", index + 1, view.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("floatchat").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.active_view {
        ViewKind::Chat => render_chat_view(frame, layout[1], state, view_data),
        ViewKind::Map => {
            let body = Paragraph::new(map_view_text(view_data))
                .block(Block::default().borders(Borders::ALL).title("map"));
            frame.render_widget(body, layout[1]);
        }
        ViewKind::Profiles => {
            let body = Paragraph::new(profiles_view_text(view_data))
                .block(Block::default().borders(Borders::ALL).title("profiles"));
            frame.render_widget(body, layout[1]);
        }
        ViewKind::Table => render_table(frame, layout[1], view_data),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_widget, layout[2]);

    if state.mode == AppMode::Filters {
        let area = centered_rect(56, 80, frame.area());
        frame.render_widget(Clear, area);
        let panel = Paragraph::new(filter_panel_text(
            view_data.filters.filters(),
            view_data.filter_cursor,
        ))
        .block(Block::default().title("filters").borders(Borders::ALL));
        frame.render_widget(panel, area);
    }

    if state.quick_chat == PanelVisibility::Visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let quick = Paragraph::new(chat_transcript_text(&view_data.chat.quick, true))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(Surface::QuickPanel.label())
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(quick, area);
    }

    if view_data.help_visible {
        let area = centered_rect(76, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_chat_view(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);
    let composing = state.mode == AppMode::Compose && state.quick_chat == PanelVisibility::Hidden;
    let focused = view_data.chat.focused_surface();

    for (surface, column) in [
        (Surface::AssistantPage, columns[0]),
        (Surface::SidePanel, columns[1]),
    ] {
        let has_focus = surface == focused;
        let title = if has_focus {
            format!("{} *", surface.label())
        } else {
            surface.label().to_owned()
        };
        let border = if has_focus { Color::Cyan } else { Color::DarkGray };
        let body = Paragraph::new(chat_transcript_text(
            view_data.chat.surface(surface),
            composing && has_focus,
        ))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(body, column);
    }
}

fn clock(timestamp: OffsetDateTime) -> String {
    timestamp.format(CLOCK).unwrap_or_default()
}

fn chat_transcript_text(chat: &ChatUiState, composing: bool) -> String {
    let mut lines = Vec::new();
    let messages = chat.session.messages();
    let keep = messages.len().saturating_sub(MESSAGE_KEEP);
    for message in messages.iter().skip(keep) {
        let label = match message.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "floatchat",
        };
        lines.push(format!("{label} {}", clock(message.timestamp)));
        for line in message.content.lines() {
            lines.push(format!("  {line}"));
        }
        for suggestion in &message.suggestions {
            lines.push(format!("  → {suggestion}"));
        }
        lines.push(String::new());
    }

    if chat.session.is_pending() {
        lines.push("floatchat is analyzing your query...".to_owned());
        lines.push(String::new());
    }

    let cursor = if composing { "_" } else { "" };
    lines.push(format!("> {}{cursor}", chat.input));
    if composing {
        for (index, completion) in chat.completions.iter().enumerate() {
            let prefix = if index == chat.completion_cursor {
                "› "
            } else {
                "  "
            };
            lines.push(format!("{prefix}{completion}"));
        }
    }
    lines.join("\n")
}

fn filter_summary(filters: &FilterState) -> String {
    let params = filters
        .selected_params
        .iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "lat {} | lng {} | depth {} m | {} to {} | {}",
        filters.latitude,
        filters.longitude,
        filters.depth_range,
        filters.date_range.start,
        filters.date_range.end,
        if params.is_empty() {
            "no params"
        } else {
            params.as_str()
        }
    )
}

fn plot_cell(lat: f64, lng: f64) -> (usize, usize) {
    let col = ((lng.clamp(-180.0, 180.0) + 180.0) / 360.0 * (PLOT_WIDTH - 1) as f64).round();
    let row = ((90.0 - lat.clamp(-90.0, 90.0)) / 180.0 * (PLOT_HEIGHT - 1) as f64).round();
    (row as usize, col as usize)
}

/// Equirectangular text plot: `o` floats, `@` the selected one, `+` its
/// trajectory points.
fn map_plot_lines(
    records: &[FloatRecord],
    selected: Option<FloatId>,
    trajectory: bool,
) -> Vec<String> {
    let mut grid = vec![vec!['.'; PLOT_WIDTH]; PLOT_HEIGHT];
    if trajectory {
        for record in records.iter().filter(|record| Some(record.id) == selected) {
            for point in &record.trajectory {
                let (row, col) = plot_cell(point.lat, point.lng);
                grid[row][col] = '+';
            }
        }
    }
    for record in records {
        let (row, col) = plot_cell(record.lat, record.lng);
        grid[row][col] = if Some(record.id) == selected { '@' } else { 'o' };
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn map_view_text(view_data: &ViewData) -> String {
    let filters = view_data.filters.filters();
    let records = view_data.map_records();
    let cursor = view_data.map.cursor.min(records.len().saturating_sub(1));
    let selected = records.get(cursor);
    let trajectory = filters.float_options.trajectory;
    let counts = FleetCounts::from_rows(&records);

    let mut lines = vec![
        format!(
            "{} | {} floats in view | trajectories {}",
            match filters.map_mode {
                MapMode::Flat => "2d map",
                MapMode::Globe => "3d globe",
            },
            records.len(),
            if trajectory { "on" } else { "off" }
        ),
        format!(
            "legend: {} active | {} inactive | {} bgc",
            counts.active, counts.inactive, counts.bgc
        ),
        filter_summary(filters),
        String::new(),
    ];
    lines.extend(map_plot_lines(
        &records,
        selected.map(|record| record.id),
        trajectory,
    ));
    lines.push(String::new());

    if records.is_empty() {
        lines.push("No floats match the current filters.".to_owned());
    }
    for (index, record) in records.iter().enumerate() {
        let prefix = if index == cursor { "> " } else { "  " };
        lines.push(format!(
            "{prefix}{}  {:>7.2},{:>8.2}  {:>5.0} m  {:>5.1}°C  {:<12}  {:<8}  {}",
            record.id,
            record.lat,
            record.lng,
            record.depth,
            record.temperature,
            record.qc.as_str(),
            record.status.as_str(),
            record.region
        ));
    }

    if let Some(record) = selected.filter(|_| trajectory) {
        lines.push(String::new());
        lines.push(format!(
            "trajectory {} ({} points)",
            record.id,
            record.trajectory.len()
        ));
        for point in &record.trajectory {
            lines.push(format!(
                "  {}  {:>7.2},{:>8.2}  {:>5.1}°C  {:>5.0} m",
                point.date, point.lat, point.lng, point.temperature, point.depth
            ));
        }
    }
    lines.join("\n")
}

fn profile_bar(value: f64, range: (f64, f64)) -> String {
    let (min, max) = range;
    let span = max - min;
    let fraction = if span > 0.0 {
        (value - min) / span
    } else {
        1.0
    };
    let width = (fraction * PROFILE_BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(width.min(PROFILE_BAR_WIDTH))
}

fn profiles_view_text(view_data: &ViewData) -> String {
    let ui = &view_data.profiles;
    let profiles = view_data.visible_profiles();
    let parameter = ui.parameter;
    let mut lines = vec![
        format!(
            "parameter: {} ({}) | {} profiles",
            parameter.label(),
            parameter.unit(),
            profiles.len()
        ),
        filter_summary(view_data.filters.filters()),
        String::new(),
    ];

    if profiles.is_empty() {
        lines.push("No profiles match the current filters.".to_owned());
        return lines.join("\n");
    }

    let cursor = ui.cursor.min(profiles.len() - 1);
    for (index, profile) in profiles.iter().enumerate() {
        let prefix = if index == cursor { "> " } else { "  " };
        let mark = if ui.selected.contains(&profile.float_id) {
            "x"
        } else {
            " "
        };
        lines.push(format!(
            "{prefix}[{mark}] {}  {:<16}  {}  {} levels",
            profile.float_id,
            profile.region,
            profile.date,
            profile.levels.len()
        ));
    }

    let shown: Vec<&Profile> = if ui.selected.is_empty() {
        profiles.get(cursor).into_iter().collect()
    } else {
        profiles
            .iter()
            .filter(|profile| ui.selected.contains(&profile.float_id))
            .collect()
    };
    for profile in shown {
        lines.push(String::new());
        lines.push(format!("{} {}", profile.float_id, parameter.label()));
        let Some(stats) = profile.stats(parameter) else {
            lines.push("  no levels inside the depth range".to_owned());
            continue;
        };
        lines.push(format!(
            "  avg {:.2} {unit} | range {:.2} - {:.2} | max depth {:.0} m",
            stats.mean,
            stats.min,
            stats.max,
            stats.max_depth,
            unit = parameter.unit()
        ));
        let range = (stats.min, stats.max);
        for level in &profile.levels {
            let value = level.value(parameter);
            lines.push(format!(
                "  {:>5.0} m  {:>8.2}  {}",
                level.depth,
                value,
                profile_bar(value, range)
            ));
        }
    }
    lines.join("\n")
}

fn cell_text(record: &FloatRecord, key: SortKey) -> String {
    match key {
        SortKey::Id => record.id.to_string(),
        SortKey::Date => record.date.to_string(),
        SortKey::Lat => format!("{:.2}", record.lat),
        SortKey::Lng => format!("{:.2}", record.lng),
        SortKey::Depth => format!("{:.0}", record.depth),
        SortKey::Temperature => format!("{:.1}", record.temperature),
        SortKey::Salinity => format!("{:.2}", record.salinity),
        SortKey::Pressure => format!("{:.0}", record.pressure),
        SortKey::Oxygen => record
            .oxygen
            .map(|value| format!("{value:.1}"))
            .unwrap_or_default(),
        SortKey::Chlorophyll => record
            .chlorophyll
            .map(|value| format!("{value:.2}"))
            .unwrap_or_default(),
        SortKey::Status => record.status.as_str().to_owned(),
        SortKey::Qc => record.qc.as_str().to_owned(),
        SortKey::Platform => record.platform.clone(),
        SortKey::Region => record.region.clone(),
        SortKey::Cycle => record.cycle.to_string(),
        SortKey::Battery => format!("{}%", record.battery),
    }
}

fn header_label(key: SortKey, query: &TableQuery) -> String {
    if query.sort.key != key {
        return key.label().to_owned();
    }
    let arrow = match query.sort.direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    };
    format!("{} {arrow}", key.label())
}

fn table_title(result: &TableResult, table: &TableUiState) -> String {
    let page = &result.page;
    let mut title = format!(
        "floats {}-{} of {} | page {}/{} | {} per page | {} selected",
        page.first_row(),
        page.last_row(),
        page.total_rows,
        page.page,
        page.total_pages,
        page.page_size.get(),
        table.selected.len()
    );
    if !table.query.search.is_empty() {
        title.push_str(&format!(" | search: {}", table.query.search));
    }
    title
}

/// Insights over every filtered row, not just the visible page.
fn table_insights_text(rows: &[FloatRecord]) -> String {
    let insights = TableInsights::from_rows(rows);
    let missing = || "-".to_owned();
    format!(
        "{} active of {} | avg temp {} ({}) | avg salinity {} | good qc {} ({:.0}%) | max depth {}",
        insights.active,
        insights.rows,
        insights
            .mean_temperature
            .map_or_else(missing, |value| format!("{value:.1}°C")),
        insights
            .temperature_range
            .map_or_else(missing, |(low, high)| format!("{low:.1} to {high:.1}°C")),
        insights
            .mean_salinity
            .map_or_else(missing, |value| format!("{value:.2} PSU")),
        insights.good_qc,
        insights.good_qc_percent(),
        insights
            .max_depth
            .map_or_else(missing, |value| format!("{value:.0} m")),
    )
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let table_ui = &view_data.table;
    let result = view_data.table_result();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(TABLE_COLUMNS.iter().map(|_| Constraint::Min(7)));

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(TABLE_COLUMNS.iter().enumerate().map(|(index, key)| {
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if index == table_ui.column {
            style = style.fg(Color::Cyan);
        }
        Cell::from(header_label(*key, &table_ui.query)).style(style)
    }));
    let header = Row::new(header_cells);

    let rows = result.page.rows.iter().enumerate().map(|(index, record)| {
        let mark = if table_ui.selected.contains(&record.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut cells = vec![Cell::from(mark)];
        cells.extend(
            TABLE_COLUMNS
                .iter()
                .map(|key| Cell::from(cell_text(record, *key))),
        );
        let style = if index == table_ui.cursor {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(&result, table_ui))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, layout[0]);

    let insights = Paragraph::new(table_insights_text(&result.filtered))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("insights").borders(Borders::ALL));
    frame.render_widget(insights, layout[1]);
}

fn filter_row_text(row: FilterRow, filters: &FilterState) -> String {
    let check = |on: bool| if on { "x" } else { " " };
    let options = filters.float_options;
    match row {
        FilterRow::LatMin => format!("latitude min    {:>7.1}", filters.latitude.min),
        FilterRow::LatMax => format!("latitude max    {:>7.1}", filters.latitude.max),
        FilterRow::LngMin => format!("longitude min   {:>7.1}", filters.longitude.min),
        FilterRow::LngMax => format!("longitude max   {:>7.1}", filters.longitude.max),
        FilterRow::DepthMin => format!("depth min       {:>7.0} m", filters.depth_range.min),
        FilterRow::DepthMax => format!("depth max       {:>7.0} m", filters.depth_range.max),
        FilterRow::DateStart => format!("date start      {}", filters.date_range.start),
        FilterRow::DateEnd => format!("date end        {}", filters.date_range.end),
        FilterRow::Param(code) => format!(
            "[{}] {:<5} {}",
            check(filters.selected_params.contains(&code)),
            code.as_str(),
            code.label()
        ),
        FilterRow::Trajectory => format!("[{}] show trajectories", check(options.trajectory)),
        FilterRow::Adjusted => format!("[{}] adjusted values", check(options.adjusted)),
        FilterRow::QcFilter => format!("[{}] good QC only", check(options.qc_filter)),
        FilterRow::BgcOnly => format!("[{}] BGC floats only", check(options.bgc_only)),
        FilterRow::MapMode => format!("map mode        {}", filters.map_mode.as_str()),
    }
}

fn filter_panel_text(filters: &FilterState, cursor: usize) -> String {
    let mut lines = FILTER_ROWS
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let prefix = if index == cursor { "> " } else { "  " };
            format!("{prefix}{}", filter_row_text(*row, filters))
        })
        .collect::<Vec<String>>();
    lines.push(String::new());
    lines.push("j/k move | h/l adjust | space toggle | r reset | esc close".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | tab/shift+tab views | 1-4 jump | f filters | @ quick query | ? help\n\
chat: i compose | s switch assistant/side panel\n\
compose: enter send | up/down pick suggestion | tab fill suggestion | esc close\n\
map: j/k float | m 2d/3d | t trajectories\n\
profiles: j/k profile | space select | p parameter\n\
table: j/k row | h/l column | s sort | [/] page | p page size | space select | a select page\n\
table: c clear selection | x export csv | / search (enter keep, esc clear)\n\
filters: j/k move | h/l adjust | space toggle | r reset | esc close"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let mode = match state.mode {
        AppMode::Nav => "NAV",
        AppMode::Search => "SEARCH",
        AppMode::Compose => "COMPOSE",
        AppMode::Filters => "FILTERS",
    };
    let hints = if view_data.help_visible {
        "esc close help"
    } else {
        match (state.mode, state.active_view) {
            (AppMode::Search, _) => "type to search | enter keep | esc clear",
            (AppMode::Compose, _) => "enter send | tab fill | up/down pick | esc close",
            (AppMode::Filters, _) => "j/k move | h/l adjust | space toggle | esc close",
            (AppMode::Nav, ViewKind::Chat) => "i compose | s switch panel | tab views | ? help",
            (AppMode::Nav, ViewKind::Map) => "j/k float | m 2d/3d | t trails | @ ask | f filters",
            (AppMode::Nav, ViewKind::Profiles) => {
                "j/k profile | space select | p parameter | @ ask | f filters"
            }
            (AppMode::Nav, ViewKind::Table) => {
                "s sort | [/] page | space/a select | x export | / search | @ ask"
            }
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
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

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, FILTER_ROWS, FilterRow, InternalEvent, ViewData, emit_status,
        filter_panel_text, handle_internal_event, handle_key_event, map_plot_lines,
        map_view_text, process_internal_events, profiles_view_text, status_text,
        table_insights_text,
    };
    use anyhow::{Result, anyhow};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use floatchat_app::{
        AppMode, AppState, AssistantReply, FloatId, FloatRecord, MapMode, PageSize,
        PanelVisibility, ProfileParameter, QcFlag, RequestId, SortDirection, SortKey, ViewKind,
    };
    use floatchat_assistant::{Responder, Surface};
    use floatchat_data::{Dataset, write_export};
    use floatchat_testkit::{ScriptedSource, fixture_now, temp_export_dir};
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::time::Duration;
    use time::OffsetDateTime;
    use time::macros::date;

    #[derive(Debug)]
    struct TestRuntime {
        dataset: Dataset,
        quick: Responder,
        page: Responder,
        side: Responder,
        export_dir: PathBuf,
        exported: Vec<Vec<FloatId>>,
        hold_replies: bool,
        held: Vec<InternalEvent>,
    }

    impl TestRuntime {
        fn new(export_dir: PathBuf) -> Self {
            let scripted = |surface| Responder::new(surface, Box::new(ScriptedSource::constant(0.0)));
            Self {
                dataset: Dataset::builtin(),
                quick: scripted(Surface::QuickPanel),
                page: scripted(Surface::AssistantPage),
                side: scripted(Surface::SidePanel),
                export_dir,
                exported: Vec::new(),
                hold_replies: false,
                held: Vec::new(),
            }
        }

        fn responder(&self, surface: Surface) -> &Responder {
            match surface {
                Surface::QuickPanel => &self.quick,
                Surface::AssistantPage => &self.page,
                Surface::SidePanel => &self.side,
            }
        }

        fn responder_mut(&mut self, surface: Surface) -> &mut Responder {
            match surface {
                Surface::QuickPanel => &mut self.quick,
                Surface::AssistantPage => &mut self.page,
                Surface::SidePanel => &mut self.side,
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn dataset(&self) -> &Dataset {
            &self.dataset
        }

        fn greeting(&self, surface: Surface) -> AssistantReply {
            self.responder(surface).greeting()
        }

        fn reply(&mut self, surface: Surface, query: &str) -> AssistantReply {
            self.responder_mut(surface).reply(query)
        }

        fn reply_delay(&mut self, _surface: Surface) -> Duration {
            Duration::ZERO
        }

        fn suggest_completions(&self, surface: Surface, input: &str) -> Vec<String> {
            self.responder(surface)
                .suggest_completions(input)
                .into_iter()
                .map(str::to_owned)
                .collect()
        }

        fn export_rows(&mut self, rows: &[FloatRecord]) -> Result<PathBuf> {
            self.exported.push(rows.iter().map(|row| row.id).collect());
            write_export(&self.export_dir, date!(2024 - 01 - 15), rows)
        }

        fn now(&self) -> OffsetDateTime {
            fixture_now()
        }

        fn spawn_reply(
            &mut self,
            surface: Surface,
            request_id: RequestId,
            reply: AssistantReply,
            _delay: Duration,
            tx: Sender<InternalEvent>,
        ) -> Result<()> {
            let event = InternalEvent::AssistantReply {
                surface,
                request_id,
                reply,
            };
            if self.hold_replies {
                self.held.push(event);
                return Ok(());
            }
            tx.send(event)
                .map_err(|_| anyhow!("reply channel closed"))?;
            Ok(())
        }
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: Sender<InternalEvent>,
        rx: Receiver<InternalEvent>,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(view: ViewKind) -> Result<Self> {
            let (dir, export_dir) = temp_export_dir()?;
            let runtime = TestRuntime::new(export_dir);
            let view_data = ViewData::new(&runtime);
            let (tx, rx) = mpsc::channel();
            Ok(Self {
                state: AppState::starting_at(view),
                runtime,
                view_data,
                tx,
                rx,
                _dir: dir,
            })
        }

        fn press(&mut self, code: KeyCode) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, KeyModifiers::NONE),
            )
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn pump(&mut self) {
            process_internal_events(
                &mut self.state,
                &self.runtime,
                &mut self.view_data,
                &self.rx,
            );
        }

        fn table_ids(&self) -> Vec<i64> {
            self.view_data
                .table_result()
                .page
                .rows
                .iter()
                .map(|row| row.id.get())
                .collect()
        }
    }

    #[test]
    fn ctrl_q_quits_from_any_mode() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('/'));
        assert_eq!(harness.state.mode, AppMode::Search);
        let quit = handle_key_event(
            &mut harness.state,
            &mut harness.runtime,
            &mut harness.view_data,
            &harness.tx,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(quit);
        assert!(!harness.press(KeyCode::Char('q')), "plain q is typed");
        Ok(())
    }

    #[test]
    fn tab_and_digits_switch_views() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Chat)?;
        harness.press(KeyCode::Tab);
        assert_eq!(harness.state.active_view, ViewKind::Map);
        harness.press(KeyCode::BackTab);
        harness.press(KeyCode::BackTab);
        assert_eq!(harness.state.active_view, ViewKind::Table);
        harness.press(KeyCode::Char('3'));
        assert_eq!(harness.state.active_view, ViewKind::Profiles);
        Ok(())
    }

    #[test]
    fn sessions_open_with_greetings() -> Result<()> {
        let harness = Harness::new(ViewKind::Chat)?;
        let chat = &harness.view_data.chat;
        assert_eq!(chat.page.session.messages().len(), 1);
        assert_eq!(chat.side.session.messages().len(), 1);
        assert_eq!(chat.quick.session.messages().len(), 1);
        assert_eq!(chat.page.completions.len(), 4, "greeting suggestions");
        assert_eq!(chat.quick.completions.len(), 3, "example queries");
        Ok(())
    }

    #[test]
    fn quick_query_round_trip_from_map() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Map)?;
        harness.press(KeyCode::Char('@'));
        assert_eq!(harness.state.quick_chat, PanelVisibility::Visible);
        assert_eq!(harness.state.mode, AppMode::Compose);

        harness.type_text("Show me temperature profiles near the equator");
        harness.press(KeyCode::Enter);
        let quick = &harness.view_data.chat.quick;
        assert!(quick.session.is_pending());
        assert!(quick.input.is_empty());
        assert_eq!(quick.session.messages().len(), 2);

        harness.pump();
        let quick = &harness.view_data.chat.quick;
        assert!(!quick.session.is_pending());
        let messages = quick.session.messages();
        assert_eq!(messages.len(), 3);
        assert!(
            messages[2]
                .content
                .starts_with("🌊 **Temperature Analysis Near Equator**")
        );

        harness.press(KeyCode::Esc);
        assert_eq!(harness.state.quick_chat, PanelVisibility::Hidden);
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("quick query hidden")
        );
        Ok(())
    }

    #[test]
    fn quick_query_is_not_offered_on_chat_view() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Chat)?;
        harness.press(KeyCode::Char('@'));
        assert_eq!(harness.state.quick_chat, PanelVisibility::Hidden);
        assert!(
            harness
                .state
                .status_line
                .as_deref()
                .is_some_and(|status| status.contains("data views"))
        );
        Ok(())
    }

    #[test]
    fn pending_session_refuses_input_and_drops_duplicate_reply() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Chat)?;
        harness.runtime.hold_replies = true;
        harness.press(KeyCode::Char('i'));
        harness.type_text("salinity");
        harness.press(KeyCode::Enter);
        harness.type_text("oxygen");
        harness.press(KeyCode::Enter);

        let page = &harness.view_data.chat.page;
        assert_eq!(page.session.messages().len(), 2);
        assert_eq!(page.input, "oxygen", "refused input stays in the box");
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("still waiting for a reply")
        );

        let Some(event) = harness.runtime.held.pop() else {
            panic!("expected a held reply");
        };
        for _ in 0..2 {
            handle_internal_event(
                &mut harness.state,
                &harness.runtime,
                &mut harness.view_data,
                event.clone(),
            );
        }
        let messages = harness.view_data.chat.page.session.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages[2].content.starts_with("🧂 **Salinity Analysis Dashboard**"));
        Ok(())
    }

    #[test]
    fn side_panel_has_its_own_session() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Chat)?;
        harness.press(KeyCode::Char('s'));
        assert_eq!(
            harness.view_data.chat.focused_surface(),
            Surface::SidePanel
        );
        harness.press(KeyCode::Enter);
        harness.type_text("temperature");
        harness.press(KeyCode::Enter);
        harness.pump();

        assert_eq!(harness.view_data.chat.side.session.messages().len(), 3);
        assert_eq!(harness.view_data.chat.page.session.messages().len(), 1);
        Ok(())
    }

    #[test]
    fn completions_follow_typed_input() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('@'));
        harness.type_text("DEPTH");
        assert_eq!(
            harness.view_data.chat.quick.completions,
            vec!["salinity data above 500m depth", "Show only depth > 200m"]
        );
        harness.press(KeyCode::Down);
        harness.press(KeyCode::Tab);
        assert_eq!(harness.view_data.chat.quick.input, "Show only depth > 200m");
        Ok(())
    }

    #[test]
    fn filter_panel_nudges_and_toggles() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('f'));
        assert_eq!(harness.state.mode, AppMode::Filters);

        harness.press(KeyCode::Char('h'));
        assert_eq!(harness.view_data.filters.filters().latitude.min, -90.0);
        harness.press(KeyCode::Char('l'));
        assert_eq!(harness.view_data.filters.filters().latitude.min, -80.0);

        for _ in 0..5 {
            harness.press(KeyCode::Char('j'));
        }
        assert_eq!(FILTER_ROWS[harness.view_data.filter_cursor], FilterRow::DepthMax);
        harness.press(KeyCode::Char('h'));
        assert_eq!(harness.view_data.filters.filters().depth_range.max, 1900.0);

        let qc_row = FILTER_ROWS
            .iter()
            .position(|row| *row == FilterRow::QcFilter)
            .unwrap_or_default();
        harness.view_data.filter_cursor = qc_row;
        harness.press(KeyCode::Char(' '));
        assert!(harness.view_data.filters.filters().float_options.qc_filter);

        harness.press(KeyCode::Esc);
        assert_eq!(harness.state.mode, AppMode::Nav);
        let result = harness.view_data.table_result();
        assert_eq!(result.filtered.len(), 6);
        assert!(result.filtered.iter().all(|row| row.qc == QcFlag::Good));
        Ok(())
    }

    #[test]
    fn date_bounds_never_cross() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Map)?;
        harness.press(KeyCode::Char('f'));
        harness.view_data.filter_cursor = 6;
        for _ in 0..30 {
            harness.press(KeyCode::Char('l'));
        }
        let range = harness.view_data.filters.filters().date_range;
        assert_eq!(range.start, range.end);
        assert_eq!(range.end.to_string(), "2024-12");

        harness.press(KeyCode::Char('r'));
        let range = harness.view_data.filters.filters().date_range;
        assert_eq!(range.start.to_string(), "2023-01");
        Ok(())
    }

    #[test]
    fn filter_updates_reset_table_page() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.view_data.table.query.page_size = PageSize::Five;
        harness.press(KeyCode::Char(']'));
        assert_eq!(harness.view_data.table.query.page, 2);
        assert_eq!(harness.table_ids(), vec![5906303, 5906304]);

        harness.press(KeyCode::Char('f'));
        harness.view_data.filter_cursor = 18;
        harness.press(KeyCode::Char(' '));
        assert!(harness.view_data.filters.filters().float_options.bgc_only);
        assert_eq!(harness.view_data.table.query.page, 1);
        Ok(())
    }

    #[test]
    fn table_sort_select_and_export() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('s'));
        let sort = harness.view_data.table.query.sort;
        assert_eq!(sort.key, SortKey::Id);
        assert_eq!(sort.direction, SortDirection::Asc);
        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.table_ids()[0], 5906304);

        harness.press(KeyCode::Char(' '));
        harness.press(KeyCode::Char('j'));
        harness.press(KeyCode::Char(' '));
        harness.press(KeyCode::Char('x'));

        assert_eq!(
            harness.runtime.exported,
            vec![vec![FloatId::new(5906304), FloatId::new(5906303)]]
        );
        let status = harness.state.status_line.clone().unwrap_or_default();
        assert!(status.starts_with("exported 2 rows to "), "{status}");
        assert!(status.ends_with("argo_data_2024-01-15.csv"));
        Ok(())
    }

    #[test]
    fn export_without_selection_takes_every_filtered_row() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('/'));
        harness.type_text("north atlantic");
        harness.press(KeyCode::Enter);
        harness.press(KeyCode::Char('x'));
        assert_eq!(harness.runtime.exported[0].len(), 3);
        Ok(())
    }

    #[test]
    fn select_all_on_page_toggles() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.view_data.table.query.page_size = PageSize::Five;
        harness.press(KeyCode::Char('a'));
        assert_eq!(harness.view_data.table.selected.len(), 5);
        harness.press(KeyCode::Char(']'));
        harness.press(KeyCode::Char('a'));
        assert_eq!(harness.view_data.table.selected.len(), 7);
        harness.press(KeyCode::Char('a'));
        assert_eq!(harness.view_data.table.selected.len(), 5);
        Ok(())
    }

    #[test]
    fn search_filters_rows_and_escape_clears() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('/'));
        assert_eq!(harness.state.mode, AppMode::Search);
        harness.type_text("5906304");
        assert_eq!(harness.table_ids(), vec![5906304]);

        harness.press(KeyCode::Esc);
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.view_data.table.query.search.is_empty());
        assert_eq!(harness.table_ids().len(), 7);
        Ok(())
    }

    #[test]
    fn page_size_cycles() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Table)?;
        harness.press(KeyCode::Char('p'));
        assert_eq!(
            harness.view_data.table.query.page_size,
            PageSize::TwentyFive
        );
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("25 rows per page")
        );
        Ok(())
    }

    #[test]
    fn status_clear_respects_token() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Map)?;
        emit_status(
            &mut harness.state,
            &mut harness.view_data,
            &harness.tx,
            "first",
        );
        emit_status(
            &mut harness.state,
            &mut harness.view_data,
            &harness.tx,
            "second",
        );

        handle_internal_event(
            &mut harness.state,
            &harness.runtime,
            &mut harness.view_data,
            InternalEvent::ClearStatus { token: 1 },
        );
        assert_eq!(harness.state.status_line.as_deref(), Some("second"));

        handle_internal_event(
            &mut harness.state,
            &harness.runtime,
            &mut harness.view_data,
            InternalEvent::ClearStatus { token: 2 },
        );
        assert_eq!(harness.state.status_line, None);
        assert!(status_text(&harness.state, &harness.view_data).starts_with("NAV | "));
        Ok(())
    }

    #[test]
    fn map_plot_places_corners() {
        let data = Dataset::builtin();
        let mut north_west = data.floats()[0].clone();
        north_west.lat = 90.0;
        north_west.lng = -180.0;
        let mut south_east = data.floats()[1].clone();
        south_east.lat = -90.0;
        south_east.lng = 180.0;

        let lines = map_plot_lines(
            &[north_west.clone(), south_east],
            Some(north_west.id),
            false,
        );
        assert_eq!(lines.len(), 15);
        assert!(lines[0].starts_with('@'));
        assert!(lines[14].ends_with('o'));
        assert!(lines.iter().all(|line| line.chars().count() == 60));
    }

    #[test]
    fn map_view_lists_trajectory_only_when_enabled() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Map)?;
        let text = map_view_text(&harness.view_data);
        assert!(text.starts_with("2d map | 6 floats in view | trajectories on"));
        assert!(text.contains("legend: 5 active | 1 inactive | 4 bgc"));
        assert!(text.contains("trajectory 5906298"));

        harness.press(KeyCode::Char('t'));
        harness.press(KeyCode::Char('m'));
        assert_eq!(harness.view_data.filters.filters().map_mode, MapMode::Globe);
        let text = map_view_text(&harness.view_data);
        assert!(text.starts_with("3d globe"));
        assert!(!text.contains("trajectory 5906298"));
        Ok(())
    }

    #[test]
    fn profiles_cycle_parameter_and_selection() -> Result<()> {
        let mut harness = Harness::new(ViewKind::Profiles)?;
        harness.press(KeyCode::Char('p'));
        assert_eq!(
            harness.view_data.profiles.parameter,
            ProfileParameter::Salinity
        );

        harness.press(KeyCode::Char(' '));
        harness.press(KeyCode::Char('j'));
        harness.press(KeyCode::Char(' '));
        assert_eq!(harness.view_data.profiles.selected.len(), 2);

        let text = profiles_view_text(&harness.view_data);
        assert!(text.starts_with("parameter: salinity (PSU) | 3 profiles"));
        assert!(text.contains("5906298 salinity"));
        assert!(text.contains("5906299 salinity"));
        assert!(!text.contains("5906300 salinity"));
        assert_eq!(
            text.matches("  avg ").count(),
            2,
            "one stats line per shown profile"
        );
        assert!(text.contains(" PSU | range "));
        Ok(())
    }

    #[test]
    fn table_insights_summarize_filtered_rows() -> Result<()> {
        let harness = Harness::new(ViewKind::Table)?;
        let result = harness.view_data.table_result();
        let text = table_insights_text(&result.filtered);
        assert!(text.starts_with("6 active of 7 | avg temp "), "{text}");
        assert!(text.contains("(4.2 to 22.8°C)"), "{text}");
        assert!(text.contains("good qc 6 (86%)"), "{text}");
        assert!(text.ends_with("max depth 2050 m"), "{text}");

        let empty = table_insights_text(&[]);
        assert_eq!(
            empty,
            "0 active of 0 | avg temp - (-) | avg salinity - | good qc 0 (0%) | max depth -"
        );
        Ok(())
    }

    #[test]
    fn filter_panel_marks_cursor_row() {
        let text = filter_panel_text(&floatchat_app::FilterState::default(), 8);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[8], "> [x] TEMP  Temperature");
        assert_eq!(lines[0], "  latitude min      -90.0");
        assert_eq!(lines.len(), 22);
    }
}
