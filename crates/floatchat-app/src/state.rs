// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_view: ViewKind,
    /// Quick-query chat overlay over the data views.
    pub quick_chat: PanelVisibility,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::starting_at(ViewKind::Chat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextView,
    PrevView,
    SelectView(ViewKind),
    StartSearch,
    StartCompose,
    OpenFilters,
    ExitToNav,
    OpenQuickChat,
    CloseQuickChat,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    ViewChanged(ViewKind),
    QuickChatChanged(PanelVisibility),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub const fn starting_at(view: ViewKind) -> Self {
        Self {
            mode: AppMode::Nav,
            active_view: view,
            quick_chat: PanelVisibility::Hidden,
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextView => self.rotate_view(1),
            AppCommand::PrevView => self.rotate_view(-1),
            AppCommand::SelectView(view) => {
                if self.active_view == view {
                    return Vec::new();
                }
                self.active_view = view;
                vec![AppEvent::ViewChanged(view)]
            }
            AppCommand::StartSearch => self.enter(AppMode::Search),
            AppCommand::StartCompose => self.enter(AppMode::Compose),
            AppCommand::OpenFilters => {
                let mut events = self.enter(AppMode::Filters);
                events.push(self.set_status("filters"));
                events
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode), self.set_status("nav")]
            }
            AppCommand::OpenQuickChat => {
                self.quick_chat = PanelVisibility::Visible;
                self.mode = AppMode::Compose;
                vec![
                    AppEvent::QuickChatChanged(self.quick_chat),
                    AppEvent::ModeChanged(self.mode),
                    self.set_status("quick query open"),
                ]
            }
            AppCommand::CloseQuickChat => {
                self.quick_chat = PanelVisibility::Hidden;
                self.mode = AppMode::Nav;
                vec![
                    AppEvent::QuickChatChanged(self.quick_chat),
                    AppEvent::ModeChanged(self.mode),
                    self.set_status("quick query hidden"),
                ]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn enter(&mut self, mode: AppMode) -> Vec<AppEvent> {
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn rotate_view(&mut self, delta: isize) -> Vec<AppEvent> {
        let views = ViewKind::ALL;
        let current = views
            .iter()
            .position(|view| *view == self.active_view)
            .unwrap_or(0) as isize;
        let len = views.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_view = views[next];
        vec![AppEvent::ViewChanged(self.active_view)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, PanelVisibility};
    use crate::{AppMode, ViewKind};

    #[test]
    fn view_rotation_wraps_both_ways() {
        let mut state = AppState::starting_at(ViewKind::Table);

        let events = state.dispatch(AppCommand::NextView);
        assert_eq!(state.active_view, ViewKind::Chat);
        assert_eq!(events, vec![AppEvent::ViewChanged(ViewKind::Chat)]);

        state.dispatch(AppCommand::PrevView);
        assert_eq!(state.active_view, ViewKind::Table);
    }

    #[test]
    fn selecting_current_view_is_quiet() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::SelectView(ViewKind::Chat)).is_empty());
        assert_eq!(
            state.dispatch(AppCommand::SelectView(ViewKind::Map)),
            vec![AppEvent::ViewChanged(ViewKind::Map)]
        );
    }

    #[test]
    fn quick_chat_open_and_close() {
        let mut state = AppState::starting_at(ViewKind::Map);

        let opened = state.dispatch(AppCommand::OpenQuickChat);
        assert_eq!(state.quick_chat, PanelVisibility::Visible);
        assert_eq!(state.mode, AppMode::Compose);
        assert_eq!(
            opened,
            vec![
                AppEvent::QuickChatChanged(PanelVisibility::Visible),
                AppEvent::ModeChanged(AppMode::Compose),
                AppEvent::StatusUpdated("quick query open".to_owned()),
            ],
        );

        state.dispatch(AppCommand::CloseQuickChat);
        assert_eq!(state.quick_chat, PanelVisibility::Hidden);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::StartSearch);
        assert_eq!(state.mode, AppMode::Search);

        let events = state.dispatch(AppCommand::OpenFilters);
        assert_eq!(state.mode, AppMode::Filters);
        assert_eq!(events[1], AppEvent::StatusUpdated("filters".to_owned()));

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("nav"));
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("exported 7 rows".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("exported 7 rows"));
        assert_eq!(
            state.dispatch(AppCommand::ClearStatus),
            vec![AppEvent::StatusCleared]
        );
        assert_eq!(state.status_line, None);
    }
}
