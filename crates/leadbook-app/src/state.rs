// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::notify::{Toast, ToastLevel};
use crate::{AppMode, FormKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Categories,
    Contacts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub view: ViewKind,
    pub show_help: bool,
    pub status: Option<Toast>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            view: ViewKind::Categories,
            show_help: false,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenContacts,
    BackToCategories,
    OpenForm(FormKind),
    ExitToNav,
    ToggleHelp,
    ShowToast(Toast),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    ViewChanged(ViewKind),
    HelpToggled(bool),
    StatusUpdated(Toast),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::OpenContacts => self.switch_view(ViewKind::Contacts),
            AppCommand::BackToCategories => self.switch_view(ViewKind::Categories),
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ToggleHelp => {
                self.show_help = !self.show_help;
                vec![AppEvent::HelpToggled(self.show_help)]
            }
            AppCommand::ShowToast(toast) => {
                self.status = Some(toast.clone());
                vec![AppEvent::StatusUpdated(toast)]
            }
            AppCommand::ClearStatus => {
                self.status = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn status_level(&self) -> Option<ToastLevel> {
        self.status.as_ref().map(|toast| toast.level)
    }

    // Leaving a view always drops any open form.
    fn switch_view(&mut self, view: ViewKind) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if self.mode != AppMode::Nav {
            self.mode = AppMode::Nav;
            events.push(AppEvent::ModeChanged(self.mode));
        }
        if self.view != view {
            self.view = view;
            events.push(AppEvent::ViewChanged(view));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, ViewKind};
    use crate::notify::{Toast, ToastLevel};
    use crate::{AppMode, FormKind};

    #[test]
    fn opening_contacts_closes_category_form() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenForm(FormKind::Category));

        let events = state.dispatch(AppCommand::OpenContacts);
        assert_eq!(state.view, ViewKind::Contacts);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(
            events,
            vec![
                AppEvent::ModeChanged(AppMode::Nav),
                AppEvent::ViewChanged(ViewKind::Contacts),
            ],
        );
    }

    #[test]
    fn back_from_list_is_a_no_op() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::BackToCategories).is_empty());
    }

    #[test]
    fn toast_sets_and_clears_status() {
        let mut state = AppState::default();
        let toast = Toast {
            level: ToastLevel::Success,
            message: "Contact added".to_owned(),
        };

        let shown = state.dispatch(AppCommand::ShowToast(toast.clone()));
        assert_eq!(shown, vec![AppEvent::StatusUpdated(toast)]);
        assert_eq!(state.status_level(), Some(ToastLevel::Success));

        let cleared = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(cleared, vec![AppEvent::StatusCleared]);
        assert!(state.status.is_none());
    }

    #[test]
    fn help_toggles() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::ToggleHelp),
            vec![AppEvent::HelpToggled(true)]
        );
        state.dispatch(AppCommand::ToggleHelp);
        assert!(!state.show_help);
    }
}
