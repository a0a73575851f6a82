use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.refresh_centers`(...) for the typed location
    RefreshCenters,
    /// Record a scan event and run `service.classify`(...) on the typed path
    ClassifyImage,
    /// Reload the per-day scan history
    LoadHistory,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Tab, Up};

    // Global quit shortcut; `q` only quits on the history screen because
    // the other two have text inputs.
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Tab cycles through the screens; entering the history screen reloads it.
    if key.code == Tab {
        app.screen = app.screen.next();
        app.error_message = None;
        if app.screen == Screen::History {
            return Action::LoadHistory;
        }
        return Action::None;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::Centers => match key.code {
            Up => {
                if app.center_list_index > 0 {
                    app.center_list_index -= 1;
                }
            }
            Down => {
                if app.center_list_index + 1 < app.centers.len() {
                    app.center_list_index += 1;
                }
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.location_input.push(character);
                }
            }
            Backspace => {
                app.location_input.pop();
            }
            Enter => {
                action = Action::RefreshCenters;
            }
            Esc => {
                app.error_message = None;
            }
            _ => {}
        },

        Screen::Scan => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.image_input.push(character);
                }
            }
            Backspace => {
                app.image_input.pop();
            }
            Enter => {
                action = Action::ClassifyImage;
            }
            Esc => {
                app.outcome = None;
                app.scan_notice = None;
                app.error_message = None;
            }
            _ => {}
        },

        Screen::History => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Char('r') | Enter => {
                action = Action::LoadHistory;
            }
            Esc => {
                app.error_message = None;
            }
            _ => {}
        },
    }
    action
}
