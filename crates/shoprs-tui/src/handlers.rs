//! Keyboard event handling.

use crate::app::{App, AppState, FilterField, InputMode, LoginField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+C quits from anywhere.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.timer.cancel();
        app.state = AppState::Quit;
        return true;
    }

    match app.input_mode {
        InputMode::Login => handle_login_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Filter => handle_filter_key(app, key),
        InputMode::DesiredPrice => handle_desired_price_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => {
            match app.login_field {
                // Enter on the username field moves on to the password.
                LoginField::Username => app.login_field = LoginField::Password,
                LoginField::Password => app.try_login(),
            }
            false
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            app.login_field = match app.login_field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
            false
        }
        KeyCode::Char(c) => {
            match app.login_field {
                LoginField::Username => app.username_input.push(c),
                LoginField::Password => app.password_input.push(c),
            }
            false
        }
        KeyCode::Backspace => {
            match app.login_field {
                LoginField::Username => app.username_input.pop(),
                LoginField::Password => app.password_input.pop(),
            };
            false
        }
        KeyCode::Esc => {
            app.state = AppState::Quit;
            true
        }
        _ => false,
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::Shopping => handle_shopping_key(app, key),
        AppState::Wishlist => handle_wishlist_key(app, key),
        AppState::Orders => handle_orders_key(app, key),
        _ => false,
    }
}

fn handle_shopping_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char('n') | KeyCode::Right => {
            app.next_page();
            false
        }
        KeyCode::Char('p') | KeyCode::Left => {
            app.prev_page();
            false
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            app.view_selected();
            false
        }
        KeyCode::Char('w') => {
            app.toggle_wishlist_selected();
            false
        }
        KeyCode::Char('g') => {
            app.enter_wishlist(Instant::now());
            false
        }
        KeyCode::Char('o') => {
            app.enter_orders();
            false
        }
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.start_search();
            false
        }
        KeyCode::Char('f') => {
            app.start_filter();
            false
        }
        KeyCode::Char('r') => {
            app.reset_filters();
            false
        }
        KeyCode::Char('d') => {
            app.toggle_dark_mode();
            false
        }
        KeyCode::Char('L') => {
            app.logout();
            false
        }
        KeyCode::Esc => {
            app.status_message = None;
            false
        }
        _ => false,
    }
}

fn handle_wishlist_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.timer.cancel();
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.wishlist_move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.wishlist_move_up();
            false
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.start_desired_price();
            false
        }
        KeyCode::Char('w') | KeyCode::Delete => {
            app.remove_selected_wishlist_item();
            false
        }
        KeyCode::Char('x') => {
            app.dismiss_alert();
            false
        }
        KeyCode::Char('d') => {
            app.toggle_dark_mode();
            false
        }
        KeyCode::Char('L') => {
            app.logout();
            false
        }
        KeyCode::Esc | KeyCode::Char('g') => {
            app.leave_wishlist();
            false
        }
        _ => false,
    }
}

fn handle_orders_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('d') => {
            app.toggle_dark_mode();
            false
        }
        KeyCode::Esc | KeyCode::Char('o') => {
            app.state = AppState::Shopping;
            false
        }
        _ => false,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            false
        }
        KeyCode::Enter => {
            app.commit_search();
            false
        }
        KeyCode::Down => {
            let len = app.suggestions.len();
            if len > 0 {
                app.suggestion_selected = Some(match app.suggestion_selected {
                    Some(i) if i + 1 < len => i + 1,
                    Some(i) => i,
                    None => 0,
                });
            }
            false
        }
        KeyCode::Up => {
            app.suggestion_selected = match app.suggestion_selected {
                Some(0) | None => None,
                Some(i) => Some(i - 1),
            };
            false
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.update_search();
            false
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.update_search();
            false
        }
        _ => false,
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            false
        }
        KeyCode::Enter => {
            app.apply_filter_input();
            app.input_mode = InputMode::Normal;
            false
        }
        KeyCode::Tab | KeyCode::Down => {
            app.apply_filter_input();
            app.select_filter_field(app.filter_field.next());
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.apply_filter_input();
            app.select_filter_field(app.filter_field.prev());
            false
        }
        KeyCode::Right => {
            if app.filter_field == FilterField::Category {
                app.cycle_category();
            }
            false
        }
        KeyCode::Char(c) => {
            app.filter_input.push(c);
            false
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
            false
        }
        _ => false,
    }
}

fn handle_desired_price_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            false
        }
        KeyCode::Enter => {
            app.apply_desired_price();
            false
        }
        KeyCode::Char(c) => {
            app.price_input.push(c);
            false
        }
        KeyCode::Backspace => {
            app.price_input.pop();
            false
        }
        _ => false,
    }
}
