//! UI rendering with Ratatui.

use crate::app::{App, AppState, FilterField, InputMode, LoginField};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::new(app.session.dark_mode());
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    match app.state {
        AppState::Login => render_login(frame, app, &theme),
        AppState::Shopping => render_shopping(frame, app, &theme),
        AppState::Wishlist => render_wishlist(frame, app, &theme),
        AppState::Orders => render_orders(frame, app, &theme),
        AppState::Quit => {}
    }
}

/// Render the login screen.
fn render_login(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let dialog_area = centered_rect(54, 10, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" 🛍 ShopEase - Welcome Back! ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1), // username
            Constraint::Length(1), // password
            Constraint::Length(1), // status
        ])
        .split(inner);

    let prompt = Paragraph::new("Please log in to continue").style(Style::default().fg(theme.text));
    frame.render_widget(prompt, chunks[0]);

    let field_style = |field: LoginField| {
        if app.login_field == field {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        }
    };

    let username = Paragraph::new(Line::from(vec![
        Span::styled("Username: ", field_style(LoginField::Username)),
        Span::styled(app.username_input.as_str(), Style::default().fg(theme.text)),
        cursor_span(app.login_field == LoginField::Username),
    ]));
    frame.render_widget(username, chunks[1]);

    let masked: String = "*".repeat(app.password_input.len());
    let password = Paragraph::new(Line::from(vec![
        Span::styled("Password: ", field_style(LoginField::Password)),
        Span::styled(masked, Style::default().fg(theme.text)),
        cursor_span(app.login_field == LoginField::Password),
    ]));
    frame.render_widget(password, chunks[2]);

    if let Some(message) = app.error_message.as_deref().or(app.users.error()) {
        let error = Paragraph::new(message).style(Style::default().fg(theme.warning));
        frame.render_widget(error, chunks[3]);
    } else if app.users.is_pending() {
        let loading = Paragraph::new("Loading users...").style(Style::default().fg(theme.muted));
        frame.render_widget(loading, chunks[3]);
    }
}

/// Render the main shopping view.
fn render_shopping(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header: search + flash sale
            Constraint::Min(5),    // catalog + sidebar
            Constraint::Length(1), // status line
        ])
        .split(area);

    render_search_header(frame, app, theme, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    render_catalog(frame, app, theme, columns[0]);
    render_shopping_sidebar(frame, app, theme, columns[1]);
    render_status_line(
        frame,
        app,
        theme,
        rows[2],
        "j/k: move | n/p: page | w: wishlist toggle | v: view | /: search | f: filter | g: wishlist | o: orders | d: theme | L: logout | q: quit",
    );

    if app.input_mode == InputMode::Filter {
        render_filter_overlay(frame, app, theme, area);
    }
}

fn render_search_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let border = if searching { theme.accent } else { theme.muted };
    let title = if app.flash_sale_active {
        " 🔍 Search ── ⚡ Flash Sale! Limited Time Offer! "
    } else {
        " 🔍 Search "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled("▸ ", Style::default().fg(theme.accent)),
        Span::styled(app.search_query.as_str(), Style::default().fg(theme.text)),
        cursor_span(searching),
    ];
    if !searching && !app.recent_searches.is_empty() {
        spans.push(Span::styled(
            format!("   Recent: {}", app.recent_searches.join(", ")),
            Style::default().fg(theme.muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_catalog(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let page = app.current_page();
    let title = format!(
        " 🛒 Products ({} found, page {}/{}) ",
        app.filtered.len(),
        page.number,
        page.total_pages
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = app.products.error() {
        let message = Paragraph::new(format!("Failed to load products: {error}"))
            .style(Style::default().fg(theme.warning))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, inner);
        return;
    }
    if app.products.is_pending() {
        let message =
            Paragraph::new("Loading products...").style(Style::default().fg(theme.muted));
        frame.render_widget(message, inner);
        return;
    }

    let items: Vec<ListItem> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let marker = if app.wishlist.contains(&product.id) {
                "♥"
            } else {
                " "
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.warning)),
                Span::styled(product.name.as_str(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}", product.category),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("  ₹{:.2}", product.price),
                    Style::default().fg(theme.price),
                ),
            ]);
            let style = if i == app.selected {
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    if items.is_empty() {
        let message = Paragraph::new("No products match the current filters")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
    } else {
        frame.render_widget(List::new(items), inner);
    }

    if app.input_mode == InputMode::Search && !app.suggestions.is_empty() {
        render_suggestions(frame, app, theme, inner);
    }
}

fn render_suggestions(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let height = (app.suggestions.len() as u16 + 2).min(area.height);
    let overlay = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2).min(50), height);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Suggestions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if app.suggestion_selected == Some(i) {
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("{} ({})", product.name, product.category)).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn render_shopping_sidebar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_product_strip(
        frame,
        theme,
        chunks[0],
        " ⭐ Recommended for You ",
        &app.recommended,
        history_error(app),
    );
    render_product_strip(
        frame,
        theme,
        chunks[1],
        " 🕘 Recently Viewed ",
        &app.recently_viewed,
        None,
    );
}

fn history_error(app: &App) -> Option<String> {
    app.history
        .error()
        .map(|e| format!("Failed to load purchase history: {e}"))
}

fn render_product_strip(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    products: &[shoprs_core::Product],
    error: Option<String>,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = error {
        let message = Paragraph::new(error)
            .style(Style::default().fg(theme.warning))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, inner);
        return;
    }

    if products.is_empty() {
        let message = Paragraph::new("Nothing here yet").style(Style::default().fg(theme.muted));
        frame.render_widget(message, inner);
        return;
    }

    let items: Vec<ListItem> = products
        .iter()
        .map(|product| {
            ListItem::new(Line::from(vec![
                Span::styled(product.name.as_str(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  ₹{:.2}", product.price),
                    Style::default().fg(theme.price),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Render the wishlist view with the price-drop alert panel.
fn render_wishlist(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let alert_height = if app.alerts.is_empty() {
        0
    } else {
        app.alerts.len() as u16 + 2
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alert_height),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    if !app.alerts.is_empty() {
        render_alerts(frame, app, theme, rows[0]);
    }
    render_wishlist_items(frame, app, theme, rows[1]);
    render_status_line(
        frame,
        app,
        theme,
        rows[2],
        "j/k: move | e: desired price | w: remove | x: dismiss alert | Esc: back to shop | q: quit",
    );
}

fn render_alerts(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" 🔔 Price Drop Alerts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .map(|alert| {
            let line = Line::from(vec![
                Span::styled(
                    alert.name.as_str(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" has dropped to ", Style::default().fg(theme.text)),
                Span::styled(
                    format!("₹{:.2}", alert.new_price),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!(" (Desired Price: ₹{:.2})", alert.desired_price),
                    Style::default().fg(theme.muted),
                ),
            ]);
            ListItem::new(line).style(Style::default().bg(theme.alert_bg))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn render_wishlist_items(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" 💝 Your Wishlist ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.wishlist.is_empty() {
        let message = Paragraph::new("Your wishlist is empty. Add items to it from the shop.")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(message, centered_rect(60, 3, inner));
        return;
    }

    let items: Vec<ListItem> = app
        .wishlist
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let editing = app.input_mode == InputMode::DesiredPrice && i == app.wishlist_selected;
            let desired = if editing {
                format!("desired: {}_", app.price_input)
            } else {
                match item.desired_price {
                    Some(price) => format!("desired: ₹{price:.2}"),
                    None => "desired: (not set)".to_string(),
                }
            };
            let line = Line::from(vec![
                Span::styled(item.name.as_str(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}", item.category),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("  ₹{:.2}", item.price),
                    Style::default().fg(theme.price),
                ),
                Span::styled(format!("  {desired}"), Style::default().fg(theme.accent)),
            ]);
            let style = if i == app.wishlist_selected {
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Render the order history view.
fn render_orders(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(" 📦 Your Orders ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);

    if let Some(error) = history_error(app) {
        let message = Paragraph::new(error)
            .style(Style::default().fg(theme.warning))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, inner);
    } else if app.orders.is_empty() {
        let message = Paragraph::new("You have no orders.")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(message, centered_rect(40, 3, inner));
    } else {
        let items: Vec<ListItem> = app
            .orders
            .iter()
            .map(|product| {
                ListItem::new(Line::from(vec![
                    Span::styled(product.name.as_str(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  {}", product.category),
                        Style::default().fg(theme.muted),
                    ),
                    Span::styled(
                        format!("  ₹{:.2}", product.price),
                        Style::default().fg(theme.price),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    }

    render_status_line(frame, app, theme, rows[1], "Esc: back to shop | q: quit");
}

fn render_filter_overlay(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let dialog_area = centered_rect(50, FilterField::ALL.len() as u16 + 3, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" 🎛 Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let items: Vec<ListItem> = FilterField::ALL
        .iter()
        .map(|field| {
            let active = *field == app.filter_field;
            let value = if active {
                format!("{}_", app.filter_input)
            } else {
                filter_display(app, *field)
            };
            let style = if active {
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("{:<10} {}", field.label(), value)).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), inner);

    let help_text = if app.filter_field == FilterField::Category {
        "Tab: next field | Right: cycle categories | Enter: apply | Esc: close"
    } else {
        "Tab: next field | Enter: apply | Esc: close"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.muted));
    let help_area = Rect::new(inner.x, inner.y + FilterField::ALL.len() as u16, inner.width, 1);
    if help_area.y < dialog_area.y + dialog_area.height {
        frame.render_widget(help, help_area);
    }
}

fn filter_display(app: &App, field: FilterField) -> String {
    let value = match field {
        FilterField::Size => app.filters.size.clone(),
        FilterField::Brand => app.filters.brand.clone(),
        FilterField::Category => app.filters.category.clone(),
        FilterField::Material => app.filters.material.clone(),
        FilterField::Color => app.filters.color.clone(),
        FilterField::MinPrice => app.filters.min_price.map(|p| p.to_string()),
        FilterField::MaxPrice => app.filters.max_price.map(|p| p.to_string()),
    };
    value.unwrap_or_else(|| "(any)".to_string())
}

fn render_status_line(frame: &mut Frame, app: &App, theme: &Theme, area: Rect, help: &str) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.warning),
        )),
        None => Line::from(Span::styled(help, Style::default().fg(theme.muted))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn cursor_span(active: bool) -> Span<'static> {
    if active {
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK))
    } else {
        Span::raw("")
    }
}

/// Helper to create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Loading;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::Config {
            data_dir: dir.path().to_path_buf(),
            store_dir: dir.path().join("store"),
            ..Default::default()
        };
        (dir, App::new(config))
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            text.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                text.push('\n');
            }
        }
        text
    }

    #[test]
    fn history_failure_shows_in_the_recommended_strip() {
        let (_dir, mut app) = app();
        app.state = AppState::Shopping;
        app.input_mode = InputMode::Normal;
        app.history = Loading::Failed("missing file".into());
        assert!(rendered(&app).contains("Failed to load"));
    }

    #[test]
    fn history_failure_shows_in_the_orders_view() {
        let (_dir, mut app) = app();
        app.state = AppState::Orders;
        app.input_mode = InputMode::Normal;
        app.history = Loading::Failed("missing file".into());
        assert!(rendered(&app).contains("Failed to load purchase history: missing file"));
    }
}
