use chrono::Utc;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use recyvision_core::instructions::{self, RecyclingInstruction};
use recyvision_core::model::{Classification, MaterialType, RecyclingCenter};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let tab_label = match app.screen {
        Screen::Centers => "[Centers] · Scan · History",
        Screen::Scan => "Centers · [Scan] · History",
        Screen::History => "Centers · Scan · [History]",
    };

    let header = Paragraph::new(format!("recyvision – {tab_label} (Tab switches)"))
        .block(Block::default().borders(Borders::ALL).title("RecyVision"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::Centers => draw_centers(frame, app, *content_area),
        Screen::Scan => draw_scan(frame, app, *content_area),
        Screen::History => draw_history(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::Centers => "Type lat lon city · Enter refresh · ↑/↓ pick center · Tab next · Ctrl-C quit",
        Screen::Scan => "Type an image path · Enter classify · Esc clear · Tab next · Ctrl-C quit",
        Screen::History => "r/Enter reload · Tab next · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(notice) = &app.scan_notice {
        format!("{notice} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading || app.scan_notice.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_centers(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // list + detail
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, main_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.location_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Where are you? (lat lon city, Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let split_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(*main_area);

    let split = split_chunks.as_ref();
    let [list_area, detail_area] = split else {
        return;
    };

    let items = if app.centers.is_empty() {
        vec![ListItem::new(
            "No centers yet. Enter a location and press Enter.",
        )]
    } else {
        app.centers
            .iter()
            .map(|center| {
                ListItem::new(center.name.clone())
                    .style(Style::default().fg(material_color(center.material_type)))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Nearby centers ({})", app.centers.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.centers.is_empty() {
        state.select(Some(app.center_list_index));
    }
    frame.render_stateful_widget(list, *list_area, &mut state);

    let detail = Paragraph::new(
        app.selected_center()
            .map_or_else(|| String::from("Select a center to see details."), center_details),
    )
    .block(Block::default().borders(Borders::ALL).title("Details"))
    .wrap(Wrap { trim: true });

    frame.render_widget(detail, *detail_area);
}

fn draw_scan(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // results
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, results_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.image_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Image to classify (path, Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let Some(outcome) = &app.outcome else {
        let placeholder = Paragraph::new("No scan yet. Point at a photo and press Enter.")
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, *results_area);
        return;
    };

    let results_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Min(0)])
        .split(*results_area);

    let results = results_chunks.as_ref();
    let [models_area, guidance_area] = results else {
        return;
    };

    let split_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*models_area);

    let split = split_chunks.as_ref();
    let [primary_area, secondary_area] = split else {
        return;
    };

    let primary = Paragraph::new(classification_text(&outcome.primary))
        .block(Block::default().borders(Borders::ALL).title("Custom model"))
        .wrap(Wrap { trim: true });
    frame.render_widget(primary, *primary_area);

    let secondary_title = if outcome.secondary.is_degraded() {
        "Gemini (unavailable)"
    } else {
        "Gemini"
    };
    let secondary_style = if outcome.secondary.is_degraded() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let secondary = Paragraph::new(classification_text(outcome.secondary.result()))
        .block(Block::default().borders(Borders::ALL).title(secondary_title))
        .style(secondary_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(secondary, *secondary_area);

    let guidance = instructions::instructions_for(&outcome.primary.label);
    let guidance_pane = Paragraph::new(instruction_text(guidance))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("How to recycle: {}", guidance.category)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(guidance_pane, *guidance_area);
}

fn draw_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if app.history.is_empty() {
        let paragraph = Paragraph::new("No scans recorded yet.")
            .block(Block::default().borders(Borders::ALL).title("Scan history"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let today = Utc::now().date_naive();

    let rows = app.history.iter().map(|(date, count)| {
        let mut style = Style::default();
        if *date == today {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(date.format("%d.%m.%Y").to_string()),
            Cell::from(date.format("%a").to_string()),
            Cell::from(format!("{count}")),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Min(6),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Date", "Day", "Scans"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Scan history"))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn center_details(center: &RecyclingCenter) -> String {
    let items = center
        .accepted_items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{}\n{}\n\nType: {}\n\nAccepts:\n{items}\n\nOpening hours:\n{}",
        center.name,
        center.address,
        material_label(center.material_type),
        center.opening_hours,
    )
}

fn classification_text(classification: &Classification) -> String {
    let confidence = classification.confidence * 100.0;
    match &classification.explanation {
        Some(explanation) => format!(
            "{}\nConfidence: {confidence:.1}%\n\n{explanation}",
            classification.label
        ),
        None => format!("{}\nConfidence: {confidence:.1}%", classification.label),
    }
}

fn instruction_text(guidance: &RecyclingInstruction) -> String {
    let steps = guidance
        .instructions
        .iter()
        .map(|step| format!("• {step}"))
        .collect::<Vec<String>>()
        .join("\n");
    let tips = guidance
        .tips
        .iter()
        .map(|tip| format!("• {tip}"))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "Preparation:\n{steps}\n\nTips:\n{tips}\n\nDisposal: {}",
        guidance.disposal
    )
}

fn material_label(material: MaterialType) -> &'static str {
    match material {
        MaterialType::General => "General recycling",
        MaterialType::Glass => "Glass",
        MaterialType::Paper => "Paper",
        MaterialType::Plastic => "Plastic",
        MaterialType::Other => "Other",
    }
}

fn material_color(material: MaterialType) -> Color {
    match material {
        MaterialType::General => Color::Green,
        MaterialType::Glass => Color::Cyan,
        MaterialType::Paper => Color::Blue,
        MaterialType::Plastic => Color::Yellow,
        MaterialType::Other => Color::Magenta,
    }
}
