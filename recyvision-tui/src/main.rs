//! Terminal UI for finding nearby recycling centers and classifying waste photos.

mod app;
mod input;
mod ui;

use std::{env, io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use recyvision_classifier::HttpClassifierPort;
use recyvision_core::{
    catalog::RefreshPolicy,
    dispatch::ClassificationDispatcher,
    events::{JsonFileEventStore, ScanEventLog},
    model::{Coordinate, ScanImage},
    ports::FeaturePort,
    service::RecyVisionService,
};
use recyvision_provider_overpass::OverpassFeaturePort;
use reqwest::Client;

use crate::app::App;
use crate::input::Action;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_HISTORY_PATH: &str = "scan-events.json";

#[tokio::main]
async fn main() -> Result<()> {
    // HTTP + service setup
    let client = Client::builder().user_agent("recyvision/0.1").build()?;

    let api_base =
        env::var("RECYVISION_API").unwrap_or_else(|_| String::from(DEFAULT_API_BASE));
    let history_path =
        env::var("RECYVISION_HISTORY").unwrap_or_else(|_| String::from(DEFAULT_HISTORY_PATH));

    let features: Arc<dyn FeaturePort> = match env::var("RECYVISION_OVERPASS") {
        Ok(url) => Arc::new(OverpassFeaturePort::with_base_url(client.clone(), url)),
        Err(_) => Arc::new(OverpassFeaturePort::new(client.clone())),
    };

    let dispatcher = ClassificationDispatcher::new(
        Arc::new(HttpClassifierPort::primary(client.clone(), &api_base)),
        Arc::new(HttpClassifierPort::secondary(client, &api_base)),
    );

    let scan_log = ScanEventLog::new(Arc::new(JsonFileEventStore::new(history_path)));

    let service = Arc::new(RecyVisionService::new(
        features,
        dispatcher,
        scan_log,
        RefreshPolicy::Supersede,
    ));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::RefreshCenters => {
                    let Some((location, city)) = parse_location_input(app.location_input.trim())
                    else {
                        app.error_message = Some(
                            "Type latitude, longitude, and optionally a city, then press Enter"
                                .into(),
                        );
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.refresh_centers(location, &city).await;

                    app.is_loading = false;
                    match res {
                        Ok(centers) => {
                            app.centers = centers.as_ref().clone();
                            app.center_list_index = 0;
                            if app.centers.is_empty() {
                                app.error_message =
                                    Some("No recycling centers found in the area".into());
                            }
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Refresh failed: {err}"));
                        }
                    }
                }
                Action::ClassifyImage => {
                    let path = app.image_input.trim().to_owned();
                    if path.is_empty() {
                        app.error_message =
                            Some("Type the path of an image, then press Enter".into());
                        continue;
                    }

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let image = match ScanImage::read_from(&path).await {
                        Ok(image) => image,
                        Err(err) => {
                            app.is_loading = false;
                            app.error_message = Some(format!("Could not read {path}: {err}"));
                            continue;
                        }
                    };

                    // A failed history write must not stop the scan.
                    app.scan_notice = match app.service.record_scan().await {
                        Ok(_) => None,
                        Err(err) => Some(format!("History not updated: {err}")),
                    };

                    let res = app.service.classify(&image).await;

                    app.is_loading = false;
                    match res {
                        Ok(outcome) => {
                            app.outcome = Some(outcome);
                        }
                        Err(err) => {
                            app.outcome = None;
                            app.error_message =
                                Some(format!("Classification failed, try again: {err}"));
                        }
                    }
                }
                Action::LoadHistory => {
                    app.is_loading = true;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let events = app.service.scan_history().await;

                    app.is_loading = false;
                    app.set_history(&events);
                }
            }
        }
    }

    Ok(())
}

fn parse_location_input(input: &str) -> Option<(Coordinate, String)> {
    let mut parts = input.split_whitespace();

    let latitude = parts.next()?.parse::<f64>().ok()?;
    let longitude = parts.next()?.parse::<f64>().ok()?;

    let city = parts.collect::<Vec<&str>>().join(" ");
    let city = if city.is_empty() {
        String::from("Unknown")
    } else {
        city
    };

    Some((
        Coordinate {
            latitude,
            longitude,
        },
        city,
    ))
}
