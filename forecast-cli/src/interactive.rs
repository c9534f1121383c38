//! Menu-driven session over a single controller.

use std::fmt;

use anyhow::Result;
use forecast_core::{ForecastViewController, GeolocationSource, SuggestionEntry};
use inquire::{InquireError, Select, Text};

use crate::{cli::parse_date, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    PickDate,
    PickDay,
    OpenHour,
    CloseHour,
    ToggleTheme,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search city",
            Action::PickDate => "Pick a date",
            Action::PickDay => "Pick a forecast day",
            Action::OpenHour => "Show hour details",
            Action::CloseHour => "Close hour details",
            Action::ToggleTheme => "Toggle light/dark mode",
            Action::Quit => "Quit",
        })
    }
}

/// Entries offered after typing a city name.
enum Pick {
    Suggestion(SuggestionEntry),
    Typed(String),
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Suggestion(entry) => write!(f, "{entry}"),
            Pick::Typed(text) => write!(f, "Search \"{text}\""),
        }
    }
}

fn available_actions(ctl: &ForecastViewController) -> Vec<Action> {
    let state = ctl.state();
    let mut actions = vec![Action::Search];

    if let Some(weather) = &state.weather {
        actions.push(Action::PickDate);
        if !weather.forecast.is_empty() {
            actions.push(Action::PickDay);
        }
        if !ctl.active_hours().is_empty() {
            actions.push(Action::OpenHour);
        }
    }
    if state.selected_hour.is_some() {
        actions.push(Action::CloseHour);
    }
    actions.extend([Action::ToggleTheme, Action::Quit]);

    actions
}

pub async fn run(mut ctl: ForecastViewController, source: &dyn GeolocationSource) -> Result<()> {
    ctl.locate_on_startup(source).await;

    loop {
        println!("\n{}", render::render(&ctl));

        let action = match Select::new("What next?", available_actions(&ctl)).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let outcome = match action {
            Action::Search => search(&mut ctl).await,
            Action::PickDate => pick_date(&mut ctl).await,
            Action::PickDay => pick_day(&mut ctl),
            Action::OpenHour => open_hour(&mut ctl),
            Action::CloseHour => {
                ctl.close_hour_detail();
                Ok(())
            }
            Action::ToggleTheme => {
                ctl.toggle_theme();
                Ok(())
            }
            Action::Quit => break,
        };

        match outcome {
            Ok(()) | Err(InquireError::OperationCanceled) => {}
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

async fn search(ctl: &mut ForecastViewController) -> Result<(), InquireError> {
    let text = Text::new("City:").with_initial_value(&ctl.state().query).prompt()?;

    ctl.update_suggestions(&text).await;
    if ctl.state().suggestions.is_empty() {
        ctl.request_by_city(&text).await;
        return Ok(());
    }

    let mut picks: Vec<Pick> =
        ctl.state().suggestions.iter().cloned().map(Pick::Suggestion).collect();
    picks.push(Pick::Typed(text));

    match Select::new("Matching locations:", picks).prompt()? {
        Pick::Suggestion(entry) => ctl.select_suggestion(&entry).await,
        Pick::Typed(text) => ctl.request_by_city(&text).await,
    }

    Ok(())
}

async fn pick_date(ctl: &mut ForecastViewController) -> Result<(), InquireError> {
    let input = Text::new("Date (YYYY-MM-DD):")
        .with_initial_value(&ctl.state().selected_date)
        .prompt()?;

    match parse_date(&input) {
        Ok(date) => ctl.on_date_change(&date).await,
        Err(e) => println!("{e}"),
    }

    Ok(())
}

fn pick_day(ctl: &mut ForecastViewController) -> Result<(), InquireError> {
    let Some(weather) = &ctl.state().weather else {
        return Ok(());
    };

    let labels: Vec<String> = weather
        .forecast
        .iter()
        .map(|d| format!("{} {}  {}", d.weekday().unwrap_or_default(), d.date, d.condition.text))
        .collect();

    let picked = Select::new("Day:", labels)
        .with_starting_cursor(ctl.state().selected_day_index)
        .raw_prompt()?;
    ctl.select_day(picked.index);

    Ok(())
}

fn open_hour(ctl: &mut ForecastViewController) -> Result<(), InquireError> {
    let labels: Vec<String> = ctl
        .active_hours()
        .iter()
        .map(|h| format!("{} {:.1}°C {}", h.clock(), h.temperature_c, h.condition.text))
        .collect();

    let picked = Select::new("Hour:", labels).raw_prompt()?;
    if let Some(hour) = ctl.active_hours().get(picked.index).cloned() {
        ctl.select_hour(hour);
    }

    Ok(())
}
