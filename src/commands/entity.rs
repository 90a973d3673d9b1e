use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::fmt::Display;
use std::path::Path;

use super::App;
use crate::guard::Route;
use crate::mock::DataMode;
use crate::models::PhotoUpload;
use crate::services::parse_id;
use crate::views::{DetailView, ListView, ManagedEntity, ReferenceData};

/// Terminal rendering and form prompts for a managed entity
pub trait Prompted: ManagedEntity + Display {
    fn list_route() -> Route;
    fn detail_route(id: i64) -> Route;

    /// Print everything the detail screen shows
    fn print_details(&self, app: &App, mode: DataMode);

    /// Fill in a draft interactively, starting from `initial`
    fn prompt_draft(
        initial: Self::Draft,
        refs: &ReferenceData,
    ) -> impl std::future::Future<Output = Result<Self::Draft>>;
}

fn detail_route<E: Prompted>(raw_id: &str) -> Route {
    parse_id(raw_id)
        .map(E::detail_route)
        .unwrap_or_else(|_| E::list_route())
}

pub async fn list<E: Prompted>(app: &mut App) -> Result<()> {
    app.enter(E::list_route())?;

    let mut view = ListView::<E>::new(app.views.clone());
    view.load().await;

    if let Some(error) = view.error() {
        bail!("{}", error);
    }

    app.print_mode(view.mode());
    if view.items().is_empty() {
        println!("No {} records.", E::LABEL);
        return Ok(());
    }

    for item in view.items() {
        println!("{}", item);
    }
    println!();
    println!("{} {} record(s)", view.items().len(), E::LABEL);

    Ok(())
}

async fn load_detail<E: Prompted>(app: &mut App, raw_id: &str) -> Result<DetailView<E>> {
    app.enter(detail_route::<E>(raw_id))?;

    let mut view = DetailView::<E>::new(app.views.clone(), raw_id);
    view.load().await;

    if let Some(error) = view.error() {
        bail!("{}", error);
    }
    Ok(view)
}

pub async fn show<E: Prompted>(app: &mut App, raw_id: &str) -> Result<()> {
    let view = load_detail::<E>(app, raw_id).await?;
    app.print_mode(view.mode());

    match view.entity() {
        Some(entity) => entity.print_details(app, view.mode()),
        None => println!("{} not found", E::TITLE),
    }
    Ok(())
}

pub async fn create<E: Prompted>(app: &mut App) -> Result<()> {
    app.enter(E::list_route())?;

    let mut view = ListView::<E>::new(app.views.clone());
    view.load().await;
    app.print_mode(view.mode());

    let initial = view.open_form()?.clone();
    let draft = E::prompt_draft(initial, view.references()).await?;
    if let Some(form) = view.form_mut() {
        *form = draft;
    }

    let created = view.submit().await?;
    println!("{} Created {}", "✓".green(), created);
    if view.mode().is_mock() {
        println!("Mock records only live until this command exits.");
    }
    Ok(())
}

pub async fn edit<E: Prompted>(app: &mut App, raw_id: &str) -> Result<()> {
    let mut view = load_detail::<E>(app, raw_id).await?;
    app.print_mode(view.mode());

    let initial = view.begin_edit()?.clone();
    let draft = E::prompt_draft(initial, view.references()).await?;
    if let Some(form) = view.draft_mut() {
        *form = draft;
    }

    let updated = view.submit_edit().await?;
    println!("{} Updated {}", "✓".green(), updated);
    Ok(())
}

pub async fn delete<E: Prompted>(app: &mut App, raw_id: &str, force: bool) -> Result<()> {
    let mut view = load_detail::<E>(app, raw_id).await?;

    if !view.can_manage() {
        bail!("Only admins and managers can delete a {}", E::LABEL);
    }

    let label = match view.entity() {
        Some(entity) => entity.to_string(),
        None => bail!("{} not found", E::TITLE),
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete {}?", label))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    view.delete().await?;
    app.print_mode(view.mode());
    println!("{} Deleted {}", "✓".green(), label);
    Ok(())
}

/// Choose a sport, or none; the list starts on `current`
pub(super) fn pick_sport(refs: &ReferenceData, current: Option<i64>) -> Result<Option<i64>> {
    let mut labels = vec!["(none)".to_string()];
    labels.extend(refs.sports.iter().map(|s| s.to_string()));

    let default = current
        .and_then(|id| refs.sports.iter().position(|s| s.id == id))
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Sport")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(match choice {
        0 => None,
        n => refs.sports.get(n - 1).map(|s| s.id),
    })
}

/// Toggle a set of related records; `selected` are pre-checked
pub(super) fn pick_related(
    prompt: &str,
    options: &[(i64, String)],
    selected: &[i64],
) -> Result<Vec<i64>> {
    if options.is_empty() {
        println!("No {} available.", prompt.to_lowercase());
        return Ok(selected.to_vec());
    }

    let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();
    let defaults: Vec<bool> = options
        .iter()
        .map(|(id, _)| selected.contains(id))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i].0).collect())
}

/// Ask for a new photo; blank keeps the current one
pub(super) async fn prompt_photo() -> Result<Option<PhotoUpload>> {
    let path: String = Input::new()
        .with_prompt("Photo file (blank to keep current)")
        .allow_empty(true)
        .interact_text()?;

    if path.trim().is_empty() {
        return Ok(None);
    }

    let photo = PhotoUpload::from_path(Path::new(path.trim()))
        .await
        .with_context(|| format!("Failed to read photo {}", path.trim()))?;
    Ok(Some(photo))
}

pub(super) fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Print a reference list under a heading
pub(super) fn print_refs<'a>(heading: &str, names: impl Iterator<Item = &'a str>) {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        println!("  {}: none", heading);
    } else {
        println!("  {}: {}", heading, names.join(", "));
    }
}
