use anyhow::{bail, Result};
use dialoguer::{Input, Select};

use super::entity::{pick_related, pick_sport, print_refs, prompt_photo, Prompted};
use super::App;
use crate::guard::Route;
use crate::mock::DataMode;
use crate::models::{is_valid_license, Coach, CoachDraft, Specialty};
use crate::views::{resolve_photo_url, ReferenceData};

impl Prompted for Coach {
    fn list_route() -> Route {
        Route::Coaches
    }

    fn detail_route(id: i64) -> Route {
        Route::CoachDetail(id)
    }

    fn print_details(&self, app: &App, mode: DataMode) {
        println!("{}", self);
        println!();
        println!("  License:   {}", self.license);
        if let Some(specialty) = self.specialty {
            println!("  Specialty: {}", specialty);
        }
        if let Some(sport) = &self.sport {
            println!("  Sport:     {}", sport.name);
        }
        print_refs("Athletes", self.athletes.iter().map(|a| a.name.as_str()));
        println!(
            "  Photo:     {}",
            resolve_photo_url(self, mode, &app.views.storage_url)
        );
    }

    async fn prompt_draft(initial: CoachDraft, refs: &ReferenceData) -> Result<CoachDraft> {
        let name: String = Input::new()
            .with_prompt("Name")
            .with_initial_text(initial.name.clone())
            .interact_text()?;
        if name.trim().is_empty() {
            bail!("Name is required");
        }

        let license: String = Input::new()
            .with_prompt("License (e.g. CREF-123-456)")
            .with_initial_text(initial.license.clone())
            .validate_with(|input: &String| -> Result<(), &str> {
                if is_valid_license(input.trim()) {
                    Ok(())
                } else {
                    Err("License must look like CREF-<digits>-<digits>")
                }
            })
            .interact_text()?;

        let mut specialties = vec!["(none)".to_string()];
        specialties.extend(Specialty::ALL.iter().map(|s| s.to_string()));
        let default = initial
            .specialty
            .and_then(|s| Specialty::ALL.iter().position(|x| *x == s))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let specialty = Select::new()
            .with_prompt("Specialty")
            .items(&specialties)
            .default(default)
            .interact()?;

        let sport_id = pick_sport(refs, initial.sport_id)?;

        let options: Vec<(i64, String)> = refs
            .athletes
            .iter()
            .map(|a| (a.id, a.name.clone()))
            .collect();
        let athletes = pick_related("Athletes", &options, &initial.athletes)?;

        let photo = prompt_photo().await?;

        Ok(CoachDraft {
            name: name.trim().to_string(),
            license: license.trim().to_string(),
            specialty: specialty.checked_sub(1).and_then(|i| Specialty::ALL.get(i).copied()),
            sport_id,
            athletes,
            photo,
        })
    }
}
