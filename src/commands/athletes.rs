use anyhow::{bail, Result};
use dialoguer::{Input, Select};

use super::entity::{pick_related, pick_sport, print_refs, prompt_photo, prompt_text, Prompted};
use super::App;
use crate::guard::Route;
use crate::mock::DataMode;
use crate::models::athlete::{MAX_AGE, MIN_AGE};
use crate::models::{Athlete, AthleteDraft, Category};
use crate::views::{resolve_photo_url, ReferenceData};

impl Prompted for Athlete {
    fn list_route() -> Route {
        Route::Athletes
    }

    fn detail_route(id: i64) -> Route {
        Route::AthleteDetail(id)
    }

    fn print_details(&self, app: &App, mode: DataMode) {
        println!("{}", self);
        println!();
        if let Some(age) = self.age {
            println!("  Age:      {}", age);
        }
        if let Some(category) = self.category {
            println!("  Category: {}", category);
        }
        if let Some(sport) = &self.sport {
            println!("  Sport:    {}", sport.name);
        }
        print_refs("Coaches", self.coaches.iter().map(|c| c.name.as_str()));
        println!(
            "  Photo:    {}",
            resolve_photo_url(self, mode, &app.views.storage_url)
        );
    }

    async fn prompt_draft(initial: AthleteDraft, refs: &ReferenceData) -> Result<AthleteDraft> {
        let name = prompt_text("Name", &initial.name)?;
        if name.is_empty() {
            bail!("Name is required");
        }

        let age: String = Input::new()
            .with_prompt(format!("Age ({}-{})", MIN_AGE, MAX_AGE))
            .with_initial_text(initial.age.map(|a| a.to_string()).unwrap_or_default())
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                match input.trim() {
                    "" => Ok(()),
                    raw => match raw.parse::<u32>() {
                        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(()),
                        _ => Err(format!("Enter an age from {} to {}", MIN_AGE, MAX_AGE)),
                    },
                }
            })
            .interact_text()?;

        let mut categories = vec!["(none)".to_string()];
        categories.extend(Category::ALL.iter().map(|c| c.to_string()));
        let default = initial
            .category
            .and_then(|c| Category::ALL.iter().position(|x| *x == c))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let category = Select::new()
            .with_prompt("Category")
            .items(&categories)
            .default(default)
            .interact()?;

        let sport_id = pick_sport(refs, initial.sport_id)?;

        let options: Vec<(i64, String)> = refs
            .coaches
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        let coaches = pick_related("Coaches", &options, &initial.coaches)?;

        let photo = prompt_photo().await?;

        Ok(AthleteDraft {
            name,
            age: age.trim().parse().ok(),
            category: category.checked_sub(1).and_then(|i| Category::ALL.get(i).copied()),
            sport_id,
            coaches,
            photo,
        })
    }
}
