use anyhow::{bail, Result};
use dialoguer::Input;

use super::entity::{print_refs, prompt_text, Prompted};
use super::App;
use crate::guard::Route;
use crate::mock::DataMode;
use crate::models::{Sport, SportDraft};
use crate::views::ReferenceData;

impl Prompted for Sport {
    fn list_route() -> Route {
        Route::Sports
    }

    fn detail_route(id: i64) -> Route {
        Route::SportDetail(id)
    }

    fn print_details(&self, _app: &App, _mode: DataMode) {
        println!("{}", self);
        println!();
        println!("  Federation:  {}", self.federation);
        if let Some(description) = &self.description {
            println!("  Description: {}", description);
        }
        print_refs("Athletes", self.athletes.iter().map(|a| a.name.as_str()));
        print_refs("Coaches", self.coaches.iter().map(|c| c.name.as_str()));
    }

    async fn prompt_draft(initial: SportDraft, _refs: &ReferenceData) -> Result<SportDraft> {
        let name = prompt_text("Name", &initial.name)?;
        let federation = prompt_text("Federation", &initial.federation)?;
        let description: String = Input::new()
            .with_prompt("Description")
            .with_initial_text(initial.description.as_deref().unwrap_or(""))
            .allow_empty(true)
            .interact_text()?;

        if name.is_empty() || federation.is_empty() {
            bail!("Name and federation are required");
        }

        Ok(SportDraft {
            name,
            federation,
            description: Some(description.trim().to_string()).filter(|d| !d.is_empty()),
        })
    }
}
