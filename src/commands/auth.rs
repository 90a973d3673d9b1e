use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::App;
use crate::guard::Route;
use crate::services::RegisterRequest;

#[derive(Args)]
pub struct LoginCommand {
    /// Email address; prompted for when omitted
    #[arg(short, long)]
    email: Option<String>,

    /// Password; prompted for when omitted
    #[arg(long, env = "SPORTS_CONSOLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, app: &mut App) -> Result<()> {
        app.enter(Route::Login)?;

        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        println!("Logging in as {}...", email);

        match app.services().auth.login(&email, &password).await {
            Ok(session) => {
                println!("{} Login successful!", "✓".green());
                println!();
                println!("Welcome, {}! (role: {})", session.user.name, session.user.role);
                Ok(())
            }
            Err(e) => {
                println!("{} Login failed: {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, app: &mut App) -> Result<()> {
        if !app.session().is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        app.services().auth.logout().await;
        println!("{} Logged out.", "✓".green());
        Ok(())
    }
}

#[derive(Args)]
pub struct RegisterCommand {
    /// Display name
    #[arg(short, long)]
    name: Option<String>,

    /// Email address
    #[arg(short, long)]
    email: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        let name = match self.name {
            Some(name) => name,
            None => Input::new().with_prompt("Name").interact_text()?,
        };
        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;

        if name.trim().is_empty() || email.trim().is_empty() {
            bail!("Name and email are required");
        }

        let request = RegisterRequest {
            name,
            email,
            password_confirmation: password.clone(),
            password,
        };

        match app.services().auth.register(&request).await {
            Ok(_) => {
                println!("{} Account created.", "✓".green());
                println!("Use 'sports-console login' to sign in.");
                Ok(())
            }
            Err(e) => {
                println!("{} Registration failed: {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, app: &App) -> Result<()> {
        if !app.session().is_authenticated() {
            println!("You are not logged in.");
            println!();
            println!("Use 'sports-console login' to authenticate.");
            return Ok(());
        }

        let Some(user) = app.session().current_user() else {
            println!("{} Authenticated, but no user profile is stored.", "✓".green());
            return Ok(());
        };

        println!("{} Authenticated as:", "✓".green());
        println!();
        println!("  Name:    {}", user.name);
        if let Some(email) = &user.email {
            println!("  Email:   {}", email);
        }
        println!("  Role:    {}", user.role);
        println!("  User ID: {}", user.id);
        println!(
            "  Manage:  {}",
            if app.views.can_manage() { "yes" } else { "no" }
        );

        Ok(())
    }
}
