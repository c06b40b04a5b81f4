use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use client::{Controller, LoginForm, SignupForm, TokenStore, ViewState};
use rpassword::prompt_password;

use crate::display;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Display name for the new account (prompted when omitted)
    #[arg(long, short)]
    pub name: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(long, short)]
    pub email: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(long, short)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address (prompted when omitted)
    #[arg(long, short)]
    pub email: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(long, short)]
    pub password: Option<String>,
}

pub async fn signup<S: TokenStore>(
    controller: &mut Controller<S>,
    args: SignupArgs,
) -> Result<bool> {
    let form = SignupForm {
        name: value_or_prompt(args.name, "Name: ")?,
        email: value_or_prompt(args.email, "Email: ")?,
        password: password_or_prompt(args.password)?,
    };
    controller.show_signup();
    controller.signup(&form).await;
    Ok(!controller.status().is_error())
}

pub async fn login<S: TokenStore>(controller: &mut Controller<S>, args: LoginArgs) -> Result<bool> {
    let form = LoginForm {
        email: value_or_prompt(args.email, "Email: ")?,
        password: password_or_prompt(args.password)?,
    };
    controller.login(&form).await;
    if controller.view() == ViewState::TodoList {
        display::print_rows(controller.rows());
    }
    Ok(!controller.status().is_error())
}

pub fn logout<S: TokenStore>(controller: &mut Controller<S>) -> bool {
    controller.logout();
    true
}

/// Runs the startup decision and reports where it landed.
pub async fn status<S: TokenStore>(controller: &mut Controller<S>) -> bool {
    controller.bootstrap().await;
    display::print_panel(controller);
    !controller.status().is_error()
}

pub(crate) fn value_or_prompt(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(message),
    }
}

pub(crate) fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt_password("Password: ").context("failed to read password"),
    }
}

/// Reads one line from stdin. End of input yields an empty string, which the
/// form validation then reports.
pub(crate) fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
