//! Session commands

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use conecta_core::{App, Registration, SessionError};

pub async fn status(app: &App) -> Result<()> {
    let session = app.initialize().await;
    let route = *app.session().routes().borrow();

    println!("state: {}", session.state);
    println!("route: {route}");
    if session.is_authenticated() {
        println!("simplified mode: {}", session.preferences.simplified_mode);
    }

    Ok(())
}

pub async fn login(app: &App, username: &str, password: &str) -> Result<()> {
    app.initialize().await;

    match app.session().login(username, password).await {
        Ok(session) => {
            println!("Signed in as {username}");
            if session.preferences.simplified_mode {
                println!("Simplified mode is on");
            }
            Ok(())
        }
        Err(SessionError::InvalidCredentials) => bail!("Invalid username or password"),
        Err(e) => Err(e).context("Sign-in failed"),
    }
}

pub async fn logout(app: &App) -> Result<()> {
    app.initialize().await;
    app.session()
        .logout()
        .await
        .context("Signed out, but stored credentials could not be removed")?;

    println!("Signed out");

    Ok(())
}

pub async fn register(app: &App, username: String, password: String, birth_date: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        bail!("Username and password are required");
    }

    let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .with_context(|| format!("Invalid birth date {birth_date:?}, expected YYYY-MM-DD"))?;

    let registration = Registration {
        username,
        password,
        birth_date,
    };
    app.session()
        .register(&registration)
        .await
        .context("Registration failed")?;

    println!("Account {} created, you can now sign in", registration.username);

    Ok(())
}
