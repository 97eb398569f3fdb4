use super::ui;
use crate::providers::ExpenseApiClient;
use crate::store::TokenStore;
use anyhow::{Result, bail};
use console::Term;

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        bail!("Please enter your full name");
    }

    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '\'' || c == '-');
    if !allowed {
        bail!("Name can only contain letters, spaces, hyphens, or apostrophes.");
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        bail!("Please enter a valid email address");
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("Please enter your password");
    }
    if password.chars().count() < 8 {
        bail!("Password must be at least 8 characters long.");
    }
    Ok(())
}

/// Reads a password without echoing it to the terminal.
fn prompt_password(prompt: &str) -> Result<String> {
    let term = Term::stdout();
    term.write_str(prompt)?;
    let password = term.read_secure_line()?;
    Ok(password)
}

pub async fn login(client: &ExpenseApiClient, store: &dyn TokenStore, email: &str) -> Result<()> {
    validate_email(email)?;

    let password = prompt_password("Password: ")?;
    if password.is_empty() {
        bail!("Please enter your password");
    }

    let session = client.login(email, &password).await?;
    store.save(&session.token)?;

    let greeting = session.user_name.unwrap_or_else(|| email.to_string());
    println!(
        "{}",
        ui::style_text(&format!("Logged in as {greeting}"), ui::StyleType::TotalValue)
    );
    Ok(())
}

pub async fn signup(
    client: &ExpenseApiClient,
    store: &dyn TokenStore,
    name: &str,
    email: &str,
) -> Result<()> {
    validate_name(name)?;
    validate_email(email)?;

    let password = prompt_password("Choose a password: ")?;
    validate_password(&password)?;

    let session = client.signup(name.trim(), email, &password).await?;
    store.save(&session.token)?;

    let greeting = session.user_name.unwrap_or_else(|| name.trim().to_string());
    println!(
        "{}",
        ui::style_text(
            &format!("Account created. Logged in as {greeting}"),
            ui::StyleType::TotalValue
        )
    );
    Ok(())
}

pub fn logout(store: &dyn TokenStore) -> Result<()> {
    store.clear()?;
    println!("{}", ui::style_text("Logged out.", ui::StyleType::TotalValue));
    Ok(())
}
