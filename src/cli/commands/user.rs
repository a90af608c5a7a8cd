use crate::config::Config;
use crate::db::{CreateOutcome, NewAccount};
use crate::services::AuthError;
use crate::state::SharedState;

pub async fn cmd_user_add(
    config: &Config,
    username: &str,
    display_name: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let account = NewAccount {
        username: username.to_string(),
        display_name: display_name.to_string(),
        password: password.to_string(),
        is_admin,
    };

    match state.auth_service.create_account(account).await {
        Ok(CreateOutcome::Created(created)) => {
            let role = if created.is_admin { "admin" } else { "staff" };
            println!(
                "✓ Created {} account '{}' ({})",
                role, created.username, created.display_name
            );
        }
        Ok(CreateOutcome::DuplicateUsername) => {
            let username = username.trim();
            match state.store.get_account_by_username(username).await? {
                Some(owner) => println!(
                    "Username '{}' is already taken by {}.",
                    username, owner.display_name
                ),
                None => println!("Username '{username}' is already taken."),
            }
        }
        Err(AuthError::Validation(msg)) => println!("{msg}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let accounts = state.store.list_accounts().await?;

    println!("Accounts ({} total)", accounts.len());
    println!("{:-<50}", "");

    for account in accounts {
        let role = if account.is_admin { "Admin" } else { "Staff" };
        println!(
            "{:>3}  {:<16} {:<24} {}",
            account.id, account.username, account.display_name, role
        );
    }

    Ok(())
}
