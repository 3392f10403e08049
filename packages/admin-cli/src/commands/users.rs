//! `limpiar users` — listing, lookup and profile updates.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use console::style;
use limpiar_api::types::UserUpdate;
use limpiar_api::{Role, User};

use crate::context::AppContext;
use crate::render;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    PropertyManager,
    CleaningBusiness,
    Limpiador,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::PropertyManager => Role::PropertyManager,
            RoleArg::CleaningBusiness => Role::CleaningBusiness,
            RoleArg::Limpiador => Role::Limpiador,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users, optionally scoped to one role tab
    List {
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        /// Case-insensitive name/email filter, applied client-side
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one user
    Show {
        id: String,
        /// Use the role-specific lookup endpoint
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Update profile fields; unset flags are left unchanged
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
}

pub async fn run(ctx: &AppContext, command: UsersCommand) -> Result<()> {
    let client = ctx.authenticated_client()?;
    match command {
        UsersCommand::List { role, search } => {
            let mut users = match role {
                Some(role) => client.list_users_by_role(role.into()).await?,
                None => client.list_users().await?,
            };
            if let Some(query) = search {
                filter_users(&mut users, &query);
            }
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.full_name.clone(),
                        u.email.clone(),
                        u.phone_number.clone(),
                        u.role.to_string(),
                        render::yes_no(u.is_verified),
                        u.created_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            render::table(
                &["NAME", "EMAIL", "PHONE", "ROLE", "VERIFIED", "JOINED"],
                &rows,
            );
        }
        UsersCommand::Show { id, role } => {
            let user = match role {
                Some(role) => client.get_user_by_role(role.into(), &id).await?,
                None => client.get_user(&id).await?,
            };
            print_user(&user);
        }
        UsersCommand::Update {
            id,
            full_name,
            email,
            phone,
            available,
        } => {
            let update = UserUpdate {
                full_name,
                email,
                phone_number: phone,
                availability: available,
            };
            let user = client.update_user(&id, &update).await?;
            ctx.print_success(&format!("Updated {}", user.full_name));
        }
    }
    Ok(())
}

fn print_user(user: &User) {
    println!("{} <{}>", style(&user.full_name).bold(), user.email);
    println!("id:        {}", user.id);
    println!("role:      {}", user.role);
    println!("phone:     {}", user.phone_number);
    println!("verified:  {}", render::yes_no(user.is_verified));
    println!("available: {}", render::yes_no(user.availability));
    println!("joined:    {}", user.created_at.format("%Y-%m-%d"));
}

/// In-memory name/email filter, the same search box behavior as the users
/// screen this replaces.
fn filter_users(users: &mut Vec<User>, query: &str) {
    let query = query.to_lowercase();
    users.retain(|u| {
        u.full_name.to_lowercase().contains(&query) || u.email.to_lowercase().contains(&query)
    });
}
