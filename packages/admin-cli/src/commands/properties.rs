//! `limpiar properties` — listing, creation, updates, deletion and the
//! admin verification step that moves a property out of `pending`.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::Input;
use limpiar_api::types::{NewProperty, PropertyUpdate};
use limpiar_api::{Property, PropertyStatus};

use crate::context::AppContext;
use crate::render;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PropertyStatusArg {
    Pending,
    Verified,
}

impl From<PropertyStatusArg> for PropertyStatus {
    fn from(arg: PropertyStatusArg) -> Self {
        match arg {
            PropertyStatusArg::Pending => PropertyStatus::Pending,
            PropertyStatusArg::Verified => PropertyStatus::Verified,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PropertiesCommand {
    /// List properties, optionally one status tab
    List {
        #[arg(long, value_enum)]
        status: Option<PropertyStatusArg>,
        /// Case-insensitive name/address filter, applied client-side
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one property
    Show { id: String },
    /// Create a property (interactive; created pending until verified)
    Create,
    /// Update fields; unset flags are left unchanged
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long = "type")]
        property_type: Option<String>,
        #[arg(long)]
        sub_type: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Delete a property
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Confirm a pending property's creation
    Verify {
        id: String,
        /// The owning property manager's user id
        #[arg(long)]
        manager: String,
    },
}

pub async fn run(ctx: &AppContext, command: PropertiesCommand) -> Result<()> {
    let client = ctx.authenticated_client()?;
    match command {
        PropertiesCommand::List { status, search } => {
            let mut properties = client.list_properties().await?;
            if let Some(status) = status {
                let status: PropertyStatus = status.into();
                properties.retain(|p| p.status == status);
            }
            if let Some(query) = search {
                filter_properties(&mut properties, &query);
            }
            let rows: Vec<Vec<String>> = properties
                .iter()
                .map(|p| {
                    vec![
                        p.name.clone(),
                        p.address.clone(),
                        format!("{}/{}", p.property_type, p.sub_type),
                        p.size.clone(),
                        render::property_status(p.status),
                    ]
                })
                .collect();
            render::table(&["NAME", "ADDRESS", "TYPE", "SIZE", "STATUS"], &rows);
        }
        PropertiesCommand::Show { id } => {
            let property = client.get_property(&id).await?;
            print_property(&property);
        }
        PropertiesCommand::Create => {
            let name: String = Input::with_theme(&ctx.theme())
                .with_prompt("Property name")
                .interact_text()?;
            let address: String = Input::with_theme(&ctx.theme())
                .with_prompt("Address")
                .interact_text()?;
            let property_type: String = Input::with_theme(&ctx.theme())
                .with_prompt("Type (e.g. residential)")
                .interact_text()?;
            let sub_type: String = Input::with_theme(&ctx.theme())
                .with_prompt("Sub-type (e.g. apartment)")
                .interact_text()?;
            let size: String = Input::with_theme(&ctx.theme())
                .with_prompt("Size")
                .interact_text()?;
            let property_manager_id: String = Input::with_theme(&ctx.theme())
                .with_prompt("Property manager user id")
                .interact_text()?;

            let created = client
                .create_property(&NewProperty {
                    name,
                    address,
                    property_type,
                    sub_type,
                    size,
                    property_manager_id: property_manager_id.clone(),
                })
                .await?;
            ctx.print_success(&format!("Created {} ({})", created.name, created.id));
            println!(
                "Pending until verified: limpiar properties verify {} --manager {}",
                created.id, property_manager_id
            );
        }
        PropertiesCommand::Update {
            id,
            name,
            address,
            property_type,
            sub_type,
            size,
        } => {
            let update = PropertyUpdate {
                name,
                address,
                property_type,
                sub_type,
                size,
            };
            let property = client.update_property(&id, &update).await?;
            ctx.print_success(&format!("Updated {}", property.name));
        }
        PropertiesCommand::Delete { id, yes } => {
            if !yes && !ctx.confirm(&format!("Delete property {id}?"), false)? {
                ctx.print_warning("Cancelled.");
                return Ok(());
            }
            let resp = client.delete_property(&id).await?;
            ctx.print_success(resp.message.as_deref().unwrap_or("Property deleted."));
        }
        PropertiesCommand::Verify { id, manager } => {
            let resp = client.verify_property_creation(&id, &manager).await?;
            ctx.print_success(resp.message.as_deref().unwrap_or("Property verified."));
        }
    }
    Ok(())
}

fn print_property(property: &Property) {
    println!("{}", style(&property.name).bold());
    println!("id:      {}", property.id);
    println!("address: {}", property.address);
    println!(
        "type:    {} / {}",
        property.property_type, property.sub_type
    );
    println!("size:    {}", property.size);
    println!("manager: {}", property.property_manager_id);
    println!("status:  {}", render::property_status(property.status));
}

fn filter_properties(properties: &mut Vec<Property>, query: &str) {
    let query = query.to_lowercase();
    properties.retain(|p| {
        p.name.to_lowercase().contains(&query) || p.address.to_lowercase().contains(&query)
    });
}
