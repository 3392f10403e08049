//! User account endpoints.
//!
//! The backend exposes role-scoped listings alongside the generic ones;
//! there is no scoped listing for admins, so that case filters the full
//! list client-side.

use crate::error::Result;
use crate::types::{Role, User, UserUpdate};
use crate::LimpiarClient;

impl LimpiarClient {
    /// All users, every role.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/users").await
    }

    /// Users of one role, via the role-scoped listing where one exists.
    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        let path = match role {
            Role::PropertyManager => "/users/property-managers",
            Role::CleaningBusiness => "/users/cleaning-businesses",
            Role::Limpiador => "/users/cleaners",
            Role::Admin => {
                let mut users = self.list_users().await?;
                users.retain(|u| u.role == Role::Admin);
                return Ok(users);
            }
        };
        self.get_json(path).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.get_json(&format!("/users/{id}")).await
    }

    /// One user via the role-specific lookup (`/users/property-manager/:id`
    /// and friends); admins only have the generic route.
    pub async fn get_user_by_role(&self, role: Role, id: &str) -> Result<User> {
        let path = match role {
            Role::PropertyManager => format!("/users/property-manager/{id}"),
            Role::CleaningBusiness => format!("/users/cleaning-business/{id}"),
            Role::Limpiador => format!("/users/cleaner/{id}"),
            Role::Admin => format!("/users/{id}"),
        };
        self.get_json(&path).await
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User> {
        self.put_json(&format!("/users/{id}"), update).await
    }
}
