//! Application context: the session store, the backend origin and themed
//! output helpers shared by every command.

use anyhow::{Context as _, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use limpiar_api::{LimpiarClient, Session, SessionStore, DEFAULT_BASE_URL};

pub struct AppContext {
    pub store: SessionStore,
    base_url: String,
}

impl AppContext {
    pub fn new(api_url: Option<String>, state_file: Option<std::path::PathBuf>) -> Result<Self> {
        let store = match state_file {
            Some(path) => SessionStore::open(path),
            None => SessionStore::open_default(),
        }
        .context("Failed to open session store")?;
        Ok(Self::from_parts(store, api_url))
    }

    pub fn from_parts(store: SessionStore, api_url: Option<String>) -> Self {
        Self {
            store,
            base_url: api_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Client without a bearer token, for the auth endpoints.
    pub fn client(&self) -> LimpiarClient {
        LimpiarClient::with_base_url(self.base_url.clone())
    }

    /// Client carrying the stored session token. The one place stored
    /// session state becomes a bearer header.
    pub fn authenticated_client(&self) -> Result<LimpiarClient> {
        let session = self
            .store
            .session()
            .context("Not signed in. Run `limpiar login` first.")?;
        Ok(self.client().with_session(session))
    }

    pub fn session(&self) -> Option<&Session> {
        self.store.session()
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }

    pub fn print_error(&self, msg: &str) {
        eprintln!("{}", style(msg).red());
    }
}
