//! Sign-in, registration, password reset, logout and the shared OTP
//! verification loop.

use std::time::Duration;

use anyhow::{bail, Result};
use console::{style, Term};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use dialoguer::{Input, Password, Select};
use limpiar_api::types::RegistrationData;
use limpiar_api::{LimpiarClient, PendingVerification, Role, Session, VerificationMode};

use crate::context::AppContext;
use crate::otp::{Cooldown, OtpEntry};

pub async fn login(ctx: &mut AppContext) -> Result<()> {
    ctx.print_header("Sign in to Limpiar");

    let theme = ctx.theme();
    let mut email_prompt = Input::<String>::with_theme(&theme).with_prompt("Email");
    if let Some(remembered) = ctx.store.remembered_email() {
        email_prompt = email_prompt.with_initial_text(remembered);
    }
    let email: String = email_prompt.interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;
    let remember = ctx.confirm("Keep me signed in?", false)?;

    let client = ctx.client();
    let resp = client.login(&email, &password).await?;
    if remember {
        ctx.store.remember_email(Some(email))?;
    }
    if let Some(message) = &resp.message {
        ctx.print_success(message);
    }

    let pending = PendingVerification {
        user_id: Some(resp.user_id),
        phone_number: resp.phone_number,
        mode: VerificationMode::Login,
    };
    ctx.store.set_pending(pending.clone())?;

    let session = run_verification(ctx, &client, pending).await?;
    let name = session.user.full_name.clone();
    ctx.store.set_session(session)?;
    ctx.print_success(&format!("Signed in as {name}"));
    Ok(())
}

/// Staged onboarding: personal information first, then phone verification.
pub async fn register(ctx: &mut AppContext) -> Result<()> {
    ctx.print_header("Create your Limpiar account");
    println!("{}", style("Step 1 of 2 · Personal information").dim());

    let full_name: String = Input::with_theme(&ctx.theme())
        .with_prompt("Full name")
        .interact_text()?;
    let email: String = Input::with_theme(&ctx.theme())
        .with_prompt("Email")
        .interact_text()?;
    let phone_number: String = Input::with_theme(&ctx.theme())
        .with_prompt("Phone number (with country code)")
        .interact_text()?;
    let password = Password::with_theme(&ctx.theme())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    let roles = [Role::PropertyManager, Role::CleaningBusiness, Role::Limpiador];
    let labels: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    let role_idx = Select::with_theme(&ctx.theme())
        .with_prompt("Account type")
        .items(&labels)
        .default(0)
        .interact()?;

    let data = RegistrationData {
        full_name,
        email,
        phone_number: phone_number.clone(),
        password,
        role: roles[role_idx],
    };
    let client = ctx.client();
    let resp = client.register(&data).await?;
    if let Some(message) = &resp.message {
        ctx.print_success(message);
    }

    println!("{}", style("Step 2 of 2 · Phone verification").dim());
    let pending = PendingVerification {
        user_id: None,
        phone_number: Some(phone_number),
        mode: VerificationMode::Registration,
    };
    ctx.store.set_pending(pending.clone())?;

    let session = run_verification(ctx, &client, pending).await?;
    let name = session.user.full_name.clone();
    ctx.store.set_session(session)?;
    ctx.print_success(&format!("Welcome to Limpiar, {name}"));
    Ok(())
}

/// Without a token, requests a reset email; with one, sets the new password.
pub async fn reset_password(ctx: &AppContext, token: Option<String>) -> Result<()> {
    match token {
        None => {
            let email: String = Input::with_theme(&ctx.theme())
                .with_prompt("Account email")
                .interact_text()?;
            let resp = ctx.client().request_password_reset(&email).await?;
            ctx.print_success(
                resp.message
                    .as_deref()
                    .unwrap_or("Password reset link sent to your email."),
            );
        }
        Some(token) => {
            let password = Password::with_theme(&ctx.theme())
                .with_prompt("New password")
                .with_confirmation("Confirm new password", "Passwords do not match")
                .interact()?;
            let resp = ctx.client().reset_password(&token, &password).await?;
            ctx.print_success(resp.message.as_deref().unwrap_or("Password reset successful."));
        }
    }
    Ok(())
}

/// Best-effort server notify, then clear the local session no matter what.
pub async fn logout(ctx: &mut AppContext) -> Result<()> {
    if ctx.store.session().is_none() {
        ctx.print_warning("Not signed in.");
        return Ok(());
    }
    if let Ok(client) = ctx.authenticated_client() {
        if let Err(err) = client.logout().await {
            tracing::warn!(error = %err, "server logout failed; clearing local session anyway");
        }
    }
    ctx.store.clear_session()?;
    ctx.print_success("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session() {
        Some(session) => {
            let user = &session.user;
            println!("{} <{}>", style(&user.full_name).bold(), user.email);
            println!("role: {}   phone: {}", user.role, user.phone_number);
        }
        None => ctx.print_warning("Not signed in."),
    }
    Ok(())
}

enum OtpAction {
    Submit(String),
    Resend,
    Cancel,
}

/// Shared OTP loop: collect six digits, submit, resend once the cooldown
/// allows. Retries are unbounded; a failed check clears the boxes and the
/// operator types again.
async fn run_verification(
    ctx: &mut AppContext,
    client: &LimpiarClient,
    mut pending: PendingVerification,
) -> Result<Session> {
    let term = Term::stdout();
    println!();
    println!(
        "Enter the one-time code sent to {}",
        pending
            .phone_number
            .as_deref()
            .map(mask_phone)
            .unwrap_or_else(|| "your phone".to_string())
    );
    println!(
        "{}",
        style("type the digits · enter to confirm · r to resend · esc to cancel").dim()
    );

    let mut entry = OtpEntry::new();
    let mut cooldown = Cooldown::start();

    loop {
        match prompt_code(&term, &mut entry, &cooldown)? {
            OtpAction::Submit(code) => {
                let Some(phone) = pending.phone_number.clone() else {
                    ctx.print_error("No phone number on file; request a new code with r first.");
                    entry.clear();
                    continue;
                };
                match client.verify_otp(pending.mode, &phone, &code).await {
                    Ok(resp) => {
                        return Ok(Session {
                            token: resp.token,
                            user: resp.user,
                        })
                    }
                    Err(err) => {
                        ctx.print_error(&err.user_message());
                        entry.clear();
                    }
                }
            }
            OtpAction::Resend => match client.resend_otp(&pending).await {
                Ok(resp) => {
                    cooldown.reset();
                    entry.clear();
                    if let Some(user_id) = resp.user_id {
                        pending.user_id = Some(user_id);
                    }
                    if let Some(phone) = resp.phone_number {
                        pending.phone_number = Some(phone);
                    }
                    ctx.store.set_pending(pending.clone())?;
                    ctx.print_success(
                        resp.message.as_deref().unwrap_or("A new code is on its way."),
                    );
                }
                Err(err) => ctx.print_error(&err.user_message()),
            },
            OtpAction::Cancel => bail!("Verification cancelled"),
        }
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Key loop for the six boxes. Polls so the countdown redraws about once a
/// second even with no key pressed.
fn prompt_code(term: &Term, entry: &mut OtpEntry, cooldown: &Cooldown) -> Result<OtpAction> {
    let _raw = RawMode::enable()?;
    let mut needs_redraw = true;
    let mut last_remaining = cooldown.remaining_secs();

    loop {
        let remaining = cooldown.remaining_secs();
        if remaining != last_remaining {
            last_remaining = remaining;
            needs_redraw = true;
        }
        if needs_redraw {
            redraw(term, entry, cooldown)?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                entry.push(c);
                needs_redraw = true;
            }
            KeyCode::Char('r' | 'R') if cooldown.ready() => {
                finish_line(term)?;
                return Ok(OtpAction::Resend);
            }
            KeyCode::Backspace => {
                entry.backspace();
                needs_redraw = true;
            }
            KeyCode::Enter => {
                if let Some(code) = entry.code() {
                    finish_line(term)?;
                    return Ok(OtpAction::Submit(code));
                }
            }
            KeyCode::Esc => {
                finish_line(term)?;
                return Ok(OtpAction::Cancel);
            }
            _ => {}
        }
    }
}

fn redraw(term: &Term, entry: &OtpEntry, cooldown: &Cooldown) -> Result<()> {
    let boxes = entry
        .digits()
        .enumerate()
        .map(|(i, digit)| {
            let ch = digit.map(|d| char::from(b'0' + d)).unwrap_or('_');
            if i == entry.cursor() {
                style(format!("[{ch}]")).bold().to_string()
            } else {
                format!(" {ch} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let hint = if cooldown.ready() {
        style("press r to resend".to_string()).cyan().to_string()
    } else {
        style(format!("resend in {}s", cooldown.remaining_secs()))
            .dim()
            .to_string()
    };
    term.clear_line()?;
    term.write_str(&format!("\r  {boxes}   {hint}"))?;
    Ok(())
}

fn finish_line(term: &Term) -> Result<()> {
    term.write_line("")?;
    Ok(())
}

/// `+15551234567` -> `***-***-4567`, matching the verification screen.
fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }
    let mut last4: Vec<char> = phone.chars().rev().take(4).collect();
    last4.reverse();
    format!("***-***-{}", last4.into_iter().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use limpiar_api::types::{Role, User};
    use limpiar_api::SessionStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_user() -> User {
        User {
            id: "u-1".into(),
            full_name: "Ada Admin".into(),
            email: "ada@limpiar.online".into(),
            phone_number: "+15551230000".into(),
            role: Role::Admin,
            is_verified: true,
            availability: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn signed_in_context(dir: &tempfile::TempDir, api_url: String) -> AppContext {
        let mut store = SessionStore::open(dir.path().join("state.json")).unwrap();
        store
            .set_session(Session {
                token: "tok-abc".into(),
                user: sample_user(),
            })
            .unwrap();
        AppContext::from_parts(store, Some(api_url))
    }

    #[test]
    fn mask_phone_keeps_last_four() {
        assert_eq!(mask_phone("+15551234567"), "***-***-4567");
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("123"), "***-***-123");
    }

    #[tokio::test]
    async fn logout_clears_session_when_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut ctx = signed_in_context(&dir, server.uri());
        logout(&mut ctx).await.unwrap();

        assert!(ctx.store.session().is_none());
        let reopened = SessionStore::open(dir.path().join("state.json")).unwrap();
        assert!(reopened.session().is_none());
    }

    #[tokio::test]
    async fn logout_clears_session_when_server_accepts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Logged out"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut ctx = signed_in_context(&dir, server.uri());
        logout(&mut ctx).await.unwrap();
        assert!(ctx.store.session().is_none());
    }

    #[tokio::test]
    async fn logout_without_session_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("state.json")).unwrap();
        let mut ctx = AppContext::from_parts(store, None);
        logout(&mut ctx).await.unwrap();
        assert!(ctx.store.session().is_none());
    }
}
