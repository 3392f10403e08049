use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account roles in the backend's user taxonomy. `Limpiador` is the
/// domain's label for a cleaner/worker account. Listings spell roles in
/// kebab-case while older registration records use underscores, so both
/// forms deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    #[serde(alias = "property_manager")]
    PropertyManager,
    #[serde(alias = "cleaning_business")]
    CleaningBusiness,
    #[serde(alias = "cleaner")]
    Limpiador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::PropertyManager => "property-manager",
            Role::CleaningBusiness => "cleaning-business",
            Role::Limpiador => "limpiador",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account as returned by the `/users` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial user update (`PUT /users/:id`). Unset fields are omitted from
/// the request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Pending,
    Verified,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Pending => "pending",
            PropertyStatus::Verified => "verified",
        }
    }
}

/// A managed property. Stays `pending` until an admin confirms creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub sub_type: String,
    pub size: String,
    pub property_manager_id: String,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /properties`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub sub_type: String,
    pub size: String,
    pub property_manager_id: String,
}

/// Partial property update (`PUT /properties/:id`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    Failed,
    Refund,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::OnHold => "On Hold",
            BookingStatus::Completed => "Completed",
            BookingStatus::Failed => "Failed",
            BookingStatus::Refund => "Refund",
            BookingStatus::NotStarted => "Not Started",
        }
    }
}

/// A cleaning booking as listed by `GET /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property: String,
    #[serde(default)]
    pub cleaning_business: Option<String>,
    pub service: String,
    pub amount: String,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub additional_note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// The payer fields the backend embeds on each transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    pub full_name: String,
    pub email: String,
}

/// A payment transaction as listed by `GET /payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub payer: Payer,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_intent_id: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /auth/login` response. The OTP itself travels out-of-band; the
/// client only learns which user (and, when the backend includes it, which
/// phone number) the code was sent to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/verify-login` / `verify-register` response: the issued
/// bearer token and the verified user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/resend-otp` response. The backend may return refreshed
/// contact values; callers adopt whichever are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendResponse {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{message}` acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub role: Role,
}
