//! Booking endpoints. Read-only for now; bookings are created and assigned
//! from the customer-facing apps, not the admin dashboard.

use crate::error::Result;
use crate::types::Booking;
use crate::LimpiarClient;

impl LimpiarClient {
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.get_json("/bookings").await
    }
}
