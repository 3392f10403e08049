//! Payment endpoints. The dashboard only lists transactions; refunds and
//! captures happen on the payment provider's side.

use crate::error::Result;
use crate::types::Payment;
use crate::LimpiarClient;

impl LimpiarClient {
    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.get_json("/payments").await
    }
}
