use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{DateRange, Payment, PaymentConfirmation, PaymentIntent, PaymentIntentRequest};
use crate::error::PaymentError;
use crate::resources::{PaymentCommand, PaymentQuery};

/// Client for the payments service.
#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
}

impl_client_new!(PaymentClient, Payment);
impl_client_lookup!(PaymentClient, Payment, PaymentError, payment);

impl PaymentClient {
    /// The payments service keys a payment by its order's id.
    pub async fn payment_for_order(&self, order_id: String) -> Result<Payment, PaymentError> {
        self.fetch_payment(order_id).await
    }

    #[instrument(skip(self))]
    pub async fn all_payments(&self) -> Result<Vec<Payment>, PaymentError> {
        debug!("Sending request");
        Ok(self.inner.list(PaymentQuery::All).await?)
    }

    #[instrument(skip(self))]
    pub async fn failed_payments(&self) -> Result<Vec<Payment>, PaymentError> {
        debug!("Sending request");
        Ok(self.inner.list(PaymentQuery::Failed).await?)
    }

    #[instrument(skip(self))]
    pub async fn payments_in_range(&self, range: DateRange) -> Result<Vec<Payment>, PaymentError> {
        debug!("Sending request");
        Ok(self.inner.list(PaymentQuery::Range(range)).await?)
    }

    #[instrument(skip(self))]
    pub async fn payments_for_customer(&self, email: String) -> Result<Vec<Payment>, PaymentError> {
        debug!("Sending request");
        Ok(self.inner.list(PaymentQuery::ForCustomer(email)).await?)
    }

    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_payment_intent(&self, request: PaymentIntentRequest) -> Result<PaymentIntent, PaymentError> {
        info!("Creating payment intent");
        let body = self.inner.run_command(PaymentCommand::CreateIntent(request)).await?;
        Ok(body.json()?)
    }

    /// Forwards a confirmation; the service's reply is returned as-is.
    #[instrument(skip(self, confirmation), fields(order_id = %confirmation.order_id))]
    pub async fn confirm_payment(&self, confirmation: PaymentConfirmation) -> Result<Value, PaymentError> {
        info!("Confirming payment");
        let body = self.inner.run_command(PaymentCommand::Confirm(confirmation)).await?;
        Ok(body.json()?)
    }
}
