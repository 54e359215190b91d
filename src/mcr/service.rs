use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::mcr::error::McrError;
use crate::mcr::models::*;
use crate::mcr::provisioning::{PollConfig, ProvisionObserver, TracingObserver};
use crate::mcr::validation::OrderValidator;
use crate::megaport::{MegaportClient, MegaportError, ProductService};

/// Lifecycle management of Megaport Cloud Routers
///
/// Stateless: every call builds its own request and decodes its own
/// response. Reads go straight through [`MegaportClient`]; ordering and the
/// generic product actions go through the injected [`ProductService`].
pub struct McrService {
    client: Arc<MegaportClient>,
    products: Arc<dyn ProductService>,
    validator: OrderValidator,
    poll_config: PollConfig,
}

impl McrService {
    pub fn new(client: Arc<MegaportClient>, products: Arc<dyn ProductService>) -> Self {
        Self {
            client,
            products,
            validator: OrderValidator::new(),
            poll_config: PollConfig::default(),
        }
    }

    pub fn with_poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }

    pub fn poll_config(&self) -> &PollConfig {
        &self.poll_config
    }

    /// Purchase an MCR and return its technical service UID.
    ///
    /// Not idempotent: every successful call provisions a new, billable
    /// router. Invalid term or port speed is rejected before any request is
    /// made. An ASN of `None` or `Some(0)` leaves the ASN unset.
    pub async fn buy_mcr(
        &self,
        location_id: u32,
        name: &str,
        term: u32,
        port_speed: u32,
        asn: Option<u32>,
    ) -> Result<String, McrError> {
        self.validator.validate(term, port_speed)?;

        let order = vec![McrOrder::new(location_id, name, term, port_speed, asn)];
        let request_body = serde_json::to_vec(&order).map_err(McrError::SerializationError)?;

        let body = self.products.execute_order(request_body).await?;

        let order_info: McrOrderResponse = serde_json::from_slice(&body)
            .map_err(|e| McrError::MalformedResponse(format!("order response: {}", e)))?;

        let uid = order_info
            .data
            .into_iter()
            .next()
            .map(|confirmation| confirmation.technical_service_uid)
            .ok_or_else(|| McrError::MalformedResponse("order response contained no items".to_string()))?;

        info!("Ordered MCR {:?} at location {}: {}", name, location_id, uid);
        Ok(uid)
    }

    /// Fetch a fresh snapshot of an MCR
    pub async fn get_mcr_details(&self, product_uid: &str) -> Result<Mcr, McrError> {
        let path = format!("/v2/product/{}", product_uid);
        let response = self.client.make_api_call(Method::GET, &path, None).await?;
        let response = self.client.is_error_response(response, StatusCode::OK).await?;

        let body = response.bytes().await.map_err(MegaportError::from)?;
        let details: McrResponse = serde_json::from_slice(&body)
            .map_err(|e| McrError::MalformedResponse(format!("MCR details: {}", e)))?;

        Ok(details.data)
    }

    pub async fn modify_mcr(
        &self,
        product_uid: &str,
        name: &str,
        cost_centre: &str,
        marketplace_visibility: bool,
    ) -> Result<bool, McrError> {
        Ok(self
            .products
            .modify_product(product_uid, PRODUCT_MCR, name, cost_centre, marketplace_visibility)
            .await?)
    }

    pub async fn delete_mcr(&self, product_uid: &str, delete_now: bool) -> Result<bool, McrError> {
        Ok(self.products.delete_product(product_uid, delete_now).await?)
    }

    /// Un-delete an MCR that was scheduled for cancellation
    pub async fn restore_mcr(&self, product_uid: &str) -> Result<bool, McrError> {
        Ok(self.products.restore_product(product_uid).await?)
    }

    pub async fn create_prefix_filter_list(
        &self,
        product_uid: &str,
        list: &McrPrefixFilterList,
    ) -> Result<bool, McrError> {
        Ok(self
            .products
            .create_mcr_prefix_filter_list(product_uid, list)
            .await?)
    }

    /// Block until the MCR reaches a ready state, using the service's
    /// poll configuration and logging pending statuses via `tracing`.
    pub async fn wait_for_provisioning(&self, product_uid: &str) -> Result<(), McrError> {
        self.wait_for_provisioning_with(product_uid, &self.poll_config, &TracingObserver)
            .await
    }

    /// Poll the MCR until its status is in [`SERVICE_STATE_READY`].
    ///
    /// A failed read ends the wait immediately with that error; only a
    /// "not ready yet" status is polled again. After `max_attempts` reads
    /// without reaching a ready state this fails with
    /// [`McrError::ProvisionTimeoutExceeded`].
    pub async fn wait_for_provisioning_with(
        &self,
        product_uid: &str,
        poll: &PollConfig,
        observer: &dyn ProvisionObserver,
    ) -> Result<(), McrError> {
        // The fields are public, so a zero budget can bypass PollConfig::new
        let max_attempts = poll.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let details = self.get_mcr_details(product_uid).await?;

            if details.is_ready() {
                debug!("MCR {} ready after {} checks", product_uid, attempt);
                return Ok(());
            }

            observer.on_not_ready(product_uid, attempt, &details.provisioning_status);

            if attempt < max_attempts {
                tokio::time::sleep(poll.interval).await;
            }
        }

        warn!("MCR {} not ready after {} checks", product_uid, max_attempts);
        Err(McrError::ProvisionTimeoutExceeded {
            attempts: max_attempts,
        })
    }
}
