use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

use crate::mcr::models::{McrPrefixFilterList, ProductUpdate};
use crate::megaport::client::MegaportClient;
use crate::megaport::error::MegaportError;

/// Generic per-product operations shared by every Megaport product type
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Submit a serialized order array; returns the raw response body
    async fn execute_order(&self, body: Vec<u8>) -> Result<Vec<u8>, MegaportError>;

    async fn modify_product(
        &self,
        product_uid: &str,
        product_type: &str,
        name: &str,
        cost_centre: &str,
        marketplace_visibility: bool,
    ) -> Result<bool, MegaportError>;

    /// `delete_now` cancels immediately, otherwise at the end of the term
    async fn delete_product(&self, product_uid: &str, delete_now: bool) -> Result<bool, MegaportError>;

    async fn restore_product(&self, product_uid: &str) -> Result<bool, MegaportError>;

    async fn create_mcr_prefix_filter_list(
        &self,
        product_uid: &str,
        list: &McrPrefixFilterList,
    ) -> Result<bool, MegaportError>;
}

/// [`ProductService`] backed by the Megaport REST API
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: Arc<MegaportClient>,
}

impl ProductClient {
    pub fn new(client: Arc<MegaportClient>) -> Self {
        Self { client }
    }

    async fn post_action(&self, product_uid: &str, action: &str) -> Result<bool, MegaportError> {
        let path = format!("/v3/product/{}/action/{}", product_uid, action);
        self.client
            .call_expecting(Method::POST, &path, None, StatusCode::OK)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl ProductService for ProductClient {
    async fn execute_order(&self, body: Vec<u8>) -> Result<Vec<u8>, MegaportError> {
        debug!("Submitting order ({} bytes)", body.len());
        self.client
            .call_expecting(Method::POST, "/v3/networkdesign/buy", Some(body), StatusCode::OK)
            .await
    }

    async fn modify_product(
        &self,
        product_uid: &str,
        product_type: &str,
        name: &str,
        cost_centre: &str,
        marketplace_visibility: bool,
    ) -> Result<bool, MegaportError> {
        let update = ProductUpdate {
            name: name.to_string(),
            cost_centre: cost_centre.to_string(),
            marketplace_visibility,
        };
        let body = serde_json::to_vec(&update)?;
        let path = format!("/v2/product/{}/{}", product_type, product_uid);

        self.client
            .call_expecting(Method::PUT, &path, Some(body), StatusCode::OK)
            .await?;
        info!("Modified {} product {}", product_type, product_uid);
        Ok(true)
    }

    async fn delete_product(&self, product_uid: &str, delete_now: bool) -> Result<bool, MegaportError> {
        let action = if delete_now { "CANCEL_NOW" } else { "CANCEL" };
        self.post_action(product_uid, action).await
    }

    async fn restore_product(&self, product_uid: &str) -> Result<bool, MegaportError> {
        self.post_action(product_uid, "UN_CANCEL").await
    }

    async fn create_mcr_prefix_filter_list(
        &self,
        product_uid: &str,
        list: &McrPrefixFilterList,
    ) -> Result<bool, MegaportError> {
        let body = serde_json::to_vec(list)?;
        let path = format!("/v2/product/mcr2/{}/prefixList", product_uid);
        self.client
            .call_expecting(Method::POST, &path, Some(body), StatusCode::OK)
            .await?;
        Ok(true)
    }
}
