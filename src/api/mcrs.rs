use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    ApiResponse, Object, OpenApi,
};
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::mcr::{Mcr, McrPrefixFilterList, McrPrefixListEntry, McrService};

pub struct McrsApi {
    service: Arc<McrService>,
}

impl McrsApi {
    pub fn new(service: Arc<McrService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct CreateMcrRequest {
    pub location_id: u32,
    pub name: String,
    /// Contract term in months: 1, 12, 24 or 36
    pub term: u32,
    /// Port speed in Mbps: 1000, 2500, 5000 or 10000
    pub port_speed: u32,
    pub asn: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct CreatedMcr {
    pub technical_service_uid: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct McrSummary {
    pub uid: String,
    pub name: Option<String>,
    pub provisioning_status: String,
    pub ready: bool,
    pub port_speed: Option<u32>,
    pub location_id: Option<u32>,
    pub asn: Option<u32>,
    pub created_at: Option<String>,
    pub live_at: Option<String>,
}

impl From<Mcr> for McrSummary {
    fn from(mcr: Mcr) -> Self {
        Self {
            ready: mcr.is_ready(),
            asn: mcr.asn(),
            created_at: mcr.created_at().map(|t| t.to_rfc3339()),
            live_at: mcr.live_at().map(|t| t.to_rfc3339()),
            uid: mcr.uid,
            name: mcr.name,
            provisioning_status: mcr.provisioning_status,
            port_speed: mcr.port_speed,
            location_id: mcr.location_id,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct ModifyMcrRequest {
    pub name: String,
    pub cost_centre: Option<String>,
    pub marketplace_visibility: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct PrefixListEntry {
    pub action: String,
    pub prefix: String,
    pub ge: Option<u8>,
    pub le: Option<u8>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct PrefixFilterListRequest {
    pub description: String,
    pub address_family: String,
    pub entries: Vec<PrefixListEntry>,
}

impl From<PrefixFilterListRequest> for McrPrefixFilterList {
    fn from(req: PrefixFilterListRequest) -> Self {
        Self {
            description: req.description,
            address_family: req.address_family,
            entries: req
                .entries
                .into_iter()
                .map(|e| McrPrefixListEntry {
                    action: e.action,
                    prefix: e.prefix,
                    ge: e.ge,
                    le: e.le,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Object)]
pub struct ActionResult {
    pub success: bool,
}

#[derive(ApiResponse)]
pub enum CreateMcrResponse {
    #[oai(status = 201)]
    Created(Json<CreatedMcr>),
}

#[derive(ApiResponse)]
pub enum GetMcrResponse {
    #[oai(status = 200)]
    Ok(Json<McrSummary>),
}

#[derive(ApiResponse)]
pub enum ActionResponse {
    #[oai(status = 200)]
    Ok(Json<ActionResult>),
}

#[OpenApi]
impl McrsApi {
    /// Order a new MCR
    #[oai(path = "/mcrs", method = "post")]
    async fn create_mcr(&self, body: Json<CreateMcrRequest>) -> Result<CreateMcrResponse, poem::Error> {
        let req = body.0;
        let uid = self
            .service
            .buy_mcr(req.location_id, &req.name, req.term, req.port_speed, req.asn)
            .await
            .map_err(AppError::from)?;

        Ok(CreateMcrResponse::Created(Json(CreatedMcr {
            technical_service_uid: uid,
        })))
    }

    #[oai(path = "/mcrs/:id", method = "get")]
    async fn get_mcr(&self, id: Path<String>) -> Result<GetMcrResponse, poem::Error> {
        let mcr = self.service.get_mcr_details(&id.0).await.map_err(AppError::from)?;
        Ok(GetMcrResponse::Ok(Json(mcr.into())))
    }

    #[oai(path = "/mcrs/:id", method = "put")]
    async fn modify_mcr(
        &self,
        id: Path<String>,
        body: Json<ModifyMcrRequest>,
    ) -> Result<ActionResponse, poem::Error> {
        let req = body.0;
        let success = self
            .service
            .modify_mcr(
                &id.0,
                &req.name,
                req.cost_centre.as_deref().unwrap_or_default(),
                req.marketplace_visibility,
            )
            .await
            .map_err(AppError::from)?;
        Ok(ActionResponse::Ok(Json(ActionResult { success })))
    }

    /// Cancel an MCR, immediately when `delete_now` is set
    #[oai(path = "/mcrs/:id", method = "delete")]
    async fn delete_mcr(
        &self,
        id: Path<String>,
        delete_now: Query<Option<bool>>,
    ) -> Result<ActionResponse, poem::Error> {
        let delete_now = delete_now.0.unwrap_or(false);
        info!("Deleting MCR {} (delete_now={})", id.0, delete_now);
        let success = self
            .service
            .delete_mcr(&id.0, delete_now)
            .await
            .map_err(AppError::from)?;
        Ok(ActionResponse::Ok(Json(ActionResult { success })))
    }

    #[oai(path = "/mcrs/:id/restore", method = "post")]
    async fn restore_mcr(&self, id: Path<String>) -> Result<ActionResponse, poem::Error> {
        let success = self.service.restore_mcr(&id.0).await.map_err(AppError::from)?;
        Ok(ActionResponse::Ok(Json(ActionResult { success })))
    }

    #[oai(path = "/mcrs/:id/prefix-lists", method = "post")]
    async fn create_prefix_filter_list(
        &self,
        id: Path<String>,
        body: Json<PrefixFilterListRequest>,
    ) -> Result<ActionResponse, poem::Error> {
        let list = McrPrefixFilterList::from(body.0);
        let success = self
            .service
            .create_prefix_filter_list(&id.0, &list)
            .await
            .map_err(AppError::from)?;
        Ok(ActionResponse::Ok(Json(ActionResult { success })))
    }

    /// Wait for the MCR to finish provisioning
    ///
    /// Holds the request open for up to the configured polling budget and
    /// answers 504 if the MCR is still not ready.
    #[oai(path = "/mcrs/:id/wait", method = "post")]
    async fn wait_for_mcr(&self, id: Path<String>) -> Result<GetMcrResponse, poem::Error> {
        self.service
            .wait_for_provisioning(&id.0)
            .await
            .map_err(AppError::from)?;
        let mcr = self.service.get_mcr_details(&id.0).await.map_err(AppError::from)?;
        Ok(GetMcrResponse::Ok(Json(mcr.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_details() {
        let mcr: Mcr = serde_json::from_value(serde_json::json!({
            "productUid": "mcr-1",
            "productName": "edge",
            "provisioningStatus": "LIVE",
            "createDate": 0,
            "resources": { "virtual_router": { "mcrAsn": 64512 } }
        }))
        .unwrap();

        let summary = McrSummary::from(mcr);
        assert_eq!(summary.uid, "mcr-1");
        assert!(summary.ready);
        assert_eq!(summary.asn, Some(64512));
        assert_eq!(summary.created_at.as_deref(), Some("1970-01-01T00:00:00+00:00"));
        assert_eq!(summary.live_at, None);
    }

    #[test]
    fn test_prefix_request_conversion() {
        let req = PrefixFilterListRequest {
            description: "d".to_string(),
            address_family: "IPv6".to_string(),
            entries: vec![PrefixListEntry {
                action: "deny".to_string(),
                prefix: "fd00::/8".to_string(),
                ge: None,
                le: Some(64),
            }],
        };
        let list = McrPrefixFilterList::from(req);
        assert_eq!(list.address_family, "IPv6");
        assert_eq!(list.entries[0].le, Some(64));
    }
}
