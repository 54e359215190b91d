use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Product type tag used when ordering a router
pub const MCR_ORDER_TYPE: &str = "MCR2";

/// Product type tag used by the generic product endpoints
pub const PRODUCT_MCR: &str = "mcr2";

/// Provisioning states that count as "ready"
pub const SERVICE_STATE_READY: &[&str] = &["CONFIGURED", "LIVE"];

/// Whether a provisioning status belongs to the ready-state set
pub fn is_ready_state(status: &str) -> bool {
    SERVICE_STATE_READY.contains(&status)
}

// ========== Ordering ==========

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McrOrderConfig {
    #[serde(rename = "mcrAsn", skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
}

impl McrOrderConfig {
    /// Zero is not a usable ASN, so it collapses to "unset"
    pub fn with_asn(asn: Option<u32>) -> Self {
        Self {
            asn: asn.filter(|asn| *asn != 0),
        }
    }
}

/// A single router purchase line, as submitted in the order array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McrOrder {
    pub location_id: u32,
    #[serde(rename = "productName")]
    pub name: String,
    pub term: u32,
    #[serde(rename = "productType")]
    pub product_type: String,
    pub port_speed: u32,
    pub config: McrOrderConfig,
}

impl McrOrder {
    pub fn new(location_id: u32, name: impl Into<String>, term: u32, port_speed: u32, asn: Option<u32>) -> Self {
        Self {
            location_id,
            name: name.into(),
            term,
            product_type: MCR_ORDER_TYPE.to_string(),
            port_speed,
            config: McrOrderConfig::with_asn(asn),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McrOrderConfirmation {
    #[serde(rename = "technicalServiceUid")]
    pub technical_service_uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McrOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    pub data: Vec<McrOrderConfirmation>,
}

// ========== Details ==========

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McrVirtualRouter {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "mcrAsn", default)]
    pub asn: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "resource_name")]
    pub resource_name: Option<String>,
    #[serde(default, alias = "resource_type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub speed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McrResources {
    #[serde(default)]
    pub virtual_router: Option<McrVirtualRouter>,
}

/// Snapshot of a router as reported by `GET /v2/product/{uid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcr {
    #[serde(rename = "productUid")]
    pub uid: String,
    pub provisioning_status: String,
    #[serde(rename = "productId", default)]
    pub id: Option<u64>,
    #[serde(rename = "productName", default)]
    pub name: Option<String>,
    #[serde(rename = "productType", default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub create_date: Option<i64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub port_speed: Option<u32>,
    #[serde(default)]
    pub terminate_date: Option<i64>,
    #[serde(default)]
    pub live_date: Option<i64>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub location_id: Option<u32>,
    #[serde(default)]
    pub usage_algorithm: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marketplace_visibility: bool,
    #[serde(rename = "vxcpermitted", default, deserialize_with = "null_as_default")]
    pub vxc_permitted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vxc_auto_approval: bool,
    #[serde(default)]
    pub secondary_name: Option<String>,
    #[serde(default)]
    pub company_uid: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contract_start_date: Option<i64>,
    #[serde(default)]
    pub contract_end_date: Option<i64>,
    #[serde(default)]
    pub contract_term_months: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribute_tags: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub r#virtual: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buyout_port: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cancelable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: McrResources,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn from_epoch_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

impl Mcr {
    pub fn is_ready(&self) -> bool {
        is_ready_state(&self.provisioning_status)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.create_date)
    }

    pub fn live_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.live_date)
    }

    pub fn terminates_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_millis(self.terminate_date)
    }

    /// ASN the virtual router was provisioned with, if reported
    pub fn asn(&self) -> Option<u32> {
        self.resources.virtual_router.as_ref().and_then(|vr| vr.asn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McrResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
    pub data: Mcr,
}

// ========== Product management ==========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub cost_centre: String,
    pub marketplace_visibility: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McrPrefixListEntry {
    pub action: String,
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McrPrefixFilterList {
    pub description: String,
    pub address_family: String,
    pub entries: Vec<McrPrefixListEntry>,
}
