use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::currency;
use crate::shared::ApiError;

/// Sales channel columns of the sales split tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesChannel {
    InHouse,
    OneP,
    DoorDash,
    UberEats,
    Grubhub,
    Catering,
}

impl SalesChannel {
    pub const ALL: [SalesChannel; 6] = [
        SalesChannel::InHouse,
        SalesChannel::OneP,
        SalesChannel::DoorDash,
        SalesChannel::UberEats,
        SalesChannel::Grubhub,
        SalesChannel::Catering,
    ];

    /// Delivery marketplaces, compared against in-house sales.
    pub const THIRD_PARTY: [SalesChannel; 3] = [
        SalesChannel::DoorDash,
        SalesChannel::UberEats,
        SalesChannel::Grubhub,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::InHouse => "In-House",
            Self::OneP => "1P",
            Self::DoorDash => "DoorDash",
            Self::UberEats => "UberEats",
            Self::Grubhub => "Grubhub",
            Self::Catering => "Catering",
        }
    }
}

/// One period of sales (or order counts) split by channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesChannelRow {
    #[serde(alias = "Week", alias = "week")]
    pub period: String,
    #[serde(default, alias = "In-House", deserialize_with = "currency")]
    pub in_house: f64,
    #[serde(default, alias = "1P", deserialize_with = "currency")]
    pub one_p: f64,
    #[serde(default, alias = "DD", deserialize_with = "currency")]
    pub doordash: f64,
    #[serde(default, alias = "UE", deserialize_with = "currency")]
    pub ubereats: f64,
    #[serde(default, alias = "GH", deserialize_with = "currency")]
    pub grubhub: f64,
    #[serde(default, alias = "Catering", deserialize_with = "currency")]
    pub catering: f64,
    #[serde(default, alias = "Grand Total", deserialize_with = "currency")]
    pub grand_total: f64,
}

impl SalesChannelRow {
    pub fn channel(&self, channel: SalesChannel) -> f64 {
        match channel {
            SalesChannel::InHouse => self.in_house,
            SalesChannel::OneP => self.one_p,
            SalesChannel::DoorDash => self.doordash,
            SalesChannel::UberEats => self.ubereats,
            SalesChannel::Grubhub => self.grubhub,
            SalesChannel::Catering => self.catering,
        }
    }

    pub fn third_party(&self) -> f64 {
        SalesChannel::THIRD_PARTY
            .iter()
            .map(|c| self.channel(*c))
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageTicketRow {
    #[serde(alias = "Week", alias = "week")]
    pub period: String,
    #[serde(default, alias = "In-House", deserialize_with = "currency")]
    pub in_house: f64,
    #[serde(default, alias = "Third Party", deserialize_with = "currency")]
    pub third_party: f64,
    #[serde(default, alias = "Overall", deserialize_with = "currency")]
    pub overall: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSalesRow {
    #[serde(alias = "Location")]
    pub location: String,
    #[serde(default, alias = "In-House", deserialize_with = "currency")]
    pub in_house: f64,
    #[serde(default, alias = "Third Party", deserialize_with = "currency")]
    pub third_party: f64,
    #[serde(default, alias = "Grand Total", deserialize_with = "currency")]
    pub grand_total: f64,
}

/// Sales split analytics (`POST /api/excel/upload`, `POST /api/excel/filter`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSplitTables {
    /// Sales dollars per period and channel
    #[serde(rename = "table1", default)]
    pub weekly_sales: Vec<SalesChannelRow>,
    /// Order counts per period and channel
    #[serde(rename = "table2", default)]
    pub weekly_orders: Vec<SalesChannelRow>,
    #[serde(rename = "table3", default)]
    pub average_ticket: Vec<AverageTicketRow>,
    #[serde(rename = "table4", default)]
    pub location_totals: Vec<LocationSalesRow>,
    #[serde(default, alias = "dateRanges")]
    pub date_ranges: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default, alias = "fileName")]
    pub file_name: Option<String>,
}

impl SalesSplitTables {
    /// Reject a payload that carries no table at all.
    pub fn validate(self) -> Result<Self, ApiError> {
        if self.weekly_sales.is_empty()
            && self.weekly_orders.is_empty()
            && self.average_ticket.is_empty()
            && self.location_totals.is_empty()
        {
            return Err(ApiError::Payload("response contains no sales tables".into()));
        }
        Ok(self)
    }
}

/// `POST /api/excel/upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelUploadRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileContent")]
    pub file_content: String,
}

/// `POST /api/excel/filter`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExcelFilterRequest {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}
