use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Summed volume of every exchange log in one calendar month
#[derive(Debug, Clone, PartialEq, SimpleObject, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeByMonth {
    pub currency: String,
    pub all_volume: f64,
    pub volume_excluding_zero_fee: f64,
}
