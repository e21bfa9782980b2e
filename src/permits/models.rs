use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// One record of the 5pzm-dn5w dataset. Sample:
//
//  application_type: "Building Permit"
//  contractor_address: "14701 PHILIPS HWY,JACKSONVILLE, FL 32256"
//  contractor_name: "DREAM FINDERS HOMES LLC"
//  contractor_phone_number: "(407)757-0206"
//  estimated_cost: "277800"
//  of_cycles: "1"
//  of_pdoxwkflw: "0"
//  parcel_number: "312431779300010"
//  permit_address: "18303 MOWRY CT"
//  permit_number: "BLD2023-12771"
//  plan_review_type: "Residential 1/2"
//  prescreen_completed_date: "2023-03-07T00:00:00.000"
//  processed_date: "2023-03-07T00:00:00.000"
//  under_review_date: "2023-03-07T00:00:00.000"
//  worktype: "New"

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Permit {
    pub permit_number: String,
    pub parcel_number: String,

    #[serde(default)]
    pub application_type: String,
    pub worktype: Option<String>,

    pub permit_address: Option<String>,
    pub property_owner_name: Option<String>,
    pub parcel_owner_name: Option<String>,
    pub contractor: Option<String>,
    pub contractor_name: Option<String>,
    pub contractor_address: Option<String>,
    pub contractor_phone_number: Option<String>,
    pub plan_review_type: Option<String>,
    pub estimated_cost: Option<String>,
    pub of_cycles: Option<String>,
    pub of_pdoxwkflw: Option<String>,

    // Milestones. Every permit seems to carry `processed_date`, the rest show
    // up as the permit moves through review.
    #[serde(default, with = "socrata_date")]
    pub processed_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub under_review_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub prescreen_completed_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub review_started_including: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub review_started_date_excluding: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub collect_permit_fees_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub pending_issuance_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub issue_permit_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub pdoxbatch_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub final_date: Option<NaiveDateTime>,
    #[serde(default, with = "socrata_date")]
    pub coo_date: Option<NaiveDateTime>,
}

impl Permit {
    /// Minimal permit, used by fixtures and tests.
    #[cfg(test)]
    pub fn new(permit_number: impl Into<String>, parcel_number: impl Into<String>) -> Self {
        Self {
            permit_number: permit_number.into(),
            parcel_number: parcel_number.into(),
            application_type: String::new(),
            worktype: None,
            permit_address: None,
            property_owner_name: None,
            parcel_owner_name: None,
            contractor: None,
            contractor_name: None,
            contractor_address: None,
            contractor_phone_number: None,
            plan_review_type: None,
            estimated_cost: None,
            of_cycles: None,
            of_pdoxwkflw: None,
            processed_date: None,
            under_review_date: None,
            prescreen_completed_date: None,
            review_started_including: None,
            review_started_date_excluding: None,
            collect_permit_fees_date: None,
            pending_issuance_date: None,
            issue_permit_date: None,
            pdoxbatch_date: None,
            final_date: None,
            coo_date: None,
        }
    }

    /// Address, ignoring blank values.
    pub fn address(&self) -> Option<&str> {
        self.permit_address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Socrata floating timestamps look like `2023-03-07T00:00:00.000`.
/// Values that don't parse are treated as missing.
pub mod socrata_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| {
                chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
            })
            .ok()
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
