//! Per-request records: what the language model said, and what survived
//! normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{BldgType, Category, LotConfig, MsZoning};

/// Untrusted extraction output.
///
/// Every field is whatever JSON value the model produced, or `None` when the
/// key was absent or `null`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "MSSubClass", default)]
    pub ms_sub_class: Option<Value>,

    #[serde(rename = "MSZoning", default)]
    pub ms_zoning: Option<Value>,

    #[serde(rename = "LotArea", default)]
    pub lot_area: Option<Value>,

    #[serde(rename = "LotConfig", default)]
    pub lot_config: Option<Value>,

    #[serde(rename = "BldgType", default)]
    pub bldg_type: Option<Value>,

    #[serde(rename = "OverallCond", default)]
    pub overall_cond: Option<Value>,

    #[serde(rename = "YearBuilt", default)]
    pub year_built: Option<Value>,

    #[serde(rename = "TotalBsmtSF", default)]
    pub total_bsmt_sf: Option<Value>,
}

impl RawRecord {
    /// A record with every field missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of fields the model actually filled in.
    pub fn present_count(&self) -> usize {
        [
            &self.ms_sub_class,
            &self.ms_zoning,
            &self.lot_area,
            &self.lot_config,
            &self.bldg_type,
            &self.overall_cond,
            &self.year_built,
            &self.total_bsmt_sf,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Why an extraction response could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnparseableReason {
    /// The text generation call itself failed
    ServiceFailure(String),

    /// Response text was not valid JSON
    InvalidJson(String),

    /// Response was valid JSON but not an object
    NotAnObject,
}

/// Extractor output.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(RawRecord),
    Unparseable(UnparseableReason),
}

impl Extraction {
    /// The raw record to normalize. Unparseable output means every field is
    /// missing.
    pub fn raw(&self) -> RawRecord {
        match self {
            Self::Parsed(raw) => raw.clone(),
            Self::Unparseable(_) => RawRecord::empty(),
        }
    }

    pub fn outcome(&self) -> ExtractionOutcome {
        match self {
            Self::Parsed(_) => ExtractionOutcome::Parsed,
            Self::Unparseable(_) => ExtractionOutcome::Unparseable,
        }
    }
}

/// Serializable summary of an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionOutcome {
    Parsed,
    Unparseable,
}

/// Fully validated feature record. No field is ever missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    #[serde(rename = "MSSubClass")]
    pub ms_sub_class: i64,

    #[serde(rename = "MSZoning")]
    pub ms_zoning: MsZoning,

    #[serde(rename = "LotArea")]
    pub lot_area: i64,

    #[serde(rename = "LotConfig")]
    pub lot_config: LotConfig,

    #[serde(rename = "BldgType")]
    pub bldg_type: BldgType,

    #[serde(rename = "OverallCond")]
    pub overall_cond: i64,

    #[serde(rename = "YearBuilt")]
    pub year_built: i64,

    #[serde(rename = "TotalBsmtSF")]
    pub total_bsmt_sf: f64,
}

impl Default for CleanRecord {
    /// Mean/mode of the training data.
    fn default() -> Self {
        Self {
            ms_sub_class: 20,
            ms_zoning: MsZoning::ResidentialLow,
            lot_area: 9500,
            lot_config: LotConfig::Inside,
            bldg_type: BldgType::SingleFamily,
            overall_cond: 5,
            year_built: 1975,
            total_bsmt_sf: 900.0,
        }
    }
}

impl CleanRecord {
    /// Numeric fields as `(column, value)` pairs.
    pub fn numeric_columns(&self) -> [(&'static str, f64); 5] {
        use super::schema::fields::*;

        [
            (MS_SUB_CLASS, self.ms_sub_class as f64),
            (LOT_AREA, self.lot_area as f64),
            (OVERALL_COND, self.overall_cond as f64),
            (YEAR_BUILT, self.year_built as f64),
            (TOTAL_BSMT_SF, self.total_bsmt_sf),
        ]
    }

    /// Dummy columns set to 1. Baseline values contribute nothing.
    pub fn hot_columns(&self) -> Vec<String> {
        [
            self.ms_zoning.column(),
            self.lot_config.column(),
            self.bldg_type.column(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Reinterpret as untrusted input.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            ms_sub_class: Some(Value::from(self.ms_sub_class)),
            ms_zoning: Some(Value::from(self.ms_zoning.label())),
            lot_area: Some(Value::from(self.lot_area)),
            lot_config: Some(Value::from(self.lot_config.label())),
            bldg_type: Some(Value::from(self.bldg_type.label())),
            overall_cond: Some(Value::from(self.overall_cond)),
            year_built: Some(Value::from(self.year_built)),
            total_bsmt_sf: Some(Value::from(self.total_bsmt_sf)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_null_and_absent_are_missing() {
        let raw: RawRecord = serde_json::from_value(json!({
            "MSZoning": "RL",
            "LotArea": null,
            "Unrelated": 3
        }))
        .unwrap();

        assert_eq!(raw.ms_zoning, Some(json!("RL")));
        assert_eq!(raw.lot_area, None);
        assert_eq!(raw.year_built, None);
        assert_eq!(raw.present_count(), 1);
    }

    #[test]
    fn test_raw_record_keeps_wrong_types() {
        let raw: RawRecord = serde_json::from_value(json!({
            "LotArea": "twelve thousand",
            "BldgType": [1, 2]
        }))
        .unwrap();

        assert_eq!(raw.lot_area, Some(json!("twelve thousand")));
        assert_eq!(raw.bldg_type, Some(json!([1, 2])));
    }

    #[test]
    fn test_unparseable_yields_empty_raw() {
        let extraction = Extraction::Unparseable(UnparseableReason::NotAnObject);
        assert_eq!(extraction.raw(), RawRecord::empty());
        assert_eq!(extraction.outcome(), ExtractionOutcome::Unparseable);
    }

    #[test]
    fn test_clean_record_serializes_with_raw_names() {
        let value = serde_json::to_value(CleanRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "MSSubClass": 20,
                "MSZoning": "RL",
                "LotArea": 9500,
                "LotConfig": "Inside",
                "BldgType": "1Fam",
                "OverallCond": 5,
                "YearBuilt": 1975,
                "TotalBsmtSF": 900.0
            })
        );
    }

    #[test]
    fn test_default_hot_columns() {
        assert_eq!(
            CleanRecord::default().hot_columns(),
            vec!["MSZoning_RL".to_string(), "LotConfig_Inside".to_string()]
        );
    }
}
