//! Feature schema: raw fields, category domains, defaults and the encoded
//! column layout the regression models were fitted on.
//!
//! The layout is part of the wire format between training and inference.
//! Reordering fields or changing a domain here without refitting the models
//! silently corrupts predictions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::CleanRecord;

/// Raw field names, as requested from the language model.
pub mod fields {
    pub const MS_SUB_CLASS: &str = "MSSubClass";
    pub const MS_ZONING: &str = "MSZoning";
    pub const LOT_AREA: &str = "LotArea";
    pub const LOT_CONFIG: &str = "LotConfig";
    pub const BLDG_TYPE: &str = "BldgType";
    pub const OVERALL_COND: &str = "OverallCond";
    pub const YEAR_BUILT: &str = "YearBuilt";
    pub const TOTAL_BSMT_SF: &str = "TotalBsmtSF";
}

/// Declared primitive type of a raw field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Categorical,
}

impl FieldKind {
    /// Type hint shown to the language model.
    pub fn type_hint(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float or int",
            Self::Categorical => "string",
        }
    }
}

/// A raw field and its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A categorical field with a closed set of labels.
///
/// `DOMAIN` lists the labels that get a dummy column, in layout order.
/// `BASELINE` is the optional label that encodes as all zeros; it is never
/// part of `DOMAIN`.
pub trait Category: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Raw field name.
    const FIELD: &'static str;

    /// Labels with a dummy column.
    const DOMAIN: &'static [Self];

    /// Label without a dummy column.
    const BASELINE: Option<Self>;

    /// Exact label as it appears in prompts, JSON and column names.
    fn label(self) -> &'static str;

    /// Exact, case-sensitive lookup over domain and baseline.
    fn from_label(label: &str) -> Option<Self> {
        Self::DOMAIN
            .iter()
            .copied()
            .chain(Self::BASELINE)
            .find(|c| c.label() == label)
    }

    fn is_baseline(self) -> bool {
        Self::BASELINE == Some(self)
    }

    /// Name of this value's dummy column, `None` for the baseline.
    fn column(self) -> Option<String> {
        if self.is_baseline() {
            None
        } else {
            Some(dummy_column(Self::FIELD, self.label()))
        }
    }

    /// Describe this category as a schema domain.
    fn domain() -> CategoricalDomain {
        CategoricalDomain {
            field: Self::FIELD,
            categories: Self::DOMAIN.iter().map(|c| c.label()).collect(),
            baseline: Self::BASELINE.map(|c| c.label()),
        }
    }
}

fn dummy_column(field: &str, label: &str) -> String {
    format!("{}_{}", field, label)
}

/// Zoning classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsZoning {
    #[serde(rename = "FV")]
    FloatingVillage,
    #[serde(rename = "RH")]
    ResidentialHigh,
    #[serde(rename = "RL")]
    ResidentialLow,
    #[serde(rename = "RM")]
    ResidentialMedium,
}

impl Category for MsZoning {
    const FIELD: &'static str = fields::MS_ZONING;
    const DOMAIN: &'static [Self] = &[
        Self::FloatingVillage,
        Self::ResidentialHigh,
        Self::ResidentialLow,
        Self::ResidentialMedium,
    ];
    const BASELINE: Option<Self> = None;

    fn label(self) -> &'static str {
        match self {
            Self::FloatingVillage => "FV",
            Self::ResidentialHigh => "RH",
            Self::ResidentialLow => "RL",
            Self::ResidentialMedium => "RM",
        }
    }
}

/// Lot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotConfig {
    #[serde(rename = "CulDSac")]
    CulDeSac,
    #[serde(rename = "FR2")]
    Frontage2,
    #[serde(rename = "FR3")]
    Frontage3,
    Inside,
}

impl Category for LotConfig {
    const FIELD: &'static str = fields::LOT_CONFIG;
    const DOMAIN: &'static [Self] = &[Self::CulDeSac, Self::Frontage2, Self::Frontage3, Self::Inside];
    const BASELINE: Option<Self> = None;

    fn label(self) -> &'static str {
        match self {
            Self::CulDeSac => "CulDSac",
            Self::Frontage2 => "FR2",
            Self::Frontage3 => "FR3",
            Self::Inside => "Inside",
        }
    }
}

/// Dwelling type. Single-family is the baseline and encodes as all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BldgType {
    #[serde(rename = "1Fam")]
    SingleFamily,
    #[serde(rename = "2fmCon")]
    TwoFamilyConversion,
    Duplex,
    #[serde(rename = "Twnhs")]
    TownhouseInside,
    #[serde(rename = "TwnhsE")]
    TownhouseEnd,
}

impl Category for BldgType {
    const FIELD: &'static str = fields::BLDG_TYPE;
    const DOMAIN: &'static [Self] = &[
        Self::TwoFamilyConversion,
        Self::Duplex,
        Self::TownhouseInside,
        Self::TownhouseEnd,
    ];
    const BASELINE: Option<Self> = Some(Self::SingleFamily);

    fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "1Fam",
            Self::TwoFamilyConversion => "2fmCon",
            Self::Duplex => "Duplex",
            Self::TownhouseInside => "Twnhs",
            Self::TownhouseEnd => "TwnhsE",
        }
    }
}

/// Valid labels of one categorical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalDomain {
    pub field: &'static str,
    pub categories: Vec<&'static str>,
    pub baseline: Option<&'static str>,
}

impl CategoricalDomain {
    /// Whether `label` is a domain member or the baseline.
    pub fn accepts(&self, label: &str) -> bool {
        self.categories.contains(&label) || self.baseline == Some(label)
    }

    /// Dummy column names in layout order.
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        self.categories.iter().map(|c| dummy_column(self.field, c))
    }
}

/// Process-wide, immutable feature schema.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    raw_fields: Vec<FieldSpec>,
    categorical_domains: Vec<CategoricalDomain>,
    defaults: CleanRecord,
    encoded_layout: Vec<String>,
    column_index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// The house-price schema the bundled models were fitted on.
    pub fn house_prices() -> Self {
        use FieldKind::*;

        let raw_fields = vec![
            FieldSpec::new(fields::MS_SUB_CLASS, Integer),
            FieldSpec::new(fields::MS_ZONING, Categorical),
            FieldSpec::new(fields::LOT_AREA, Integer),
            FieldSpec::new(fields::LOT_CONFIG, Categorical),
            FieldSpec::new(fields::BLDG_TYPE, Categorical),
            FieldSpec::new(fields::OVERALL_COND, Integer),
            FieldSpec::new(fields::YEAR_BUILT, Integer),
            FieldSpec::new(fields::TOTAL_BSMT_SF, Float),
        ];

        let categorical_domains = vec![MsZoning::domain(), LotConfig::domain(), BldgType::domain()];

        // Numeric columns come first, in the order the models were fitted on.
        let mut encoded_layout: Vec<String> = [
            fields::MS_SUB_CLASS,
            fields::LOT_AREA,
            fields::OVERALL_COND,
            fields::YEAR_BUILT,
            fields::TOTAL_BSMT_SF,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for domain in &categorical_domains {
            encoded_layout.extend(domain.columns());
        }

        let column_index = encoded_layout
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            raw_fields,
            categorical_domains,
            defaults: CleanRecord::default(),
            encoded_layout,
            column_index,
        }
    }

    /// Raw fields in request order.
    pub fn raw_fields(&self) -> &[FieldSpec] {
        &self.raw_fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.raw_fields.iter().map(|f| f.name)
    }

    pub fn categorical_domains(&self) -> &[CategoricalDomain] {
        &self.categorical_domains
    }

    /// Domain of a categorical field.
    pub fn domain(&self, field: &str) -> Option<&CategoricalDomain> {
        self.categorical_domains.iter().find(|d| d.field == field)
    }

    /// Record substituted for anything missing or invalid.
    pub fn defaults(&self) -> &CleanRecord {
        &self.defaults
    }

    /// Output column names, in model input order.
    pub fn encoded_layout(&self) -> &[String] {
        &self.encoded_layout
    }

    /// Number of encoded columns.
    pub fn width(&self) -> usize {
        self.encoded_layout.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::house_prices()
    }
}
