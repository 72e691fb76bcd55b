//! Normalization: untrusted raw values to a complete, typed record.
//!
//! The coercion functions are fallible and return `None`; the normalizer
//! alone decides the fallback, which is always the field's default.

use serde_json::Value;
use tracing::debug;

use crate::types::record::{CleanRecord, Extraction, RawRecord};
use crate::types::schema::{fields, Category};

/// Normalize an extraction. Unparseable output yields the all-defaults record.
pub fn normalize(extraction: &Extraction) -> CleanRecord {
    normalize_raw(&extraction.raw())
}

/// Normalize a raw record. Total: never fails, never leaves a field empty.
pub fn normalize_raw(raw: &RawRecord) -> CleanRecord {
    let defaults = CleanRecord::default();

    CleanRecord {
        ms_sub_class: field(fields::MS_SUB_CLASS, &raw.ms_sub_class, coerce_int, defaults.ms_sub_class),
        ms_zoning: field(fields::MS_ZONING, &raw.ms_zoning, coerce_category, defaults.ms_zoning),
        lot_area: field(fields::LOT_AREA, &raw.lot_area, coerce_int, defaults.lot_area),
        lot_config: field(fields::LOT_CONFIG, &raw.lot_config, coerce_category, defaults.lot_config),
        bldg_type: field(fields::BLDG_TYPE, &raw.bldg_type, coerce_category, defaults.bldg_type),
        overall_cond: field(fields::OVERALL_COND, &raw.overall_cond, coerce_int, defaults.overall_cond),
        year_built: field(fields::YEAR_BUILT, &raw.year_built, coerce_int, defaults.year_built),
        total_bsmt_sf: field(fields::TOTAL_BSMT_SF, &raw.total_bsmt_sf, coerce_float, defaults.total_bsmt_sf),
    }
}

fn field<T: std::fmt::Debug>(
    name: &str,
    raw: &Option<Value>,
    coerce: fn(&Value) -> Option<T>,
    default: T,
) -> T {
    match raw {
        None => {
            debug!(field = name, default = ?default, "Missing value, using default");
            default
        }
        Some(value) => coerce(value).unwrap_or_else(|| {
            debug!(field = name, value = %value, default = ?default, "Invalid value, using default");
            default
        }),
    }
}

/// Coerce to an integer, truncating toward zero.
///
/// Accepts JSON numbers, numeric text (`"12000"`, `"3.7"`, `" 1e3 "`) and
/// booleans. Non-finite or out-of-range values fail.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_f64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn truncate_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Coerce to a finite float.
pub fn coerce_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    f.is_finite().then_some(f)
}

/// Coerce to trimmed, non-empty text.
pub fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Coerce to a category by exact, case-sensitive label match over the
/// domain and the baseline.
pub fn coerce_category<C: Category>(value: &Value) -> Option<C> {
    coerce_text(value).and_then(|text| C::from_label(&text))
}
