//! Cell access helpers for row-wise passes over listing frames.
//!
//! Missing means null, NaN, or a string that is blank after trimming.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Whether a cell counts as missing.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text form of a cell. Missing cells render as the empty string.
pub fn value_text(value: &AnyValue<'_>) -> String {
    if is_missing(value) {
        return String::new();
    }
    match value {
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell; numeric strings are parsed.
pub fn value_f64(value: &AnyValue<'_>) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    match value {
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => s.trim().parse::<f64>().ok(),
        AnyValue::StringOwned(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integer value of a cell. Floats qualify only when they carry no fraction.
pub fn value_i64(value: &AnyValue<'_>) -> Option<i64> {
    if is_missing(value) {
        return None;
    }
    match value {
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        AnyValue::String(s) => parse_integral(s),
        AnyValue::StringOwned(s) => parse_integral(s),
        other => value_f64(other).and_then(integral),
    }
}

fn parse_integral(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(integral))
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Text of every cell in a column; missing cells are `None`.
pub fn column_texts(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx)?;
        values.push((!is_missing(&value)).then(|| value_text(&value)));
    }
    Ok(values)
}

/// Numeric value of every cell in a column.
pub fn column_f64s(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(value_f64(&column.get(idx)?));
    }
    Ok(values)
}

/// Integer value of every cell in a column.
pub fn column_i64s(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(value_i64(&column.get(idx)?));
    }
    Ok(values)
}

/// Like [`column_texts`], but an absent column yields all-missing values.
pub fn optional_column_texts(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    if has_column(df, name) {
        column_texts(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

/// Like [`column_f64s`], but an absent column yields all-missing values.
pub fn optional_column_f64s(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    if has_column(df, name) {
        column_f64s(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}
