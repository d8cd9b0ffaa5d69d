use url::Url;

use crate::domain::{ParamValue, Params, ValidationError};

/// Render passthrough filters as `(name, value)` query pairs.
///
/// `Null` values are skipped and booleans become `1`/`0`, which is what the
/// FOSSBilling admin API expects for flags such as `delete_orders`. Floats
/// keep their decimal point; `NaN` and infinities are rejected.
pub fn encode_query(params: &Params) -> Result<Vec<(String, String)>, ValidationError> {
    let mut pairs = Vec::new();
    for (name, value) in params.iter() {
        if let Some(encoded) = encode_value(name, value)? {
            pairs.push((name.to_owned(), encoded));
        }
    }
    Ok(pairs)
}

/// Append encoded filters to `url`. An empty filter set leaves the URL untouched.
pub fn append_query(url: &mut Url, params: &Params) -> Result<(), ValidationError> {
    let pairs = encode_query(params)?;
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(())
}

fn encode_value(name: &str, value: &ParamValue) -> Result<Option<String>, ValidationError> {
    let encoded = match value {
        ParamValue::Null => return Ok(None),
        ParamValue::Bool(flag) => if *flag { "1" } else { "0" }.to_owned(),
        ParamValue::Int(number) => number.to_string(),
        ParamValue::UInt(number) => number.to_string(),
        ParamValue::Float(number) => encode_float(name, *number)?,
        ParamValue::Str(text) => text.clone(),
    };
    Ok(Some(encoded))
}

fn encode_float(name: &str, number: f64) -> Result<String, ValidationError> {
    if !number.is_finite() {
        return Err(ValidationError::NonFinite {
            field: name.to_owned(),
        });
    }
    if number.fract() == 0.0 {
        Ok(format!("{number:.1}"))
    } else {
        Ok(number.to_string())
    }
}
