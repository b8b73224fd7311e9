use crate::core::{DecodeExt, JsonObject};
use crate::schema::Consent;
use crate::vendors::{MalformedPayload, Vendor, VendorPayload, VendorSignal};
use std::str::FromStr;

#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct Cookiebot {
    statistics: Option<bool>,
    preferences: Option<bool>,
    marketing: Option<bool>,
}

impl VendorPayload for Cookiebot {
    const VENDOR: Vendor = Vendor::Cookiebot;

    fn signal(&self) -> VendorSignal {
        VendorSignal {
            marketing: self.marketing.map(Consent::from),
            analytics: self.statistics.map(Consent::from),
            functional: self.preferences.map(Consent::from),
        }
    }
}

impl FromStr for Cookiebot {
    type Err = MalformedPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = s.decode_uri_component()?;

        parse_json(&decoded).or_else(|e| parse_object_literal(&decoded).ok_or(e))
    }
}

fn parse_json(s: &str) -> Result<Cookiebot, MalformedPayload> {
    let o = JsonObject::parse(s.as_bytes())?;

    Ok(Cookiebot {
        statistics: o.bool_field("statistics"),
        preferences: o.bool_field("preferences"),
        marketing: o.bool_field("marketing"),
    })
}

/// Parses the JavaScript object literal written by the Cookiebot script itself, e.g.
/// `{stamp:'...',necessary:true,preferences:false,statistics:true,marketing:false,ver:1}`.
///
/// Keys are bare identifiers, and only `true` and `false` values are retained.
fn parse_object_literal(s: &str) -> Option<Cookiebot> {
    let body = s.trim().strip_prefix('{')?.strip_suffix('}')?;
    let mut output = Cookiebot::default();

    for entry in body.split(',') {
        let (key, value) = entry.split_once(':')?;
        let key = key.trim();
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return None;
        }

        let value = match value.trim() {
            "true" => true,
            "false" => false,
            _ => continue,
        };

        match key {
            "statistics" => output.statistics = Some(value),
            "preferences" => output.preferences = Some(value),
            "marketing" => output.marketing = Some(value),
            _ => {}
        }
    }

    Some(output)
}
