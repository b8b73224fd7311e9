use crate::core::{DecodeExt, JsonObject};
use crate::schema::Consent;
use crate::vendors::{MalformedPayload, Vendor, VendorPayload, VendorSignal};
use std::str::FromStr;

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Termly {
    analytics: Option<bool>,
    functional: Option<bool>,
    advertising: Option<bool>,
}

impl VendorPayload for Termly {
    const VENDOR: Vendor = Vendor::Termly;

    fn signal(&self) -> VendorSignal {
        VendorSignal {
            marketing: self.advertising.map(Consent::from),
            analytics: self.analytics.map(Consent::from),
            functional: self.functional.map(Consent::from),
        }
    }
}

impl FromStr for Termly {
    type Err = MalformedPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let o = JsonObject::parse(s.decode_uri_component()?.as_bytes())?;

        Ok(Self {
            analytics: o.bool_field("analytics"),
            functional: o.bool_field("functional"),
            advertising: o.bool_field("advertising"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("%7B%22analytics%22%3Afalse%7D" => VendorSignal {
        analytics: Some(Consent::Denied),
        ..VendorSignal::default()
    } ; "analytics only")]
    #[test_case(r#"{"analytics":true,"functional":false,"advertising":true,"essential":true}"# => VendorSignal {
        marketing: Some(Consent::Granted),
        analytics: Some(Consent::Granted),
        functional: Some(Consent::Denied),
    } ; "all categories")]
    #[test_case(r#"{"marketing":true}"# => VendorSignal::default() ; "marketing is not a termly key")]
    #[test_case(r#"{"analytics":true,"functional":"yes","advertising":1}"# => VendorSignal {
        analytics: Some(Consent::Granted),
        ..VendorSignal::default()
    } ; "non boolean values")]
    fn signal(s: &str) -> VendorSignal {
        Termly::from_str(s).unwrap().signal()
    }

    #[test_case("" => matches MalformedPayload::InvalidJson(_) ; "empty string")]
    #[test_case("null" => matches MalformedPayload::NotAnObject { found: "null" } ; "null")]
    #[test_case("%7B%22analytics%22%3Afalse" => matches MalformedPayload::InvalidJson(_) ; "truncated")]
    fn error(s: &str) -> MalformedPayload {
        Termly::from_str(s).unwrap_err()
    }
}
