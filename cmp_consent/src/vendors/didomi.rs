use crate::core::{DecodeExt, JsonObject};
use crate::schema::Consent;
use crate::vendors::{MalformedPayload, Vendor, VendorPayload, VendorSignal};
use std::str::FromStr;

const PAYLOAD_SEGMENT: usize = 1;

// The didomi_token cookie is a JWT-like `header.payload.signature` token.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Didomi {
    purposes_consent: Option<PurposesConsent>,
}

#[derive(Debug, Eq, PartialEq)]
struct PurposesConsent {
    marketing: Option<bool>,
    analytics: Option<bool>,
    functional: Option<bool>,
}

impl VendorPayload for Didomi {
    const VENDOR: Vendor = Vendor::Didomi;

    fn signal(&self) -> VendorSignal {
        self.purposes_consent
            .as_ref()
            .map(|p| VendorSignal {
                marketing: p.marketing.map(Consent::from),
                analytics: p.analytics.map(Consent::from),
                functional: p.functional.map(Consent::from),
            })
            .unwrap_or_default()
    }
}

impl FromStr for Didomi {
    type Err = MalformedPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s
            .split('.')
            .nth(PAYLOAD_SEGMENT)
            .ok_or(MalformedPayload::MissingSegment {
                index: PAYLOAD_SEGMENT,
            })?;

        let o = JsonObject::parse(&payload.decode_base64()?)?;
        let purposes_consent = o
            .object_field("purposes_consent")
            .map(|p| PurposesConsent::from(&p));

        Ok(Self { purposes_consent })
    }
}

impl From<&JsonObject> for PurposesConsent {
    fn from(o: &JsonObject) -> Self {
        Self {
            marketing: o.bool_field("marketing"),
            analytics: o.bool_field("analytics"),
            functional: o.bool_field("functional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // {"purposes_consent":{"marketing":true,"analytics":false}}
    #[test_case("eyJhbGciOiJIUzI1NiJ9.eyJwdXJwb3Nlc19jb25zZW50Ijp7Im1hcmtldGluZyI6dHJ1ZSwiYW5hbHl0aWNzIjpmYWxzZX19.c2ln" => VendorSignal {
        marketing: Some(Consent::Granted),
        analytics: Some(Consent::Denied),
        functional: None,
    } ; "partial purposes")]
    // {"purposes_consent":{"marketing":false,"analytics":true,"functional":true}}
    #[test_case(".eyJwdXJwb3Nlc19jb25zZW50Ijp7Im1hcmtldGluZyI6ZmFsc2UsImFuYWx5dGljcyI6dHJ1ZSwiZnVuY3Rpb25hbCI6dHJ1ZX19" => VendorSignal {
        marketing: Some(Consent::Denied),
        analytics: Some(Consent::Granted),
        functional: Some(Consent::Granted),
    } ; "two segments")]
    // {"purposes_consent":{"functional":true},"vendor":"~~~"}
    #[test_case("h.eyJwdXJwb3Nlc19jb25zZW50Ijp7ImZ1bmN0aW9uYWwiOnRydWV9LCJ2ZW5kb3IiOiJ-fn4ifQ.s" => VendorSignal {
        functional: Some(Consent::Granted),
        ..VendorSignal::default()
    } ; "url safe alphabet")]
    // {"purposes_consent":{"functional":true},"x":"???"}
    #[test_case("h.eyJwdXJwb3Nlc19jb25zZW50Ijp7ImZ1bmN0aW9uYWwiOnRydWV9LCJ4IjoiPz8/In0=.s" => VendorSignal {
        functional: Some(Consent::Granted),
        ..VendorSignal::default()
    } ; "standard alphabet padded")]
    // {"user_id":"abc"}
    #[test_case("h.eyJ1c2VyX2lkIjoiYWJjIn0.s" => VendorSignal::default() ; "no purposes")]
    // {"purposes_consent":null}
    #[test_case("h.eyJwdXJwb3Nlc19jb25zZW50IjpudWxsfQ.s" => VendorSignal::default() ; "null purposes")]
    // {"purposes_consent":[true]}
    #[test_case("h.eyJwdXJwb3Nlc19jb25zZW50IjpbdHJ1ZV19.s" => VendorSignal::default() ; "array purposes")]
    // {"purposes_consent":{"marketing":"yes","analytics":true}}
    #[test_case("h.eyJwdXJwb3Nlc19jb25zZW50Ijp7Im1hcmtldGluZyI6InllcyIsImFuYWx5dGljcyI6dHJ1ZX19.s" => VendorSignal {
        analytics: Some(Consent::Granted),
        ..VendorSignal::default()
    } ; "string purpose")]
    fn signal(s: &str) -> VendorSignal {
        Didomi::from_str(s).unwrap().signal()
    }

    #[test_case("no-dots" => matches MalformedPayload::MissingSegment { index: 1 } ; "single segment")]
    #[test_case("h.e.s" => matches MalformedPayload::InvalidBase64(_) ; "truncated base64")]
    #[test_case("h.e$$$.s" => matches MalformedPayload::InvalidBase64(_) ; "invalid base64")]
    #[test_case("h.W3RydWVd.s" => matches MalformedPayload::NotAnObject { found: "array" } ; "array payload")]
    #[test_case("h..s" => matches MalformedPayload::InvalidJson(_) ; "empty payload")]
    fn error(s: &str) -> MalformedPayload {
        Didomi::from_str(s).unwrap_err()
    }
}
