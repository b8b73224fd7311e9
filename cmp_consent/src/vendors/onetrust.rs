use crate::core::DecodeExt;
use crate::schema::Consent;
use crate::vendors::{MalformedPayload, Vendor, VendorPayload, VendorSignal};
use fnv::FnvHashMap;
use std::str::FromStr;

const GROUPS_PREFIX: &str = "groups=";

const ANALYTICS_GROUP: &str = "C0002";
const FUNCTIONAL_GROUP: &str = "C0003";
const MARKETING_GROUP: &str = "C0004";

// The OptanonConsent cookie is a query string, e.g.
// isGpcEnabled=0&datestamp=...&groups=C0001%3A1%2CC0002%3A0%2CC0003%3A1
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct OneTrust {
    groups: FnvHashMap<String, bool>,
}

impl OneTrust {
    fn group(&self, code: &str) -> Option<Consent> {
        self.groups.get(code).copied().map(Consent::from)
    }
}

impl VendorPayload for OneTrust {
    const VENDOR: Vendor = Vendor::OneTrust;

    fn signal(&self) -> VendorSignal {
        VendorSignal {
            marketing: self.group(MARKETING_GROUP),
            analytics: self.group(ANALYTICS_GROUP),
            functional: self.group(FUNCTIONAL_GROUP),
        }
    }
}

impl FromStr for OneTrust {
    type Err = MalformedPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = s.decode_uri_component()?;

        let groups = decoded
            .split('&')
            .filter_map(|segment| segment.strip_prefix(GROUPS_PREFIX))
            .flat_map(|groups| groups.split(','))
            .map(parse_group)
            .collect();

        Ok(Self { groups })
    }
}

// only the second field is significant, a missing flag means the group is disabled
fn parse_group(pair: &str) -> (String, bool) {
    let mut fields = pair.split(':');
    let code = fields.next().unwrap_or(pair);
    let enabled = fields.next() == Some("1");

    (code.to_string(), enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("C0002:1" => ("C0002".to_string(), true) ; "enabled")]
    #[test_case("C0002:0" => ("C0002".to_string(), false) ; "disabled")]
    #[test_case("C0002" => ("C0002".to_string(), false) ; "missing flag")]
    #[test_case("C0002:1:0" => ("C0002".to_string(), true) ; "extra field")]
    #[test_case("C0002:true" => ("C0002".to_string(), false) ; "non numeric flag")]
    fn group(pair: &str) -> (String, bool) {
        parse_group(pair)
    }

    #[test_case("groups=C0002:1,C0003:0,C0004:1" => VendorSignal {
        marketing: Some(Consent::Granted),
        analytics: Some(Consent::Granted),
        functional: Some(Consent::Denied),
    } ; "all mapped groups")]
    #[test_case("isGpcEnabled=0&datestamp=Mon+Jan+01+2024&groups=C0001%3A1%2CC0002%3A0%2CC0004%3A1&AwaitingReconsent=false" => VendorSignal {
        marketing: Some(Consent::Granted),
        analytics: Some(Consent::Denied),
        functional: None,
    } ; "full cookie")]
    #[test_case("isGpcEnabled%3D0%26groups%3DC0003%3A1" => VendorSignal {
        marketing: None,
        analytics: None,
        functional: Some(Consent::Granted),
    } ; "encoded separators")]
    #[test_case("groups=C0001:1" => VendorSignal::default() ; "necessary only")]
    #[test_case("groups=C0002:1,C0002:0" => VendorSignal {
        analytics: Some(Consent::Denied),
        ..VendorSignal::default()
    } ; "duplicate group")]
    #[test_case("groups=C0004:1&groups=C0004:0" => VendorSignal {
        marketing: Some(Consent::Denied),
        ..VendorSignal::default()
    } ; "duplicate segment")]
    #[test_case("not-valid-groups-format" => VendorSignal::default() ; "no groups segment")]
    #[test_case("groups=" => VendorSignal::default() ; "empty groups")]
    #[test_case("xgroups=C0002:1" => VendorSignal::default() ; "prefix must start segment")]
    fn signal(s: &str) -> VendorSignal {
        OneTrust::from_str(s).unwrap().signal()
    }

    #[test_case("groups=C0002%3" => matches MalformedPayload::InvalidPercentEncoding { offset: 12 } ; "truncated escape")]
    #[test_case("groups=C0002%3A%FE" => matches MalformedPayload::InvalidUtf8(_) ; "invalid utf8")]
    fn error(s: &str) -> MalformedPayload {
        OneTrust::from_str(s).unwrap_err()
    }
}
