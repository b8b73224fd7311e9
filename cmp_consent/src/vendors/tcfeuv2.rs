use crate::schema::Consent;
use crate::vendors::{MalformedPayload, Vendor, VendorPayload, VendorSignal};
use std::str::FromStr;

/// Marker for an IAB TCF v2 consent string.
///
/// The string is not decoded: its presence only means marketing consent cannot be derived
/// from the other vendor cookies, which would otherwise report stale or default values.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct TcfEuV2;

impl VendorPayload for TcfEuV2 {
    const VENDOR: Vendor = Vendor::TcfEuV2;

    fn signal(&self) -> VendorSignal {
        VendorSignal {
            marketing: Some(Consent::Unknown),
            ..VendorSignal::default()
        }
    }
}

impl FromStr for TcfEuV2 {
    type Err = MalformedPayload;

    fn from_str(_: &str) -> Result<Self, Self::Err> {
        Ok(Self)
    }
}
