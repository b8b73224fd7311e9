//! Decoding of vendor cookies into the universal consent schema.
//!
//! Vendors are evaluated in the order of [`Vendor::ALL`]. A vendor is evaluated when its cookie
//! is present with a non-empty value. Several vendors may match, in which case the last vendor
//! supplying a category wins for that category.
//!
//! A vendor cookie whose payload cannot be decoded is skipped, and never prevents the other
//! vendors from being evaluated.
//!
//! # Examples
//!
//! ```
//! use cmp_consent::cookies::RawCookieMap;
//! use cmp_consent::decoder::decode_consent;
//! use cmp_consent::schema::Consent;
//!
//! let cookies = RawCookieMap::from_iter([
//!     ("OptanonConsent", "groups=C0002:1,C0004:1"),
//!     ("termly-consent", r#"{"analytics":false}"#),
//! ]);
//! let consent = decode_consent(&cookies);
//!
//! // Termly is evaluated after OneTrust
//! assert_eq!(consent.analytics, Consent::Denied);
//! assert_eq!(consent.marketing, Consent::Granted);
//! ```
//!
//! Use [`decode_report`] to know which vendors matched, and why a payload was rejected:
//!
//! ```
//! use cmp_consent::cookies::RawCookieMap;
//! use cmp_consent::decoder::decode_report;
//! use cmp_consent::vendors::Vendor;
//!
//! let cookies = RawCookieMap::from_iter([("CookieConsent", "{not json")]);
//! let report = decode_report(&cookies);
//!
//! assert_eq!(report.outcomes().len(), 1);
//! assert_eq!(report.outcomes()[0].vendor, Vendor::Cookiebot);
//! assert!(report.outcomes()[0].result.is_err());
//! ```
//!
use crate::cookies::RawCookieMap;
use crate::schema::ConsentSchema;
use crate::vendors::{MalformedPayload, Vendor, VendorSignal};
use log::debug;

/// The result of decoding the cookie of a single vendor.
#[derive(Debug)]
pub struct VendorOutcome {
    pub vendor: Vendor,
    pub result: Result<VendorSignal, MalformedPayload>,
}

/// A decoded consent, along with the outcome of every vendor that was evaluated.
#[derive(Debug)]
pub struct DecodeReport {
    consent: ConsentSchema,
    outcomes: Vec<VendorOutcome>,
}

impl DecodeReport {
    /// Returns the decoded consent, identical to what [`decode_consent`] returns.
    pub fn consent(&self) -> ConsentSchema {
        self.consent
    }

    /// Returns the outcome of each matching vendor, in evaluation order.
    pub fn outcomes(&self) -> &[VendorOutcome] {
        &self.outcomes
    }

    /// Returns the vendors whose cookie was present but could not be decoded.
    pub fn errors(&self) -> impl Iterator<Item = (Vendor, &MalformedPayload)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.vendor, e)))
    }
}

/// Decodes all recognized vendor cookies into a [`ConsentSchema`].
///
/// This function never fails. Categories for which no vendor supplied a value are left to
/// their [default](ConsentSchema::default).
///
/// # Example
///
/// ```
/// use cmp_consent::cookies::parse_cookie_string;
/// use cmp_consent::decoder::decode_consent;
/// use cmp_consent::schema::{Consent, ConsentSchema};
///
/// let cookies = parse_cookie_string("termly-consent=%7B%22analytics%22%3Afalse%7D");
///
/// assert_eq!(
///     decode_consent(&cookies),
///     ConsentSchema {
///         analytics: Consent::Denied,
///         ..ConsentSchema::default()
///     }
/// );
/// ```
pub fn decode_consent(cookies: &RawCookieMap) -> ConsentSchema {
    vendor_outcomes(cookies).fold(ConsentSchema::default(), |mut consent, outcome| {
        merge(&mut consent, &outcome);
        consent
    })
}

/// Decodes all recognized vendor cookies, keeping track of each vendor outcome.
pub fn decode_report(cookies: &RawCookieMap) -> DecodeReport {
    let mut consent = ConsentSchema::default();
    let outcomes = vendor_outcomes(cookies)
        .inspect(|outcome| merge(&mut consent, outcome))
        .collect();

    DecodeReport { consent, outcomes }
}

fn vendor_outcomes(cookies: &RawCookieMap) -> impl Iterator<Item = VendorOutcome> + '_ {
    Vendor::ALL.into_iter().filter_map(move |vendor| {
        let value = cookies
            .get(vendor.cookie_name())
            .filter(|value| !value.is_empty())?;

        Some(VendorOutcome {
            vendor,
            result: vendor.decode(value),
        })
    })
}

fn merge(consent: &mut ConsentSchema, outcome: &VendorOutcome) {
    match &outcome.result {
        Ok(signal) => consent.apply(signal),
        Err(e) => debug!("ignoring malformed {} cookie: {e}", outcome.vendor),
    }
}
