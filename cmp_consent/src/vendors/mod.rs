//! Traits, helpers, and type definitions for working with CMP vendor cookies.
//!
//! All supported vendors are listed in the [`Vendor`] enum, in the order in which they are
//! evaluated.
//!
//! Decoding of each vendor payload is done in its corresponding submodule. Vendor payloads are
//! never exposed directly: decoding a payload yields a [`VendorSignal`], which only contains
//! the categories of the universal schema that the payload supplies.
//!
use crate::schema::Consent;
use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::{FromStr, Utf8Error};
use strum_macros::Display;
use thiserror::Error;

mod cookiebot;
mod didomi;
mod onetrust;
mod tcfeuv2;
mod termly;

/// Names of the cookies written by each supported vendor.
pub mod cookie_name {
    pub const ONETRUST: &str = "OptanonConsent";
    pub const COOKIEBOT: &str = "CookieConsent";
    pub const DIDOMI: &str = "didomi_token";
    pub const TERMLY: &str = "termly-consent";
    pub const TCF_EU_V2: &str = "euconsent-v2";
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Vendor {
    OneTrust,
    Cookiebot,
    Didomi,
    Termly,
    #[strum(to_string = "IAB TCF v2")]
    TcfEuV2,
}

impl Vendor {
    /// All vendors, in evaluation order.
    pub const ALL: [Vendor; 5] = [
        Vendor::OneTrust,
        Vendor::Cookiebot,
        Vendor::Didomi,
        Vendor::Termly,
        Vendor::TcfEuV2,
    ];

    /// Returns the name of the cookie in which this vendor stores its consent payload.
    ///
    /// # Example
    ///
    /// ```
    /// use cmp_consent::vendors::Vendor;
    ///
    /// assert_eq!(Vendor::Termly.cookie_name(), "termly-consent");
    /// ```
    pub fn cookie_name(self) -> &'static str {
        match self {
            Vendor::OneTrust => cookie_name::ONETRUST,
            Vendor::Cookiebot => cookie_name::COOKIEBOT,
            Vendor::Didomi => cookie_name::DIDOMI,
            Vendor::Termly => cookie_name::TERMLY,
            Vendor::TcfEuV2 => cookie_name::TCF_EU_V2,
        }
    }

    /// Returns the vendor writing the given cookie, if it is a recognized one.
    ///
    /// Cookie names are case-sensitive.
    pub fn from_cookie_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.cookie_name() == name)
    }

    /// Decodes a raw cookie value written by this vendor.
    ///
    /// # Example
    ///
    /// ```
    /// use cmp_consent::schema::Consent;
    /// use cmp_consent::vendors::Vendor;
    ///
    /// let signal = Vendor::OneTrust.decode("groups=C0002:1").unwrap();
    ///
    /// assert_eq!(signal.analytics, Some(Consent::Granted));
    /// assert_eq!(signal.marketing, None);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedPayload`] if the value does not have the shape expected for this
    /// vendor.
    ///
    pub fn decode(self, value: &str) -> Result<VendorSignal, MalformedPayload> {
        decode_vendor(self, value)
    }
}

/// The categories supplied by a single vendor payload.
///
/// A [`None`] field means the payload does not mention the category, and any value set
/// previously must be kept.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VendorSignal {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub marketing: Option<Consent>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub analytics: Option<Consent>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub functional: Option<Consent>,
}

impl VendorSignal {
    pub fn is_empty(&self) -> bool {
        self.marketing.is_none() && self.analytics.is_none() && self.functional.is_none()
    }
}

/// The error type for vendor payloads which cannot be decoded.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MalformedPayload {
    #[error("invalid percent-encoded sequence at offset {offset}")]
    InvalidPercentEncoding { offset: usize },
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8(#[from] Utf8Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("missing segment {index}")]
    MissingSegment { index: usize },
    #[error("invalid Base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A vendor payload type, which can be parsed from the raw cookie value.
pub(crate) trait VendorPayload: FromStr<Err = MalformedPayload> {
    const VENDOR: Vendor;

    fn signal(&self) -> VendorSignal;
}

fn decode_payload<T>(s: &str) -> Result<VendorSignal, MalformedPayload>
where
    T: VendorPayload,
{
    trace!("decoding {} payload", T::VENDOR);
    s.parse::<T>().map(|payload| payload.signal())
}

pub(crate) fn decode_vendor(vendor: Vendor, s: &str) -> Result<VendorSignal, MalformedPayload> {
    match vendor {
        Vendor::OneTrust => decode_payload::<onetrust::OneTrust>(s),
        Vendor::Cookiebot => decode_payload::<cookiebot::Cookiebot>(s),
        Vendor::Didomi => decode_payload::<didomi::Didomi>(s),
        Vendor::Termly => decode_payload::<termly::Termly>(s),
        Vendor::TcfEuV2 => decode_payload::<tcfeuv2::TcfEuV2>(s),
    }
}
