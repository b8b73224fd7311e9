//! This crate normalizes the consent cookies written by common Consent Management Platforms
//! (CMP) into a single, vendor-independent consent schema.
//!
//! Supported platforms are OneTrust, Cookiebot, Didomi and Termly. The presence of an IAB TCF v2
//! cookie (`euconsent-v2`) is recognized as well, but the TCF string itself is not decoded.
//!
//! # Decoding consent cookies
//!
//! Decoding is done in two steps: a raw `Cookie` header is first split into a
//! [`RawCookieMap`](cookies/struct.RawCookieMap.html), which is then decoded into a
//! [`ConsentSchema`](schema/struct.ConsentSchema.html).
//!
//! ```
//! use cmp_consent::cookies::parse_cookie_string;
//! use cmp_consent::decoder::decode_consent;
//! use cmp_consent::schema::Consent;
//!
//! let cookies = parse_cookie_string("session=abc; OptanonConsent=groups=C0002:1,C0003:0,C0004:1");
//! let consent = decode_consent(&cookies);
//!
//! assert_eq!(consent.analytics, Consent::Granted);
//! assert_eq!(consent.functional, Consent::Denied);
//! assert_eq!(consent.marketing, Consent::Granted);
//! assert_eq!(consent.necessary, Consent::Granted);
//! ```
//!
//! Each category is a tri-state value. [`Consent::Unknown`](schema/enum.Consent.html) means
//! that no decodable consent signal was found for that category, and must not be interpreted
//! as either granted or denied.
//!
//! # Multiple platforms
//!
//! Several CMP cookies may be present at the same time, for example while a site migrates from
//! one platform to another. Platforms are evaluated in a fixed order (OneTrust, Cookiebot,
//! Didomi, Termly, IAB TCF), and the last platform supplying a given category wins for that
//! category.
//!
//! # Error handling
//!
//! Decoding never fails. A cookie whose payload cannot be decoded is ignored, and the
//! categories it would have set keep their previous value. The reason a payload was rejected
//! can be inspected with [`decode_report`](decoder/fn.decode_report.html).
//!
pub(crate) mod core;
pub mod cookies;
pub mod decoder;
pub mod schema;
pub mod vendors;
