//! Parsing of raw `Cookie` headers.
//!
//! A cookie header is a list of `name=value` pairs separated by `;` characters:
//!
//! ```text
//! session=abc; OptanonConsent=groups%3DC0002%3A1; euconsent-v2=CPXxRfAPXxRfAAfKABENB-CgAAAAAAAAAAYgAAAAAAAA
//! ```
//!
//! Values are kept exactly as received, including any percent-encoding. Decoding them is the
//! responsibility of the vendor which wrote the cookie.
//!
//! The header can be supplied explicitly, or read from a [`CookieSource`], such as the
//! `HTTP_COOKIE` environment variable set by CGI servers.
//!
use fnv::FnvHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::hash_map;
use std::convert::Infallible;
use std::env;
use std::str::FromStr;

/// The variable in which CGI servers expose the request `Cookie` header.
pub const HTTP_COOKIE_VAR: &str = "HTTP_COOKIE";

/// A mapping from cookie names to their raw values.
///
/// Names are unique: inserting a name twice keeps the last value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RawCookieMap {
    cookies: FnvHashMap<String, String>,
}

impl RawCookieMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a cookie header.
    ///
    /// This never fails, see [`parse_cookie_string`].
    ///
    /// # Example
    ///
    /// ```
    /// use cmp_consent::cookies::RawCookieMap;
    ///
    /// let cookies = RawCookieMap::parse_str("a=1; b=2");
    ///
    /// assert_eq!(cookies.get("b"), Some("2"));
    /// ```
    pub fn parse_str(s: &str) -> Self {
        parse_cookie_string(s)
    }

    /// Returns the raw value of a cookie, or [`None`] if it is not present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Inserts a cookie, returning the value it replaces, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.cookies.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Returns an iterator over all cookies, in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.cookies.iter())
    }
}

impl FromStr for RawCookieMap {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_cookie_string(s))
    }
}

impl<K, V> FromIterator<(K, V)> for RawCookieMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            cookies: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RawCookieMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Created with the method [`iter`](RawCookieMap::iter).
pub struct Iter<'a>(hash_map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Splits a cookie header into a [`RawCookieMap`].
///
/// Each `;` separated pair is trimmed, then split on its first `=` character. A pair without
/// any `=` is kept with an empty value, and empty pairs are skipped. When a name appears
/// several times, the last value wins.
///
/// # Example
///
/// ```
/// use cmp_consent::cookies::parse_cookie_string;
///
/// let cookies = parse_cookie_string("a=1; token=x=y; flag; a=2");
///
/// assert_eq!(cookies.get("a"), Some("2"));
/// assert_eq!(cookies.get("token"), Some("x=y"));
/// assert_eq!(cookies.get("flag"), Some(""));
/// ```
pub fn parse_cookie_string(cookie_header: &str) -> RawCookieMap {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect()
}

/// A source from which a cookie header can be read.
pub trait CookieSource {
    /// Returns the cookie header, or [`None`] if there is none.
    fn cookie_header(&self) -> Option<Cow<'_, str>>;
}

impl CookieSource for str {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl CookieSource for String {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T> CookieSource for Option<T>
where
    T: CookieSource,
{
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|s| s.cookie_header())
    }
}

/// Reads the cookie header from an environment variable, [`HTTP_COOKIE_VAR`] by default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnvCookieSource {
    var: Cow<'static, str>,
}

impl EnvCookieSource {
    pub fn new() -> Self {
        Self::with_var(HTTP_COOKIE_VAR)
    }

    pub fn with_var(var: impl Into<Cow<'static, str>>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCookieSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieSource for EnvCookieSource {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        env::var(&*self.var).ok().map(Cow::Owned)
    }
}

/// Reads a cookie header from a source and parses it.
///
/// A source without any header yields an empty map.
///
/// # Example
///
/// ```
/// use cmp_consent::cookies::{parse_cookies_from, EnvCookieSource};
///
/// let cookies = parse_cookies_from("a=1; b=2");
/// assert_eq!(cookies.len(), 2);
///
/// let cookies = parse_cookies_from(&EnvCookieSource::new());
/// # let _ = cookies;
/// ```
pub fn parse_cookies_from<S>(source: &S) -> RawCookieMap
where
    S: CookieSource + ?Sized,
{
    source
        .cookie_header()
        .map(|header| parse_cookie_string(&header))
        .unwrap_or_default()
}
