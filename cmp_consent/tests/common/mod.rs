use assert_json_diff::assert_json_eq;
use cmp_consent::cookies::parse_cookie_string;
use cmp_consent::decoder::decode_report;
use cmp_consent::schema::ConsentSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs::File;
use std::io;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Deserialize)]
pub struct Fixture {
    cookie_header: String,
    expected: Value,
    #[serde(default)]
    malformed: Vec<String>,
}

impl Fixture {
    pub fn load_from_file<P: AsRef<Path>>(p: P) -> io::Result<Self> {
        let f = File::open(p)?;
        let fixture: Self = serde_json::from_reader(&f)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e.to_string()))?;
        Ok(fixture)
    }

    pub fn assert_decodes(&self) {
        let report = decode_report(&parse_cookie_string(&self.cookie_header));

        assert_json_eq!(to_json(&report.consent()), self.expected);

        let malformed = report
            .errors()
            .map(|(vendor, _)| vendor.cookie_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(malformed, self.malformed, "malformed vendor cookies");
    }
}

pub fn to_json(consent: &ConsentSchema) -> Value {
    json!({
        "marketing": consent.marketing.as_bool(),
        "analytics": consent.analytics.as_bool(),
        "functional": consent.functional.as_bool(),
        "necessary": consent.necessary.as_bool(),
    })
}
