use clap::{Parser, Subcommand};
use cmp_consent::cookies::{parse_cookies_from, EnvCookieSource, RawCookieMap, HTTP_COOKIE_VAR};
use cmp_consent::decoder::{decode_consent, decode_report};
use cmp_consent::vendors::{Vendor, VendorSignal};
use colored_json::{Color, ColorMode, Output, Styler, ToColoredJson};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode consent cookies and display the normalized consent
    Decode {
        /// Cookie header to decode, read from HTTP_COOKIE if omitted
        cookie_header: Option<String>,
    },
    /// Display the outcome of each matching vendor cookie
    Report {
        /// Cookie header to decode, read from HTTP_COOKIE if omitted
        cookie_header: Option<String>,
    },
    /// List all recognized vendors
    Vendors,
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    let e = match args.cmd {
        Commands::Decode { cookie_header } => decode(cookie_header.as_deref()),
        Commands::Report { cookie_header } => report(cookie_header.as_deref()),
        Commands::Vendors => list_vendors(),
    };

    if let Err(e) = e {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_cookies(cookie_header: Option<&str>) -> RawCookieMap {
    match cookie_header {
        Some(header) => parse_cookies_from(header),
        None => {
            info!("reading cookie header from {HTTP_COOKIE_VAR}");
            parse_cookies_from(&EnvCookieSource::new())
        }
    }
}

fn decode(cookie_header: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let consent = decode_consent(&read_cookies(cookie_header));
    print_json(&consent)
}

#[derive(Serialize)]
struct OutcomeLine<'a> {
    vendor: Vendor,
    cookie: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<VendorSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn report(cookie_header: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let report = decode_report(&read_cookies(cookie_header));

    let outcomes = report
        .outcomes()
        .iter()
        .map(|o| OutcomeLine {
            vendor: o.vendor,
            cookie: o.vendor.cookie_name(),
            signal: o.result.as_ref().ok().copied(),
            error: o.result.as_ref().err().map(|e| e.to_string()),
        })
        .collect::<Vec<_>>();

    print_json(&serde_json::json!({
        "consent": report.consent(),
        "vendors": outcomes,
    }))
}

fn list_vendors() -> Result<(), Box<dyn std::error::Error>> {
    for v in Vendor::ALL {
        println!("{}\t{}", v.cookie_name(), v);
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)?
            .to_colored_json_with_styler(ColorMode::Auto(Output::StdOut), json_color_styler())?
    );

    Ok(())
}

fn json_color_styler() -> Styler {
    Styler {
        key: Color::Green.foreground(),
        string_value: Color::Blue.bold(),
        bool_value: Color::Magenta.bold(),
        nil_value: Color::Red.italic(),
        object_brackets: Color::Yellow.bold(),
        array_brackets: Color::Cyan.bold(),
        ..Default::default()
    }
}
