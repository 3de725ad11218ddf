//! Carrier identification for tracking codes.
//!
//! Codes are checked against an ordered pattern table and the first match
//! wins. Several patterns overlap (an 8-digit code is buslog only because
//! jadlog requires 9+ digits; most bare numeric latam/azul codes are taken by
//! jadlog first), so the table order is load-bearing.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    Correios,
    Jadlog,
    Buslog,
    Azul,
    Latam,
    MelhorEnvio,
    Loggi,
    Jet,
}

impl Carrier {
    /// Label sent to the tracking API as the tracker `type`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Carrier::Correios => "correios",
            Carrier::Jadlog => "jadlog",
            Carrier::Buslog => "buslog",
            Carrier::Azul => "azul",
            Carrier::Latam => "latam",
            Carrier::MelhorEnvio => "melhorenvio",
            Carrier::Loggi => "loggi",
            Carrier::Jet => "jet",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alternative of a carrier's pattern. `excluded_prefix` stands in for a
/// leading negative look-ahead, which the `regex` crate does not support.
struct Alternative {
    regex: Regex,
    excluded_prefix: Option<&'static str>,
}

impl Alternative {
    fn matches(&self, code: &str) -> bool {
        if let Some(prefix) = self.excluded_prefix
            && code.starts_with(prefix)
        {
            return false;
        }
        self.regex.is_match(code)
    }
}

struct CarrierPattern {
    carrier: Carrier,
    alternatives: Vec<Alternative>,
}

fn alt(pattern: &str, excluded_prefix: Option<&'static str>) -> Alternative {
    Alternative {
        regex: Regex::new(pattern).expect("static carrier regex compiles"),
        excluded_prefix,
    }
}

static CARRIER_PATTERNS: LazyLock<Vec<CarrierPattern>> = LazyLock::new(|| {
    vec![
        CarrierPattern {
            carrier: Carrier::Correios,
            alternatives: vec![alt(r"^[A-Z]{2}\d{9}[A-Z]{2}\n?$", Some("ME"))],
        },
        CarrierPattern {
            carrier: Carrier::Jadlog,
            alternatives: vec![
                alt(r"^(1008|18\d\d)\d{10}\n?$", None),
                alt(r"^\d{9,13}\n?$", Some("957")),
            ],
        },
        CarrierPattern {
            carrier: Carrier::Buslog,
            alternatives: vec![alt(r"(^BUS-[0-9]{8}\n?$)|(^\d{8}\n?$)", None)],
        },
        CarrierPattern {
            carrier: Carrier::Azul,
            alternatives: vec![alt(
                r"(^[A-Z]{3}-[A-Z]{2}[0-9]{8}\n?$)|(^9[0-9]{7}\n?$)|(^7[0-9]{1}[0-9]{6}\n?$)|(^577[0-9]{8}\n?$)|(^5[1-9]{1}[0-9]{6}\n?$)|(^800[0-9]{1}[0-9]{7}\n?$)|(^[A-Z]{2}[0-9]{8}\n?$)",
                None,
            )],
        },
        CarrierPattern {
            carrier: Carrier::Latam,
            alternatives: vec![alt(
                r"(^66[0-9]{6,12}\n?$)|(^65[0-9]{6,12}\n?$)|(^95[0-9]{6,12}\n?$)|(^957[0-9]{6,12}\n?$)|(^[LTM-]{4}(66|65|95|957)[0-9]{6,12}\n?$)",
                None,
            )],
        },
        CarrierPattern {
            carrier: Carrier::MelhorEnvio,
            alternatives: vec![alt(r"^[ME]{2}.{9,}[A-Z]{2}\n?$", None)],
        },
        CarrierPattern {
            carrier: Carrier::Loggi,
            alternatives: vec![alt(r"^LGI-[A-Z]{2}\w{9}[A-Z]{2}", None)],
        },
        CarrierPattern {
            carrier: Carrier::Jet,
            alternatives: vec![alt(r"^888[0-9]{12}\n?$", None)],
        },
    ]
});

/// Returns the first carrier whose pattern matches `tracking_code`, or `None`
/// when the code is unidentified. The code is matched as given, without
/// trimming or case folding; end anchors tolerate one trailing newline.
#[must_use]
pub fn identify_carrier(tracking_code: &str) -> Option<Carrier> {
    CARRIER_PATTERNS
        .iter()
        .find(|p| p.alternatives.iter().any(|a| a.matches(tracking_code)))
        .map(|p| p.carrier)
}

/// String form of [`identify_carrier`], as used for the API `type` variable.
#[must_use]
pub fn identify_provider(tracking_code: &str) -> Option<&'static str> {
    identify_carrier(tracking_code).map(Carrier::as_str)
}
