//! Amazon stores and their Product Advertising API endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amazon stores that expose a Product Advertising API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    #[default]
    Uk,
    De,
    Fr,
    Jp,
    Ca,
    It,
    Es,
    In,
    Cn,
}

impl Region {
    /// Returns the storefront domain for this region.
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Us => "amazon.com",
            Region::Uk => "amazon.co.uk",
            Region::De => "amazon.de",
            Region::Fr => "amazon.fr",
            Region::Jp => "amazon.co.jp",
            Region::Ca => "amazon.ca",
            Region::It => "amazon.it",
            Region::Es => "amazon.es",
            Region::In => "amazon.in",
            Region::Cn => "amazon.cn",
        }
    }

    /// Returns the storefront base URL for this region.
    pub fn base_url(&self) -> String {
        format!("https://www.{}", self.domain())
    }

    /// Returns the Product Advertising API host for this region.
    ///
    /// The original six locales live under `ecs.amazonaws`; stores added
    /// later were only ever served from `webservices.amazon`.
    pub fn api_host(&self) -> &'static str {
        match self {
            Region::Us => "ecs.amazonaws.com",
            Region::Uk => "ecs.amazonaws.co.uk",
            Region::De => "ecs.amazonaws.de",
            Region::Fr => "ecs.amazonaws.fr",
            Region::Jp => "ecs.amazonaws.jp",
            Region::Ca => "ecs.amazonaws.ca",
            Region::It => "webservices.amazon.it",
            Region::Es => "webservices.amazon.es",
            Region::In => "webservices.amazon.in",
            Region::Cn => "webservices.amazon.cn",
        }
    }

    /// Returns the Accept-Language header value for this region.
    pub fn accept_language(&self) -> &'static str {
        match self {
            Region::Us | Region::Ca => "en-US,en;q=0.9",
            Region::Uk => "en-GB,en;q=0.9",
            Region::De => "de-DE,de;q=0.9,en;q=0.8",
            Region::Fr => "fr-FR,fr;q=0.9,en;q=0.8",
            Region::Jp => "ja-JP,ja;q=0.9,en;q=0.8",
            Region::It => "it-IT,it;q=0.9,en;q=0.8",
            Region::Es => "es-ES,es;q=0.9,en;q=0.8",
            Region::In => "en-IN,en;q=0.9,hi;q=0.8",
            Region::Cn => "zh-CN,zh;q=0.9,en;q=0.8",
        }
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[
            Region::Us,
            Region::Uk,
            Region::De,
            Region::Fr,
            Region::Jp,
            Region::Ca,
            Region::It,
            Region::Es,
            Region::In,
            Region::Cn,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::Us => "us",
            Region::Uk => "uk",
            Region::De => "de",
            Region::Fr => "fr",
            Region::Jp => "jp",
            Region::Ca => "ca",
            Region::It => "it",
            Region::Es => "es",
            Region::In => "in",
            Region::Cn => "cn",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Region::Us),
            "uk" | "gb" | "united kingdom" => Ok(Region::Uk),
            "de" | "germany" => Ok(Region::De),
            "fr" | "france" => Ok(Region::Fr),
            "jp" | "japan" => Ok(Region::Jp),
            "ca" | "canada" => Ok(Region::Ca),
            "it" | "italy" => Ok(Region::It),
            "es" | "spain" => Ok(Region::Es),
            "in" | "india" => Ok(Region::In),
            "cn" | "china" => Ok(Region::Cn),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown region '{}'. Valid regions: us, uk, de, fr, jp, ca, it, es, in, cn",
            self.0
        )
    }
}

impl std::error::Error for RegionParseError {}
