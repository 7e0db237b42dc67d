use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GenerateError;

/// The document could not be decoded into a [`Config`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DecodeError(#[from] serde_yaml::Error);

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "de::nullable")]
    pub site: SiteInfo,
    #[serde(deserialize_with = "de::nullable")]
    pub social: SocialLinks,
    #[serde(deserialize_with = "de::nullable")]
    pub header: Header,
    #[serde(deserialize_with = "de::nullable")]
    pub services: Services,
    #[serde(deserialize_with = "de::nullable")]
    pub projects: Projects,
    #[serde(deserialize_with = "de::nullable")]
    pub expertise: Expertise,
    #[serde(deserialize_with = "de::nullable")]
    pub footer: Footer
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SiteInfo {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::text")]
    pub author: String,
    #[serde(deserialize_with = "de::text")]
    pub email: String,
    /// Build identifier, usually a date or a short hash.
    #[serde(deserialize_with = "de::text")]
    pub build: String,
    /// Prefix prepended to asset links, e.g. `./` or `/portfolio/`.
    #[serde(deserialize_with = "de::text")]
    pub rel_path: String
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "de::text")]
    pub github: String,
    #[serde(deserialize_with = "de::text")]
    pub linkedin: String,
    #[serde(deserialize_with = "de::text")]
    pub twitter: String
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Header {
    /// Title lines, joined by the template.
    #[serde(deserialize_with = "de::text_list")]
    pub title: Vec<String>,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::nullable")]
    pub cta: Vec<CallToAction>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CallToAction {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::text")]
    pub url: String,
    #[serde(deserialize_with = "de::text")]
    pub icon: String
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Services {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::nullable")]
    pub items: Vec<ServiceItem>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceItem {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::text")]
    pub icon: String
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Projects {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub profile_link: String,
    #[serde(deserialize_with = "de::nullable")]
    pub items: Vec<ProjectItem>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectItem {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub url: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::text_list")]
    pub tags: Vec<String>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Expertise {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::nullable")]
    pub categories: Vec<ExpertiseCategory>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExpertiseCategory {
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub icon: String,
    #[serde(deserialize_with = "de::text_list")]
    pub skills: Vec<String>
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Footer {
    #[serde(deserialize_with = "de::text")]
    pub copyright: String,
    #[serde(deserialize_with = "de::nullable")]
    pub license: LicenseInfo
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LicenseInfo {
    #[serde(deserialize_with = "de::text")]
    pub text: String,
    #[serde(deserialize_with = "de::text")]
    pub url: String,
    #[serde(deserialize_with = "de::text")]
    pub license_type: String,
    #[serde(deserialize_with = "de::text")]
    pub license_url: String
}

impl Config {
    /// Decodes a site document. Missing keys and explicit nulls fall back
    /// to empty values, unknown keys are ignored, and nothing is validated
    /// beyond the shape of the document.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let bytes = fs::read(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::decode(&bytes)?)
    }
}

/// Field deserializers that accept what a hand-written YAML document tends
/// to contain: `key:` with no value, and bare numbers or booleans in text
/// fields. serde_yaml hands any scalar to a string visitor as its source
/// text, so `1.10` stays `"1.10"` and `0x1F` stays `"0x1F"`.
mod de {
    use serde::de::{Deserialize, Deserializer};

    pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>
    {
        nullable(deserializer)
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>
    {
        Ok(Option::<Vec<Option<String>>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }
}
