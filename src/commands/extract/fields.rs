use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use regex::{Regex, RegexBuilder};

use crate::config::PatternConfig;
use crate::model::{CityStateZip, ExtractedFields};

#[derive(Debug)]
pub struct FieldExtractor {
    email: Regex,
    phone: Regex,
    url: Regex,
    company_name: Regex,
    address: Regex,
    city_state_zip: Regex,
}

impl FieldExtractor {
    pub fn new(patterns: &PatternConfig) -> Result<Self> {
        let extractor = Self {
            email: compile(&patterns.email, true).context("failed to compile email regex")?,
            phone: compile(&patterns.phone, false).context("failed to compile phone regex")?,
            url: compile(&patterns.url, true).context("failed to compile url regex")?,
            company_name: compile(&patterns.company_name, false)
                .context("failed to compile company name regex")?,
            address: compile(&patterns.address, true)
                .context("failed to compile address regex")?,
            city_state_zip: compile(&patterns.city_state_zip, false)
                .context("failed to compile city/state/zip regex")?,
        };

        if extractor.phone.captures_len() < 4 {
            bail!("phone regex must capture area code, prefix and line number");
        }
        if extractor.city_state_zip.captures_len() < 4 {
            bail!("city/state/zip regex must capture city, state and zip");
        }

        Ok(extractor)
    }

    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            emails: dedup_first_seen(self.email.find_iter(text).map(|m| m.as_str())),
            phones: self
                .phone
                .captures_iter(text)
                .map(|captures| {
                    format!(
                        "({}){}-{}",
                        group_str(&captures, 1),
                        group_str(&captures, 2),
                        group_str(&captures, 3)
                    )
                })
                .collect(),
            urls: dedup_first_seen(
                self.url
                    .find_iter(text)
                    .map(|m| m.as_str().trim_end_matches('.'))
                    .filter(|url| !url.is_empty()),
            ),
            addresses: self
                .address
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
            city_state_zip: self
                .city_state_zip
                .captures_iter(text)
                .map(|captures| CityStateZip {
                    city: group_str(&captures, 1).to_string(),
                    state: group_str(&captures, 2).to_string(),
                    zip: group_str(&captures, 3).to_string(),
                })
                .collect(),
            company_mentions: self
                .company_name
                .find_iter(text)
                .map(|m| m.as_str().trim().to_string())
                .collect(),
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .with_context(|| format!("invalid pattern: {pattern}"))
}

fn group_str<'t>(captures: &regex::Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map(|m| m.as_str()).unwrap_or("")
}

fn dedup_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(ToOwned::to_owned)
        .collect()
}
