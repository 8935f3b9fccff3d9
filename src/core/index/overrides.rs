//! Override Sheet Ingestion
//!
//! Community override data lives in four published spreadsheet tabs:
//! monster nicknames, evolution-tree nicknames, pantheon (series)
//! nicknames, and name-token aliases. This module fetches and parses
//! them into plain row sets; all interpretation happens in the builder.
//!
//! Fetch failures are never fatal to the caller: a sheet that cannot be
//! fetched is an empty row set, and only the total absence of data
//! surfaces as [`IndexError::DataSource`].

use std::time::Duration;

use log::{debug, warn};

use super::error::{IndexError, Result};
use crate::config::OverrideConfig;

/// One parsed override row: `(key, override name, trailing flags)`.
/// `key` is a monster or series id rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRow {
    pub key: String,
    pub name: String,
    pub flags: Vec<String>,
}

impl OverrideRow {
    /// The row's id, if the key is numeric. Non-numeric keys mark
    /// header or commentary rows and are skipped by the builder.
    pub fn numeric_key(&self) -> Option<u32> {
        self.key.parse().ok()
    }

    fn flag(&self, idx: usize) -> bool {
        self.flags.get(idx).is_some_and(|f| !f.trim().is_empty())
    }

    /// Nickname rows: treat the override as literal name tokens rather
    /// than a single collapsed nickname string.
    pub fn is_literal_tokens(&self) -> bool {
        self.flag(0)
    }

    /// Rows marked inactive are ignored entirely.
    pub fn is_ignored(&self) -> bool {
        self.flag(1)
    }
}

/// The four override row sets consumed by the lexicon builder.
#[derive(Debug, Clone, Default)]
pub struct OverrideSheets {
    pub nickname: Vec<OverrideRow>,
    pub treename: Vec<OverrideRow>,
    pub pantheon: Vec<OverrideRow>,
    pub token_alias: Vec<OverrideRow>,
}

impl OverrideSheets {
    /// Empty sheets: produces a valid, derived-tokens-only lexicon.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parse one sheet's CSV text into rows. Rows with fewer than two
/// fields fail shape validation and are skipped.
pub fn parse_sheet_csv(text: &str) -> Vec<OverrideRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("skipping malformed override row: {e}");
                continue;
            }
        };
        if record.len() < 2 {
            debug!("skipping short override row: {record:?}");
            continue;
        }
        rows.push(OverrideRow {
            key: record[0].trim().to_string(),
            name: record[1].to_string(),
            flags: record.iter().skip(2).map(str::to_string).collect(),
        });
    }
    rows
}

async fn fetch_sheet(client: &reqwest::Client, url: &str) -> Result<Vec<OverrideRow>> {
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_sheet_csv(&text))
}

/// Fetch all four override sheets. Individual sheet failures degrade to
/// empty row sets with a warning; if no sheet at all is reachable, the
/// whole fetch is reported as [`IndexError::DataSource`].
pub async fn fetch_override_sheets(config: &OverrideConfig) -> Result<OverrideSheets> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let mut fetched = 0usize;
    let mut grab = |label: &'static str, result: Result<Vec<OverrideRow>>| match result {
        Ok(rows) => {
            fetched += 1;
            rows
        }
        Err(e) => {
            warn!("override sheet '{label}' unavailable, continuing without it: {e}");
            Vec::new()
        }
    };

    let (nickname, treename, pantheon, token_alias) = tokio::join!(
        fetch_sheet(&client, &config.nickname_url),
        fetch_sheet(&client, &config.treename_url),
        fetch_sheet(&client, &config.pantheon_url),
        fetch_sheet(&client, &config.token_alias_url),
    );
    let sheets = OverrideSheets {
        nickname: grab("nickname", nickname),
        treename: grab("treename", treename),
        pantheon: grab("pantheon", pantheon),
        token_alias: grab("token alias", token_alias),
    };

    if fetched == 0 {
        return Err(IndexError::DataSource(
            "no override sheet could be fetched".to_string(),
        ));
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_rows() {
        let rows = parse_sheet_csv("1000,loki\n1001,odin,,x\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "1000");
        assert_eq!(rows[0].name, "loki");
        assert!(!rows[0].is_ignored());
        assert!(rows[1].is_ignored());
    }

    #[test]
    fn test_parse_skips_short_rows() {
        let rows = parse_sheet_csv("justonefield\n1000,ok\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "ok");
    }

    #[test]
    fn test_literal_tokens_flag() {
        let rows = parse_sheet_csv("1000,dark loki,literal\n1001,plain\n");
        assert!(rows[0].is_literal_tokens());
        assert!(!rows[1].is_literal_tokens());
    }

    #[test]
    fn test_numeric_key() {
        let rows = parse_sheet_csv("header,name\n1000,loki\n");
        assert_eq!(rows[0].numeric_key(), None);
        assert_eq!(rows[1].numeric_key(), Some(1000));
    }
}
