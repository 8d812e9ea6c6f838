//! Typed navigation hand-off between the broadcast page and the recipient
//! selection page.
//!
//! The URL contract stays `?broadcastId=7&recipients=1,2,3` so links remain
//! shareable, but views only ever see the parsed types below.

use std::fmt;

use url::form_urlencoded;

use crate::log_warn;
use crate::stores::SelectionSet;

const BROADCAST_ID: &str = "broadcastId";
const RECIPIENTS: &str = "recipients";

fn parse_id(raw: &str, key: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            log_warn!("dropping malformed {key} value {raw:?}");
            None
        }
    }
}

/// Query carried by the recipient selection page: which broadcast is being sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorQuery {
    pub broadcast_id: Option<i64>,
}

impl SelectorQuery {
    pub fn for_broadcast(id: i64) -> Self {
        Self {
            broadcast_id: Some(id),
        }
    }

    pub fn parse(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if key == BROADCAST_ID {
                out.broadcast_id = parse_id(&value, BROADCAST_ID);
            }
        }
        out
    }
}

impl fmt::Display for SelectorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.broadcast_id {
            write!(f, "{BROADCAST_ID}={id}")?;
        }
        Ok(())
    }
}

/// Query carried back to the broadcast page once recipients are chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingHandoff {
    pub broadcast_id: Option<i64>,
    pub recipients: SelectionSet,
}

impl PendingHandoff {
    pub fn new(broadcast_id: i64, recipients: SelectionSet) -> Self {
        Self {
            broadcast_id: Some(broadcast_id),
            recipients,
        }
    }

    pub fn parse(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if key == BROADCAST_ID {
                out.broadcast_id = parse_id(&value, BROADCAST_ID);
            } else if key == RECIPIENTS {
                out.recipients = value
                    .split(',')
                    .filter(|part| !part.trim().is_empty())
                    .filter_map(|part| parse_id(part, RECIPIENTS))
                    .collect();
            }
        }
        out
    }

    /// The broadcast and recipients of a complete hand-off; `None` when either
    /// half is missing.
    pub fn pending(&self) -> Option<(i64, &SelectionSet)> {
        match self.broadcast_id {
            Some(id) if !self.recipients.is_empty() => Some((id, &self.recipients)),
            _ => None,
        }
    }
}

impl fmt::Display for PendingHandoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(id) = self.broadcast_id {
            write!(f, "{BROADCAST_ID}={id}")?;
            sep = "&";
        }
        if !self.recipients.is_empty() {
            write!(f, "{sep}{RECIPIENTS}={}", self.recipients.join())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_query_contract() {
        let handoff = PendingHandoff::parse("broadcastId=7&recipients=1,2,3");
        let (id, recipients) = handoff.pending().unwrap();
        assert_eq!(id, 7);
        assert_eq!(recipients.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn renders_the_query_contract() {
        let handoff = PendingHandoff::new(7, [3, 1, 2].into_iter().collect());
        assert_eq!(handoff.to_string(), "broadcastId=7&recipients=1,2,3");
        assert_eq!(SelectorQuery::for_broadcast(4).to_string(), "broadcastId=4");
    }

    #[test]
    fn accepts_percent_encoded_commas_and_leading_question_mark() {
        let handoff = PendingHandoff::parse("?recipients=4%2C5&broadcastId=9");
        assert_eq!(handoff.broadcast_id, Some(9));
        assert_eq!(handoff.recipients.to_vec(), vec![4, 5]);
    }

    #[test]
    fn malformed_ids_are_dropped() {
        let handoff = PendingHandoff::parse("broadcastId=abc&recipients=1,x,,3");
        assert_eq!(handoff.broadcast_id, None);
        assert_eq!(handoff.recipients.to_vec(), vec![1, 3]);
        assert!(handoff.pending().is_none());
    }

    #[test]
    fn incomplete_handoff_is_not_pending() {
        assert!(PendingHandoff::parse("broadcastId=7").pending().is_none());
        assert!(PendingHandoff::parse("recipients=1,2").pending().is_none());
        assert!(PendingHandoff::parse("").pending().is_none());
        assert_eq!(SelectorQuery::parse("").broadcast_id, None);
        assert_eq!(PendingHandoff::default().to_string(), "");
    }
}
