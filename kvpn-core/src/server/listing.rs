//! Server list filtering and ranking

use crate::server::record::{by_score_desc, VpnConfiguration};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which records a server list shows, and in what order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPolicy {
    /// Drop records whose expire time has passed
    #[serde(default = "default_hide_expired")]
    pub hide_expired: bool,

    /// Keep premium-only servers in the list
    #[serde(default = "default_include_premium")]
    pub include_premium: bool,
}

fn default_hide_expired() -> bool {
    true
}
fn default_include_premium() -> bool {
    true
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            hide_expired: default_hide_expired(),
            include_premium: default_include_premium(),
        }
    }
}

impl ListingPolicy {
    /// Filter `records` and sort them best score first
    ///
    /// The sort is stable, so records with equal scores keep store order.
    pub fn apply(&self, records: Vec<VpnConfiguration>, now: i64) -> Vec<VpnConfiguration> {
        let total = records.len();
        let mut listed: Vec<VpnConfiguration> = records
            .into_iter()
            .filter(|r| !(self.hide_expired && r.is_expired(now)))
            .filter(|r| self.include_premium || !r.premium)
            .collect();
        listed.sort_by(by_score_desc);

        debug!("Listing {} of {} servers", listed.len(), total);
        listed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, score: i64, expire_time: i64, premium: bool) -> VpnConfiguration {
        VpnConfiguration {
            country: country.to_string(),
            score,
            expire_time,
            premium,
            ..VpnConfiguration::empty()
        }
    }

    #[test]
    fn test_sorts_by_score_descending() {
        let policy = ListingPolicy::default();
        let listed = policy.apply(
            vec![record("A", 1, 0, false), record("B", 30, 0, false), record("C", 7, 0, false)],
            0,
        );
        let order: Vec<&str> = listed.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let policy = ListingPolicy::default();
        let listed = policy.apply(vec![record("A", 5, 0, false), record("B", 5, 0, false)], 0);
        assert_eq!(listed[0].country, "A");
        assert_eq!(listed[1].country, "B");
    }

    #[test]
    fn test_premium_filter() {
        let policy = ListingPolicy {
            include_premium: false,
            ..ListingPolicy::default()
        };
        let listed = policy.apply(vec![record("A", 5, 0, true), record("B", 1, 0, false)], 0);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].country, "B");
    }

    #[test]
    fn test_expired_kept_when_not_hidden() {
        let policy = ListingPolicy {
            hide_expired: false,
            ..ListingPolicy::default()
        };
        let listed = policy.apply(vec![record("A", 5, 100, false)], 200);
        assert_eq!(listed.len(), 1);
    }
}
