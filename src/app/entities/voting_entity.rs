use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VotingSummary {
    #[serde(rename = "identifier")]
    pub identifier: String,

    #[serde(rename = "title")]
    pub title: String,

    #[serde(rename = "description")]
    pub description: String,

    #[serde(rename = "nftContract")]
    pub nft_contract: Address,

    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,

    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

impl VotingSummary {
    pub fn status_at(&self, now: DateTime<Utc>) -> VotingStatus {
        if self.end_time < now {
            VotingStatus::Ended
        } else {
            VotingStatus::Ongoing
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingStatus {
    Ongoing,
    Ended,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "votes")]
    pub votes: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenHolder {
    #[serde(rename = "address")]
    pub address: Address,

    #[serde(rename = "hasVoted")]
    pub has_voted: bool,
}

/// Final state of a ballot, computed from the tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoCandidates,
    Tie,
    Winner(usize),
}

impl Outcome {
    /// Display icon the result page shows next to the outcome.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Outcome::NoCandidates => None,
            Outcome::Tie => Some("balance"),
            Outcome::Winner(_) => Some("crown"),
        }
    }
}

pub fn datetime_from_epoch(secs: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(start: DateTime<Utc>, end: DateTime<Utc>) -> VotingSummary {
        VotingSummary {
            identifier: "election-1".to_string(),
            title: "Board election".to_string(),
            description: String::new(),
            nft_contract: Address::ZERO,
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn status_follows_the_end_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let open = summary(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1));
        let done = summary(now - chrono::Duration::hours(2), now - chrono::Duration::hours(1));
        let upcoming = summary(now + chrono::Duration::hours(1), now + chrono::Duration::hours(2));

        assert_eq!(open.status_at(now), VotingStatus::Ongoing);
        assert_eq!(done.status_at(now), VotingStatus::Ended);
        // Not started yet still lists as ongoing, only a passed end flips it
        assert_eq!(upcoming.status_at(now), VotingStatus::Ongoing);
    }

    #[test]
    fn epoch_conversion_bounds() {
        assert_eq!(datetime_from_epoch(0), Some(DateTime::UNIX_EPOCH));
        let date = datetime_from_epoch(1_700_000_000).unwrap();
        assert_eq!(date.timestamp(), 1_700_000_000);
        assert_eq!(datetime_from_epoch(u64::MAX), None);
    }

    #[test]
    fn outcome_icons() {
        assert_eq!(Outcome::Winner(0).icon(), Some("crown"));
        assert_eq!(Outcome::Tie.icon(), Some("balance"));
        assert_eq!(Outcome::NoCandidates.icon(), None);
    }
}
