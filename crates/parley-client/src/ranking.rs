//! Leaderboard record parsing.
//!
//! A `RANKING_ENTRY` message carries one colon-delimited record in its
//! single field, `rank:username:score:wins`. This module turns that
//! record into a typed value.

use std::str::FromStr;

use crate::error::RankingError;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub rank: u32,
    pub username: String,
    pub score: u32,
    pub wins: u32,
}

impl FromStr for Ranking {
    type Err = RankingError;

    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = record.split(':').collect();
        let &[rank, username, score, wins] = fields.as_slice() else {
            return Err(RankingError::MalformedRecord(format!(
                "expected 4 fields, got {}",
                fields.len()
            )));
        };
        Ok(Self {
            rank: numeric("rank", rank)?,
            username: username.to_string(),
            score: numeric("score", score)?,
            wins: numeric("wins", wins)?,
        })
    }
}

fn numeric(name: &str, value: &str) -> Result<u32, RankingError> {
    value.parse().map_err(|_| {
        RankingError::MalformedRecord(format!("{name} is not numeric: {value:?}"))
    })
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_record() {
        let ranking: Ranking = "14:Alex:451:8".parse().unwrap();
        assert_eq!(ranking.rank, 14);
        assert_eq!(ranking.username, "Alex");
        assert_eq!(ranking.score, 451);
        assert_eq!(ranking.wins, 8);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(matches!(
            "14:Alex:451".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
        assert!(matches!(
            "14:Alex:451:8:extra".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
        assert!(matches!(
            "".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_fields() {
        assert!(matches!(
            "first:Alex:451:8".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
        assert!(matches!(
            "14:Alex:lots:8".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
        assert!(matches!(
            "14:Alex:451:-8".parse::<Ranking>(),
            Err(RankingError::MalformedRecord(_))
        ));
    }
}
