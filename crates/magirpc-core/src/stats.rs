//! Network statistics snapshot.
//!
//! `getmininginfo` differs between Magi daemon versions: numbers arrive as
//! strings or numbers, block reward may be nested, and the expected time to
//! stake is reported in days, hours or minutes under different keys. This
//! module folds all of that into one [`StatisticsSnapshot`].

use serde::{Serialize, Serializer};

use crate::error::{CoreError, Operation, RpcError, UpstreamContext};
use crate::parse::{parse_f64, parse_u64};
use crate::prices::PriceBook;
use crate::rpc::MiningInfo;
use crate::service::WalletService;

/// Expected-time-to-stake keys in priority order, with their conversion to
/// hours.
const STAKE_TIME_FIELDS: [(&str, fn(f64) -> f64); 3] = [
    ("Expected PoS (days)", days_to_hours),
    ("Expected PoS (hours)", identity),
    ("Expected PoS (minutes)", minutes_to_hours),
];

fn days_to_hours(days: f64) -> f64 {
    days * 24.0
}

fn identity(hours: f64) -> f64 {
    hours
}

fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / 60.0
}

// ==============================================================================
// Snapshot Types
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    pub pow: f64,
    pub pos: f64,
}

/// Expected hours until a stake matures. `Unknown` is a distinct state, not
/// zero: it serializes as the string `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoursToStake {
    Hours(f64),
    Unknown,
}

impl HoursToStake {
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::Hours(h) => Some(h),
            Self::Unknown => None,
        }
    }
}

impl Serialize for HoursToStake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Hours(h) => serializer.serialize_f64(*h),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub difficulty: Difficulty,
    pub blocktx: u64,
    pub blocks: u64,
    pub reward: f64,
    pub hashrate: f64,
    pub price: PriceBook,
    pub connections: u64,
    pub stake_interest: f64,
    pub hours_to_stake: HoursToStake,
    pub total_balance: f64,
}

// ==============================================================================
// Aggregation
// ==============================================================================

impl WalletService {
    /// Node mining data, connections, wallet balance and prices in one read.
    ///
    /// Node calls and price lookups run concurrently. Any node field that is
    /// missing or unparsable fails the whole call.
    pub async fn get_statistics(&self) -> Result<StatisticsSnapshot, CoreError> {
        let (node, price) = tokio::join!(
            async {
                tokio::try_join!(
                    self.rpc.get_mining_info(),
                    self.rpc.get_connection_count(),
                    self.rpc.get_balance(None, None),
                )
            },
            self.get_price()
        );
        let (info, connections, total_balance) = node.during(Operation::GetStatistics)?;
        let mining = MiningFigures::from_info(&info).during(Operation::GetStatistics)?;
        let price = price?;

        Ok(StatisticsSnapshot {
            difficulty: mining.difficulty,
            blocktx: mining.blocktx,
            blocks: mining.blocks,
            reward: mining.reward,
            hashrate: mining.hashrate,
            price,
            connections,
            stake_interest: mining.stake_interest,
            hours_to_stake: mining.hours_to_stake,
            total_balance,
        })
    }
}

/// The normalized part of `getmininginfo`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MiningFigures {
    difficulty: Difficulty,
    blocktx: u64,
    blocks: u64,
    reward: f64,
    hashrate: f64,
    stake_interest: f64,
    hours_to_stake: HoursToStake,
}

impl MiningFigures {
    fn from_info(info: &MiningInfo) -> Result<Self, RpcError> {
        Ok(Self {
            difficulty: parse_difficulty(info)?,
            blocktx: parse_u64(info.get("currentblocktx"), "currentblocktx")?,
            blocks: parse_u64(info.get("blocks"), "blocks")?,
            reward: parse_block_reward(info)?,
            hashrate: parse_f64(info.get("networkhashps"), "networkhashps")?,
            stake_interest: parse_f64(info.get("stakeinterest"), "stakeinterest")?,
            hours_to_stake: parse_hours_to_stake(info)?,
        })
    }
}

fn parse_difficulty(info: &MiningInfo) -> Result<Difficulty, RpcError> {
    let difficulty = info
        .get("difficulty")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| {
            RpcError::InvalidResponse("difficulty must hold proof-of-work and proof-of-stake".into())
        })?;
    Ok(Difficulty {
        pow: parse_f64(difficulty.get("proof-of-work"), "difficulty.proof-of-work")?,
        pos: parse_f64(difficulty.get("proof-of-stake"), "difficulty.proof-of-stake")?,
    })
}

// Some daemons report `blockvalue` directly, others wrap it in an object
// carrying the same key.
fn parse_block_reward(info: &MiningInfo) -> Result<f64, RpcError> {
    match info.get("blockvalue") {
        Some(serde_json::Value::Object(inner)) => {
            parse_f64(inner.get("blockvalue"), "blockvalue.blockvalue")
        }
        other => parse_f64(other, "blockvalue"),
    }
}

fn parse_hours_to_stake(info: &MiningInfo) -> Result<HoursToStake, RpcError> {
    for (field, to_hours) in STAKE_TIME_FIELDS {
        if let Some(value) = info.get(field).filter(|v| !v.is_null()) {
            return parse_f64(Some(value), field).map(|n| HoursToStake::Hours(to_hours(n)));
        }
    }
    Ok(HoursToStake::Unknown)
}
