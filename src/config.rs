use std::env;

use crate::error::EngineError;

/// Scoring weights. Defaults match the observed ranking behavior; each
/// weight can be overridden through the environment for tuning without a
/// rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub base_score: i32,
    pub exact_match_bonus: i32,
    pub general_fallback_bonus: i32,
    pub availability_bonus: i32,
    pub emergency_bonus: i32,
    pub workload_relief_cap: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            exact_match_bonus: 200,
            general_fallback_bonus: 100,
            availability_bonus: 50,
            emergency_bonus: 40,
            workload_relief_cap: 30,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Ok(Self {
            base_score: parse_or_default("SCORE_BASE", defaults.base_score)?,
            exact_match_bonus: parse_or_default("SCORE_EXACT_MATCH_BONUS", defaults.exact_match_bonus)?,
            general_fallback_bonus: parse_or_default(
                "SCORE_GENERAL_FALLBACK_BONUS",
                defaults.general_fallback_bonus,
            )?,
            availability_bonus: parse_or_default("SCORE_AVAILABILITY_BONUS", defaults.availability_bonus)?,
            emergency_bonus: parse_or_default("SCORE_EMERGENCY_BONUS", defaults.emergency_bonus)?,
            workload_relief_cap: parse_or_default("SCORE_WORKLOAD_RELIEF_CAP", defaults.workload_relief_cap)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, EngineError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| EngineError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
