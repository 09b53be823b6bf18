//! Composition rule violations.

use thiserror::Error;

/// One broken roster rule. `Display` renders the player-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Missing Leader!")]
    MissingLeader,
    #[error("Only one Leader allowed!")]
    TooManyLeaders { count: u32 },
    #[error("Too many Gonks! ({gonks}/{allowed})")]
    TooManyGonks { gonks: u32, allowed: u32 },
    #[error("Budget exceeded! ({cost}/{target} EB)")]
    BudgetExceeded { cost: u32, target: u32 },
    #[error("{item} requires {required} Street Cred (current: {current})")]
    StreetCredTooLow {
        item: String,
        required: u32,
        current: u32,
    },
    #[error("Too many copies of {item}! ({count}/{limit})")]
    RarityExceeded { item: String, count: u32, limit: u32 },
    #[error("{model} carries too many Bulky items! ({count}/{limit})")]
    TooManyBulky { model: String, count: u32, limit: u32 },
    #[error("{model} cannot use Cybergear {item} without Cyber-Character")]
    CybergearWithoutCyberCharacter { model: String, item: String },
    #[error("{model} cannot run programs without Netrunner ({programs} equipped)")]
    ProgramsWithoutNetrunner { model: String, programs: u32 },
    #[error("{model} runs too many programs! ({programs}/{tech} Tech)")]
    TooManyPrograms { model: String, programs: u32, tech: u32 },
    #[error("{model} is not available to this faction")]
    WrongFaction { model: String },
}
