//! Configuration rules checked with `Validation`.
//!
//! Every rule runs, and all broken rules are reported together instead of
//! stopping at the first one.

use super::error::ConfigViolation;
use super::DeviceConfig;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest instance count; device minors are one byte wide.
pub const MAX_INSTANCES: usize = 255;

pub const MAX_HISTORY_DEPTH: usize = 4096;

pub const MAX_LOCK_POLL_INTERVAL_MS: u64 = 1000;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Check every rule, accumulating ALL violations.
pub fn validate(config: &DeviceConfig) -> Check {
    let checks = vec![
        check_instance_count(config.instance_count),
        check_base_name(&config.base_name),
        check_history_depth(config.history_depth),
        check_lock_poll_interval(config.lock_poll_interval_ms),
    ];

    Validation::all_vec(checks).map(|_| ())
}

fn check_instance_count(count: usize) -> Check {
    if (1..=MAX_INSTANCES).contains(&count) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::InstanceCount {
            found: count,
            max: MAX_INSTANCES,
        })
    }
}

fn check_base_name(name: &str) -> Check {
    if name.is_empty() {
        return Validation::fail(ConfigViolation::EmptyBaseName);
    }
    match name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        Some(found) => Validation::fail(ConfigViolation::BaseNameCharacter {
            name: name.to_string(),
            found,
        }),
        None => Validation::success(()),
    }
}

fn check_history_depth(depth: usize) -> Check {
    if depth <= MAX_HISTORY_DEPTH {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::HistoryDepth {
            found: depth,
            max: MAX_HISTORY_DEPTH,
        })
    }
}

fn check_lock_poll_interval(ms: u64) -> Check {
    if (1..=MAX_LOCK_POLL_INTERVAL_MS).contains(&ms) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::LockPollInterval {
            found: ms,
            max: MAX_LOCK_POLL_INTERVAL_MS,
        })
    }
}
