//! Simulator configuration, read from the environment at startup.

/// Knobs for `dispatch-sim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of couriers to register (`DISPATCH_COURIERS`).
    pub couriers: usize,
    /// Number of orders to create (`DISPATCH_ORDERS`).
    pub orders: usize,
    /// RNG seed for reproducible runs (`DISPATCH_SEED`); random when unset.
    pub seed: Option<u64>,
    /// Upper bound on simulation ticks (`DISPATCH_MAX_STEPS`).
    pub max_steps: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            couriers: 3,
            orders: 5,
            seed: None,
            max_steps: 200,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values are logged and
    /// replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            couriers: parse_or("DISPATCH_COURIERS", &lookup, defaults.couriers),
            orders: parse_or("DISPATCH_ORDERS", &lookup, defaults.orders),
            seed: lookup("DISPATCH_SEED").and_then(|raw| match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    tracing::warn!(value = %raw, "DISPATCH_SEED is not a u64; using a random seed");
                    None
                }
            }),
            max_steps: parse_or("DISPATCH_MAX_STEPS", &lookup, defaults.max_steps),
        }
    }
}

fn parse_or(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: usize) -> usize {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "invalid setting; using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(SimConfig::from_lookup(|_| None), SimConfig::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("DISPATCH_COURIERS", "4"),
            ("DISPATCH_ORDERS", " 9 "),
            ("DISPATCH_SEED", "42"),
            ("DISPATCH_MAX_STEPS", "50"),
        ]));
        assert_eq!(
            config,
            SimConfig {
                couriers: 4,
                orders: 9,
                seed: Some(42),
                max_steps: 50,
            }
        );
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("DISPATCH_COURIERS", "many"),
            ("DISPATCH_SEED", "-1"),
        ]));
        assert_eq!(config.couriers, 3);
        assert_eq!(config.seed, None);
    }
}
