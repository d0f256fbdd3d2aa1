//! Data-driven game balance
//!
//! Five escalating levels: faster spawns, more viruses, new color themes.

/// Background/star colors for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub star: &'static str,
}

/// Balance tuple for a single level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    /// Probability a spawned enemy is a virus (0.0 - 1.0)
    pub virus_chance: f32,
    pub theme: Theme,
}

/// The full level progression. Viruses appear starting at level 3.
pub const LEVELS: [LevelConfig; 5] = [
    LevelConfig {
        spawn_interval: 1.0,
        virus_chance: 0.0,
        theme: Theme {
            background: "#000022",
            star: "#ffffff",
        },
    },
    LevelConfig {
        spawn_interval: 0.8,
        virus_chance: 0.0,
        theme: Theme {
            background: "#1a001a",
            star: "#ffccff",
        },
    },
    LevelConfig {
        spawn_interval: 0.6,
        virus_chance: 0.3,
        theme: Theme {
            background: "#001a00",
            star: "#ccffcc",
        },
    },
    LevelConfig {
        spawn_interval: 0.4,
        virus_chance: 0.5,
        theme: Theme {
            background: "#1a0000",
            star: "#ffcccc",
        },
    },
    LevelConfig {
        spawn_interval: 0.3,
        virus_chance: 0.7,
        theme: Theme {
            background: "#001a1a",
            star: "#ccffff",
        },
    },
];

/// Look up a level by index, clamping past-the-end to the final level
pub fn level(index: u32) -> &'static LevelConfig {
    let i = (index as usize).min(LEVELS.len() - 1);
    &LEVELS[i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_levels() {
        assert_eq!(LEVELS.len(), 5);
    }

    #[test]
    fn test_spawns_accelerate() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].spawn_interval < pair[0].spawn_interval);
        }
    }

    #[test]
    fn test_virus_pressure_never_drops() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].virus_chance >= pair[0].virus_chance);
        }
        // First two levels are a virus-free warmup
        assert_eq!(LEVELS[0].virus_chance, 0.0);
        assert_eq!(LEVELS[1].virus_chance, 0.0);
    }

    #[test]
    fn test_level_lookup_clamps() {
        assert_eq!(level(0).spawn_interval, 1.0);
        assert_eq!(level(4), level(99));
    }
}
