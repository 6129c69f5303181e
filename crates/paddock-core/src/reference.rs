//! Static Formula 1 reference data.
//!
//! Read-only tables of teams, circuits and the helpers that derive
//! teammate names, performance tiers and circuit-specific challenges.
//! Keys are short identifier strings; the engine looks these up but
//! never mutates them.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

/// Coarse performance bucket mapping a team to a finishing-position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PerformanceTier {
    TopTeam,
    Midfield,
    Backmarker,
}

/// F1 team information.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub name: &'static str,
    pub short_name: &'static str,
    pub engine: &'static str,
    pub principal: &'static str,
    pub drivers: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub championship_wins: u32,
}

/// F1 circuit information.
#[derive(Debug, Clone, Serialize)]
pub struct Circuit {
    pub name: &'static str,
    pub country: &'static str,
    pub city: &'static str,
    pub length_km: f64,
    pub corners: u32,
    pub drs_zones: u32,
    pub characteristics: &'static [&'static str],
    pub lap_record: &'static str,
    pub difficulty: &'static str,
}

impl Circuit {
    /// Social-media hashtag for the circuit, e.g. `#SilverstoneCircuit`.
    pub fn hashtag(&self) -> String {
        format!("#{}", self.name.replace([' ', '-'], ""))
    }
}

/// 2025 grid, keyed by short team identifier.
pub static TEAMS: Lazy<HashMap<&'static str, Team>> = Lazy::new(|| {
    HashMap::from([
        (
            "red_bull",
            Team {
                name: "Red Bull Racing",
                short_name: "RBR",
                engine: "Honda RBPT",
                principal: "Christian Horner",
                drivers: &["Max Verstappen", "Liam Lawson"],
                colors: &["navy", "red", "yellow"],
                championship_wins: 6,
            },
        ),
        (
            "ferrari",
            Team {
                name: "Scuderia Ferrari",
                short_name: "Ferrari",
                engine: "Ferrari",
                principal: "Frédéric Vasseur",
                drivers: &["Charles Leclerc", "Lewis Hamilton"],
                colors: &["red"],
                championship_wins: 16,
            },
        ),
        (
            "mercedes",
            Team {
                name: "Mercedes-AMG Petronas F1 Team",
                short_name: "Mercedes",
                engine: "Mercedes",
                principal: "Toto Wolff",
                drivers: &["George Russell", "Kimi Antonelli"],
                colors: &["silver", "black", "turquoise"],
                championship_wins: 8,
            },
        ),
        (
            "mclaren",
            Team {
                name: "McLaren F1 Team",
                short_name: "McLaren",
                engine: "Mercedes",
                principal: "Andrea Stella",
                drivers: &["Lando Norris", "Oscar Piastri"],
                colors: &["orange", "blue"],
                championship_wins: 8,
            },
        ),
        (
            "aston_martin",
            Team {
                name: "Aston Martin Aramco Cognizant F1 Team",
                short_name: "Aston Martin",
                engine: "Mercedes",
                principal: "Mike Krack",
                drivers: &["Fernando Alonso", "Lance Stroll"],
                colors: &["green"],
                championship_wins: 0,
            },
        ),
        (
            "alpine",
            Team {
                name: "BWT Alpine F1 Team",
                short_name: "Alpine",
                engine: "Renault",
                principal: "Bruno Famin",
                drivers: &["Pierre Gasly", "Franco Colapinto"],
                colors: &["blue", "pink"],
                championship_wins: 2,
            },
        ),
        (
            "williams",
            Team {
                name: "Williams Racing",
                short_name: "Williams",
                engine: "Mercedes",
                principal: "James Vowles",
                drivers: &["Alex Albon", "Carlos Sainz"],
                colors: &["blue", "white"],
                championship_wins: 9,
            },
        ),
        (
            "racing_bulls",
            Team {
                name: "Racing Bulls",
                short_name: "RB",
                engine: "Honda RBPT",
                principal: "Laurent Mekies",
                drivers: &["Yuki Tsunoda", "Isack Hadjar"],
                colors: &["white", "blue"],
                championship_wins: 0,
            },
        ),
        (
            "haas",
            Team {
                name: "MoneyGram Haas F1 Team",
                short_name: "Haas",
                engine: "Ferrari",
                principal: "Ayao Komatsu",
                drivers: &["Esteban Ocon", "Oliver Bearman"],
                colors: &["white", "red", "blue"],
                championship_wins: 0,
            },
        ),
    ])
});

/// 2025 calendar, keyed by short circuit identifier.
pub static CIRCUITS: Lazy<HashMap<&'static str, Circuit>> = Lazy::new(|| {
    HashMap::from([
        (
            "australia",
            Circuit {
                name: "Albert Park Circuit",
                country: "Australia",
                city: "Melbourne",
                length_km: 5.278,
                corners: 14,
                drs_zones: 4,
                characteristics: &["semi-street", "fast", "bumpy", "unpredictable-weather"],
                lap_record: "1:20.260 (Charles Leclerc, 2022)",
                difficulty: "medium",
            },
        ),
        (
            "china",
            Circuit {
                name: "Shanghai International Circuit",
                country: "China",
                city: "Shanghai",
                length_km: 5.451,
                corners: 16,
                drs_zones: 2,
                characteristics: &["long-straights", "technical", "overtaking-opportunities"],
                lap_record: "1:32.238 (Michael Schumacher, 2004)",
                difficulty: "medium",
            },
        ),
        (
            "japan",
            Circuit {
                name: "Suzuka International Racing Course",
                country: "Japan",
                city: "Suzuka",
                length_km: 5.807,
                corners: 18,
                drs_zones: 2,
                characteristics: &["figure-eight", "technical", "challenging", "130r-corner"],
                lap_record: "1:30.983 (Lewis Hamilton, 2019)",
                difficulty: "high",
            },
        ),
        (
            "bahrain",
            Circuit {
                name: "Bahrain International Circuit",
                country: "Bahrain",
                city: "Sakhir",
                length_km: 5.412,
                corners: 15,
                drs_zones: 3,
                characteristics: &["high-speed", "desert", "night-race", "overtaking-opportunities"],
                lap_record: "1:31.447 (Pedro de la Rosa, 2005)",
                difficulty: "medium",
            },
        ),
        (
            "saudi_arabia",
            Circuit {
                name: "Jeddah Corniche Circuit",
                country: "Saudi Arabia",
                city: "Jeddah",
                length_km: 6.174,
                corners: 27,
                drs_zones: 3,
                characteristics: &["street-circuit", "high-speed", "narrow", "dangerous"],
                lap_record: "1:30.734 (Lewis Hamilton, 2021)",
                difficulty: "high",
            },
        ),
        (
            "miami",
            Circuit {
                name: "Miami International Autodrome",
                country: "United States",
                city: "Miami",
                length_km: 5.412,
                corners: 19,
                drs_zones: 3,
                characteristics: &["street-circuit", "hot", "showbiz", "long-straights"],
                lap_record: "1:29.708 (Max Verstappen, 2023)",
                difficulty: "medium",
            },
        ),
        (
            "imola",
            Circuit {
                name: "Autodromo Enzo e Dino Ferrari",
                country: "Italy",
                city: "Imola",
                length_km: 4.909,
                corners: 19,
                drs_zones: 1,
                characteristics: &["historic", "technical", "fast chicanes"],
                lap_record: "1:15.484 (Lewis Hamilton, 2020)",
                difficulty: "high",
            },
        ),
        (
            "monaco",
            Circuit {
                name: "Circuit de Monaco",
                country: "Monaco",
                city: "Monte Carlo",
                length_km: 3.337,
                corners: 19,
                drs_zones: 1,
                characteristics: &["street-circuit", "narrow", "prestigious", "difficult-overtaking"],
                lap_record: "1:12.909 (Lewis Hamilton, 2019)",
                difficulty: "high",
            },
        ),
        (
            "spain",
            Circuit {
                name: "Circuit de Barcelona-Catalunya",
                country: "Spain",
                city: "Barcelona",
                length_km: 4.675,
                corners: 14,
                drs_zones: 2,
                characteristics: &["testing-circuit", "balanced", "aero-demanding"],
                lap_record: "1:18.149 (Max Verstappen, 2023)",
                difficulty: "medium",
            },
        ),
        (
            "canada",
            Circuit {
                name: "Circuit Gilles Villeneuve",
                country: "Canada",
                city: "Montreal",
                length_km: 4.361,
                corners: 14,
                drs_zones: 3,
                characteristics: &["stop-go", "walls", "late-braking", "Wall of Champions"],
                lap_record: "1:13.078 (Valtteri Bottas, 2019)",
                difficulty: "medium",
            },
        ),
        (
            "austria",
            Circuit {
                name: "Red Bull Ring",
                country: "Austria",
                city: "Spielberg",
                length_km: 4.318,
                corners: 10,
                drs_zones: 3,
                characteristics: &["short-lap", "elevation", "power-track"],
                lap_record: "1:05.619 (Carlos Sainz, 2020)",
                difficulty: "medium",
            },
        ),
        (
            "silverstone",
            Circuit {
                name: "Silverstone Circuit",
                country: "United Kingdom",
                city: "Silverstone",
                length_km: 5.891,
                corners: 18,
                drs_zones: 2,
                characteristics: &["high-speed", "historic", "home-of-f1", "challenging-corners"],
                lap_record: "1:27.097 (Max Verstappen, 2020)",
                difficulty: "high",
            },
        ),
        (
            "spa",
            Circuit {
                name: "Circuit de Spa-Francorchamps",
                country: "Belgium",
                city: "Stavelot",
                length_km: 7.004,
                corners: 20,
                drs_zones: 2,
                characteristics: &["longest-circuit", "historic", "eau-rouge", "weather-unpredictable"],
                lap_record: "1:46.286 (Valtteri Bottas, 2018)",
                difficulty: "high",
            },
        ),
        (
            "hungary",
            Circuit {
                name: "Hungaroring",
                country: "Hungary",
                city: "Budapest",
                length_km: 4.381,
                corners: 14,
                drs_zones: 1,
                characteristics: &["twisty", "slow", "technical"],
                lap_record: "1:16.627 (Lewis Hamilton, 2020)",
                difficulty: "medium",
            },
        ),
        (
            "netherlands",
            Circuit {
                name: "Circuit Zandvoort",
                country: "Netherlands",
                city: "Zandvoort",
                length_km: 4.259,
                corners: 14,
                drs_zones: 2,
                characteristics: &["banked-corners", "narrow", "technical"],
                lap_record: "1:11.097 (Lewis Hamilton, 2021)",
                difficulty: "medium",
            },
        ),
        (
            "monza",
            Circuit {
                name: "Autodromo Nazionale di Monza",
                country: "Italy",
                city: "Monza",
                length_km: 5.793,
                corners: 11,
                drs_zones: 3,
                characteristics: &["temple-of-speed", "low-downforce", "historic", "passionate-fans"],
                lap_record: "1:21.046 (Rubens Barrichello, 2004)",
                difficulty: "medium",
            },
        ),
        (
            "baku",
            Circuit {
                name: "Baku City Circuit",
                country: "Azerbaijan",
                city: "Baku",
                length_km: 6.003,
                corners: 20,
                drs_zones: 2,
                characteristics: &["street-circuit", "long-straight", "castle-section"],
                lap_record: "1:43.009 (Charles Leclerc, 2019)",
                difficulty: "high",
            },
        ),
        (
            "singapore",
            Circuit {
                name: "Marina Bay Street Circuit",
                country: "Singapore",
                city: "Singapore",
                length_km: 4.940,
                corners: 19,
                drs_zones: 2,
                characteristics: &["night-race", "street-circuit", "humid"],
                lap_record: "1:41.905 (Kevin Magnussen, 2018)",
                difficulty: "high",
            },
        ),
        (
            "austin",
            Circuit {
                name: "Circuit of the Americas",
                country: "United States",
                city: "Austin",
                length_km: 5.513,
                corners: 20,
                drs_zones: 2,
                characteristics: &["modern", "elevation", "fast-sweepers"],
                lap_record: "1:36.169 (Charles Leclerc, 2019)",
                difficulty: "medium",
            },
        ),
        (
            "mexico",
            Circuit {
                name: "Autódromo Hermanos Rodríguez",
                country: "Mexico",
                city: "Mexico City",
                length_km: 4.304,
                corners: 17,
                drs_zones: 2,
                characteristics: &["high-altitude", "long-straight", "stadium-section"],
                lap_record: "1:17.774 (Valtteri Bottas, 2021)",
                difficulty: "medium",
            },
        ),
        (
            "brazil",
            Circuit {
                name: "Autódromo José Carlos Pace",
                country: "Brazil",
                city: "São Paulo",
                length_km: 4.309,
                corners: 15,
                drs_zones: 2,
                characteristics: &[
                    "anti-clockwise",
                    "elevation-changes",
                    "passionate-fans",
                    "unpredictable-weather",
                ],
                lap_record: "1:10.540 (Valtteri Bottas, 2018)",
                difficulty: "medium",
            },
        ),
        (
            "las_vegas",
            Circuit {
                name: "Las Vegas Strip Circuit",
                country: "United States",
                city: "Las Vegas",
                length_km: 6.201,
                corners: 17,
                drs_zones: 3,
                characteristics: &["street-circuit", "night-race", "long-straights", "showbiz"],
                lap_record: "1:35.490 (Oscar Piastri, 2023)",
                difficulty: "medium",
            },
        ),
        (
            "qatar",
            Circuit {
                name: "Lusail International Circuit",
                country: "Qatar",
                city: "Lusail",
                length_km: 5.419,
                corners: 16,
                drs_zones: 2,
                characteristics: &["night-race", "fast", "desert"],
                lap_record: "1:23.196 (Max Verstappen, 2021)",
                difficulty: "medium",
            },
        ),
        (
            "abu_dhabi",
            Circuit {
                name: "Yas Marina Circuit",
                country: "United Arab Emirates",
                city: "Abu Dhabi",
                length_km: 5.281,
                corners: 16,
                drs_zones: 2,
                characteristics: &["twilight-race", "modern-facilities", "title-decider", "marina"],
                lap_record: "1:26.103 (Max Verstappen, 2021)",
                difficulty: "medium",
            },
        ),
    ])
});

/// Default circuit used when a context has no explicit circuit yet.
pub const DEFAULT_CIRCUIT_KEY: &str = "silverstone";

/// Looks up a team by key.
pub fn team(key: &str) -> Option<&'static Team> {
    TEAMS.get(key)
}

/// Looks up a circuit by key.
pub fn circuit(key: &str) -> Option<&'static Circuit> {
    CIRCUITS.get(key)
}

/// Resolves a team display name to its performance tier.
///
/// Unlisted names resolve to `Midfield`.
pub fn performance_tier(team_name: &str) -> PerformanceTier {
    match team_name {
        "Red Bull Racing" | "Scuderia Ferrari" | "Mercedes-AMG Petronas F1 Team" => {
            PerformanceTier::TopTeam
        }
        "McLaren F1 Team"
        | "Aston Martin Aramco Cognizant F1 Team"
        | "BWT Alpine F1 Team"
        | "Williams Racing" => PerformanceTier::Midfield,
        "Racing Bulls" | "MoneyGram Haas F1 Team" => PerformanceTier::Backmarker,
        _ => PerformanceTier::Midfield,
    }
}

/// Derives up to three circuit-specific challenges from circuit
/// characteristics. Unknown circuits get a generic pair.
pub fn circuit_challenges(circuit_key: &str) -> Vec<&'static str> {
    let Some(circuit) = CIRCUITS.get(circuit_key) else {
        return vec!["setup challenges", "tyre management"];
    };

    let mut challenges = Vec::new();
    if circuit.characteristics.contains(&"narrow") {
        challenges.extend(["track positioning crucial", "limited overtaking"]);
    }
    if circuit.characteristics.contains(&"high-speed") {
        challenges.extend(["aerodynamic efficiency key", "slipstream battles"]);
    }
    if circuit.characteristics.contains(&"street-circuit") {
        challenges.extend(["barrier proximity", "no run-off areas"]);
    }
    if circuit.characteristics.contains(&"weather-unpredictable") {
        challenges.extend(["weather decisions critical", "tyre strategy complex"]);
    }

    challenges.truncate(3);
    challenges
}

/// Returns the teammate of a listed driver, if the driver is on the grid.
pub fn teammate_of(driver_name: &str) -> Option<&'static str> {
    let team = team_of_driver(driver_name)?;
    team.drivers
        .iter()
        .find(|d| **d != driver_name)
        .copied()
}

/// Returns the team a listed driver races for.
pub fn team_of_driver(driver_name: &str) -> Option<&'static Team> {
    TEAMS.values().find(|t| t.drivers.contains(&driver_name))
}

/// Picks a random competitor from the grid, excluding the given driver.
pub fn random_competitor(exclude_driver: &str, rng: &mut dyn RngCore) -> &'static str {
    let competitors: Vec<&'static str> = TEAMS
        .values()
        .flat_map(|t| t.drivers.iter().copied())
        .filter(|d| *d != exclude_driver)
        .collect();

    competitors
        .choose(rng)
        .copied()
        .unwrap_or("Lewis Hamilton")
}
