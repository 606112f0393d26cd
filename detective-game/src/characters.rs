//! Character pool and case setup.
//!
//! The victim and suspect templates are fixed reference data. Every game
//! clones the templates it needs so the pool itself is never mutated.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::GameError;
use crate::constants::LOG_GAME_START;
use crate::state::GameState;

pub const SUSPECTS_MIN: usize = 4;
pub const SUSPECTS_MAX: usize = 6;

/// CODIS STR loci tracked by the profiling test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Locus {
    D3S1358,
    #[serde(rename = "vWA")]
    Vwa,
    #[serde(rename = "FGA")]
    Fga,
    D8S1179,
    D21S11,
    D18S51,
    D5S818,
    #[serde(rename = "TH01")]
    Th01,
}

impl Locus {
    pub const ALL: [Self; 8] = [
        Self::D3S1358,
        Self::Vwa,
        Self::Fga,
        Self::D8S1179,
        Self::D21S11,
        Self::D18S51,
        Self::D5S818,
        Self::Th01,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D3S1358 => "D3S1358",
            Self::Vwa => "vWA",
            Self::Fga => "FGA",
            Self::D8S1179 => "D8S1179",
            Self::D21S11 => "D21S11",
            Self::D18S51 => "D18S51",
            Self::D5S818 => "D5S818",
            Self::Th01 => "TH01",
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restriction enzymes available to the RFLP and digest tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Enzyme {
    EcoRI,
    BamHI,
    HindIII,
}

impl Enzyme {
    pub const ALL: [Self; 3] = [Self::EcoRI, Self::BamHI, Self::HindIII];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EcoRI => "EcoRI",
            Self::BamHI => "BamHI",
            Self::HindIII => "HindIII",
        }
    }
}

impl fmt::Display for Enzyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Enzyme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EcoRI" => Ok(Self::EcoRI),
            "BamHI" => Ok(Self::BamHI),
            "HindIII" => Ok(Self::HindIII),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    O,
    A,
    B,
    #[serde(rename = "AB")]
    Ab,
}

impl BloodType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::A => "A",
            Self::B => "B",
            Self::Ab => "AB",
        }
    }

    /// Whether serum with anti-A antibodies agglutinates this type.
    #[must_use]
    pub const fn reacts_anti_a(self) -> bool {
        matches!(self, Self::A | Self::Ab)
    }

    /// Whether serum with anti-B antibodies agglutinates this type.
    #[must_use]
    pub const fn reacts_anti_b(self) -> bool {
        matches!(self, Self::B | Self::Ab)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dinner party guest, either the victim or one of the suspects.
///
/// Genetic markers are ground truth for lab result synthesis; the player
/// only ever sees them filtered through test results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub role: String,
    pub alibi: String,
    pub motive: String,
    pub alive: bool,
    pub is_killer: bool,
    pub is_victim: bool,
    pub blood_type: BloodType,
    pub str_profile: BTreeMap<Locus, [u8; 2]>,
    pub rflp_fragments: BTreeMap<Enzyme, Vec<u16>>,
    pub mt_dna_haplotype: String,
    pub hair_type: String,
    pub shoe_size: u32,
}

/// Roughly 15% of the population is Rh-negative; the simulation pins it
/// to two specific characters instead of rolling.
#[must_use]
pub fn rh_negative(character_id: &str) -> bool {
    matches!(character_id, "jack_the_ripper" | "aileen_wuornos")
}

fn str_profile(pairs: [(Locus, [u8; 2]); 8]) -> BTreeMap<Locus, [u8; 2]> {
    pairs.into_iter().collect()
}

fn rflp(eco: &[u16], bam: &[u16], hind: &[u16]) -> BTreeMap<Enzyme, Vec<u16>> {
    [
        (Enzyme::EcoRI, eco.to_vec()),
        (Enzyme::BamHI, bam.to_vec()),
        (Enzyme::HindIII, hind.to_vec()),
    ]
    .into_iter()
    .collect()
}

/// The victim present in every game.
#[must_use]
pub fn victim_template() -> &'static Character {
    static VICTIM: OnceLock<Character> = OnceLock::new();
    VICTIM.get_or_init(|| Character {
        id: "victor_graves".into(),
        name: "Dr. Victor Graves".into(),
        age: 65,
        role: "Wealthy criminologist and dinner party host".into(),
        alibi: "Found dead in the mansion".into(),
        motive: String::new(),
        alive: false,
        is_killer: false,
        is_victim: true,
        blood_type: BloodType::A,
        str_profile: str_profile([
            (Locus::D3S1358, [15, 17]),
            (Locus::Vwa, [16, 18]),
            (Locus::Fga, [21, 24]),
            (Locus::D8S1179, [12, 14]),
            (Locus::D21S11, [29, 31]),
            (Locus::D18S51, [14, 18]),
            (Locus::D5S818, [11, 13]),
            (Locus::Th01, [7, 9]),
        ]),
        rflp_fragments: rflp(
            &[1200, 2800, 4500, 7200],
            &[900, 3100, 5600, 8400],
            &[1500, 3400, 6100],
        ),
        mt_dna_haplotype: "H1a1".into(),
        hair_type: "wavy gray".into(),
        shoe_size: 10,
    })
}

/// The six-suspect pool the player chooses 4-6 guests from.
#[must_use]
pub fn suspect_pool() -> &'static [Character] {
    static POOL: OnceLock<Vec<Character>> = OnceLock::new();
    POOL.get_or_init(build_pool)
}

#[must_use]
pub fn pool_character(id: &str) -> Option<&'static Character> {
    suspect_pool().iter().find(|c| c.id == id)
}

fn suspect(
    id: &str,
    name: &str,
    age: u32,
    role: &str,
    alibi: &str,
    motive: &str,
    blood_type: BloodType,
    profile: [(Locus, [u8; 2]); 8],
    fragments: BTreeMap<Enzyme, Vec<u16>>,
    haplotype: &str,
    hair_type: &str,
    shoe_size: u32,
) -> Character {
    Character {
        id: id.into(),
        name: name.into(),
        age,
        role: role.into(),
        alibi: alibi.into(),
        motive: motive.into(),
        alive: true,
        is_killer: false,
        is_victim: false,
        blood_type,
        str_profile: str_profile(profile),
        rflp_fragments: fragments,
        mt_dna_haplotype: haplotype.into(),
        hair_type: hair_type.into(),
        shoe_size,
    }
}

fn build_pool() -> Vec<Character> {
    vec![
        suspect(
            "ted_bundy",
            "Ted Bundy",
            33,
            "Charming law student with a dark side",
            "Claims he was in the library reading case law",
            "Dr. Graves was about to publish a psychological profile that would expose his true nature",
            BloodType::O,
            [
                (Locus::D3S1358, [14, 16]),
                (Locus::Vwa, [17, 19]),
                (Locus::Fga, [22, 25]),
                (Locus::D8S1179, [10, 13]),
                (Locus::D21S11, [28, 30]),
                (Locus::D18S51, [12, 16]),
                (Locus::D5S818, [10, 12]),
                (Locus::Th01, [6, 8]),
            ],
            rflp(
                &[1050, 2600, 5100, 7800],
                &[750, 2900, 4800],
                &[1800, 3900, 5500, 8200],
            ),
            "J1c1",
            "straight dark brown",
            11,
        ),
        suspect(
            "john_wayne_gacy",
            "John Wayne Gacy",
            37,
            "Jovial entertainer who performs as a clown",
            "Claims he was performing card tricks in the parlor for other guests",
            "Dr. Graves discovered evidence linking him to disappearances in his neighborhood",
            BloodType::A,
            [
                (Locus::D3S1358, [13, 18]),
                (Locus::Vwa, [14, 20]),
                (Locus::Fga, [19, 27]),
                (Locus::D8S1179, [8, 15]),
                (Locus::D21S11, [25, 33]),
                (Locus::D18S51, [9, 21]),
                (Locus::D5S818, [8, 14]),
                (Locus::Th01, [5, 10]),
            ],
            rflp(
                &[1400, 3200, 6000, 8900, 9800],
                &[1100, 2500, 5200, 7600],
                &[2000, 4200, 7000],
            ),
            "K1a1",
            "curly black",
            10,
        ),
        suspect(
            "jack_the_ripper",
            "Jack the Ripper",
            45,
            "Mysterious surgeon with impeccable manners",
            "Claims he was examining the wine cellar collection",
            "Dr. Graves claimed to have identified the Ripper and planned a public reveal",
            BloodType::B,
            [
                (Locus::D3S1358, [16, 19]),
                (Locus::Vwa, [12, 22]),
                (Locus::Fga, [18, 30]),
                (Locus::D8S1179, [11, 17]),
                (Locus::D21S11, [26, 35]),
                (Locus::D18S51, [10, 24]),
                (Locus::D5S818, [9, 15]),
                (Locus::Th01, [7, 11]),
            ],
            rflp(
                &[800, 2100, 4800, 6500],
                &[1300, 3600, 6300, 9100],
                &[1100, 2800, 5000, 7400, 9500],
            ),
            "T1a1",
            "straight blonde",
            9,
        ),
        suspect(
            "charles_manson",
            "Charles Manson",
            40,
            "Charismatic cult leader with a wild stare",
            "Claims he was meditating in the garden under the moonlight",
            "Dr. Graves testified against his followers and had him placed on a watchlist",
            BloodType::O,
            [
                (Locus::D3S1358, [12, 20]),
                (Locus::Vwa, [15, 23]),
                (Locus::Fga, [20, 28]),
                (Locus::D8S1179, [9, 16]),
                (Locus::D21S11, [27, 36]),
                (Locus::D18S51, [11, 19]),
                (Locus::D5S818, [7, 11]),
                (Locus::Th01, [8, 10]),
            ],
            rflp(
                &[950, 3500, 5800],
                &[1600, 4100, 7300, 9600],
                &[1700, 3200, 5900, 8600],
            ),
            "U5a1",
            "wavy auburn",
            8,
        ),
        suspect(
            "jeffrey_dahmer",
            "Jeffrey Dahmer",
            31,
            "Quiet chemist with unsettling calm",
            "Claims he was in the kitchen preparing a special dessert",
            "Dr. Graves was investigating suspicious chemical purchases traced back to him",
            BloodType::A,
            [
                (Locus::D3S1358, [15, 18]),
                (Locus::Vwa, [13, 21]),
                (Locus::Fga, [23, 29]),
                (Locus::D8S1179, [7, 18]),
                (Locus::D21S11, [24, 32]),
                (Locus::D18S51, [8, 22]),
                (Locus::D5S818, [12, 16]),
                (Locus::Th01, [6, 9]),
            ],
            rflp(
                &[1600, 2400, 4200, 6800, 9200],
                &[850, 3800, 5500],
                &[2200, 4600, 6700, 8800],
            ),
            "V1a1",
            "straight red",
            12,
        ),
        suspect(
            "aileen_wuornos",
            "Aileen Wuornos",
            35,
            "Highway drifter with a volatile temper",
            "Claims she was on the veranda smoking and watching the rain",
            "Dr. Graves profiled her for the FBI and she blamed him for years in prison",
            BloodType::Ab,
            [
                (Locus::D3S1358, [13, 17]),
                (Locus::Vwa, [16, 24]),
                (Locus::Fga, [17, 26]),
                (Locus::D8S1179, [13, 19]),
                (Locus::D21S11, [30, 38]),
                (Locus::D18S51, [15, 27]),
                (Locus::D5S818, [10, 13]),
                (Locus::Th01, [5, 7]),
            ],
            rflp(
                &[700, 1900, 3700, 5400],
                &[1200, 2700, 4400, 6900, 9400],
                &[1400, 3600, 6400],
            ),
            "X2a1",
            "curly brown",
            7,
        ),
    ]
}

/// Set up the roster for a new game.
///
/// Clones the victim and each selected suspect from the templates, then
/// picks one suspect uniformly at random as the killer.
///
/// # Errors
///
/// Returns [`GameError::InvalidSuspectCount`] unless 4 to 6 suspects are
/// selected, and [`GameError::UnknownSuspect`] for an id not in the pool.
pub fn initialize_characters(state: &mut GameState, selected_ids: &[&str]) -> Result<(), GameError> {
    if !(SUSPECTS_MIN..=SUSPECTS_MAX).contains(&selected_ids.len()) {
        return Err(GameError::InvalidSuspectCount {
            count: selected_ids.len(),
        });
    }

    let mut suspects = Vec::with_capacity(selected_ids.len());
    for id in selected_ids {
        let template =
            pool_character(id).ok_or_else(|| GameError::UnknownSuspect((*id).to_string()))?;
        suspects.push(template.clone());
    }

    let mut rng = state.take_rng();
    let killer_index = rng.random_range(0..suspects.len());
    state.rng = Some(rng);
    suspects[killer_index].is_killer = true;

    let victim = victim_template().clone();
    state.killer_id = Some(suspects[killer_index].id.clone());
    state.dead_order = vec![victim.id.clone()];
    state.suspect_notes = suspects
        .iter()
        .map(|s| (s.id.clone(), crate::state::SuspectAssessment::default()))
        .collect();
    state.victim = Some(victim);
    state.suspects = suspects;
    state.logs.push(String::from(LOG_GAME_START));
    Ok(())
}
