//! Static facts about the ten species the classifier knows.
//!
//! The table order is the label order the model was trained with, so the
//! position of a record doubles as its class index.

use crate::error::{Error, Result};
use serde::Serialize;

/// Facts shown for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesRecord {
    /// Class index produced by the local model.
    pub index: usize,
    /// Display name, also the label returned by the remote endpoint.
    pub name: &'static str,
    pub scientific_name: &'static str,
    /// Common name in Malay, when one exists.
    pub malay_name: Option<&'static str>,
    pub fun_fact: &'static str,
}

pub const SPECIES_COUNT: usize = 10;

pub static SPECIES: [SpeciesRecord; SPECIES_COUNT] = [
    SpeciesRecord {
        index: 0,
        name: "Cupid's Shaving Brush",
        scientific_name: "Emilia sonchifolia",
        malay_name: Some("Ketumbit Jantan"),
        fun_fact: "My other name is 'lilac tasselflower'. I look very much like the Common Vernonia, but my flowers are longer and look like a vase!",
    },
    SpeciesRecord {
        index: 1,
        name: "Hairy Spurge",
        scientific_name: "Euphorbia hirta",
        malay_name: Some("Ara Tanah (which means 'ground fig')"),
        fun_fact: "I have medicinal properties - I can be used to treat gastrointestinal (tummy) issues, asthma and bronchitis (lung infection)!",
    },
    SpeciesRecord {
        index: 2,
        name: "Common Vernonia",
        scientific_name: "Vernonia cinerea",
        malay_name: Some(
            "Rumput Tahi Babi (which means 'Pig dung grass', ew!) / Rumput Sepagi (which means morning grass, that sounds better..)",
        ),
        fun_fact: "My other name is 'Little Ironweed' - my flowers change into white fluffy tufts! Huff and puff on these white tufts and help my seeds fly away!",
    },
    SpeciesRecord {
        index: 3,
        name: "Lalang",
        scientific_name: "Imperata cylindrica",
        malay_name: Some("Lalang (which literally means 'weeds')!"),
        fun_fact: "I can grow up to 180 centimeters tall (that's probably taller than your Dad)!",
    },
    SpeciesRecord {
        index: 4,
        name: "Prickly Lantana",
        scientific_name: "Lantana camara",
        malay_name: Some("Bunga Tahi Ayam (which means 'chicken poop flower')"),
        fun_fact: "I may look very pretty, and my berries may look yummy, but please don't eat my as I am poisonous!",
    },
    SpeciesRecord {
        index: 5,
        name: "Touch-me-not",
        scientific_name: "Mimosa pudica",
        malay_name: Some("Malu-malu (which means 'shy')"),
        fun_fact: "I am really shy, touch my leaves and watch them close up!",
    },
    SpeciesRecord {
        index: 6,
        name: "Morning Glory",
        scientific_name: "Ipomoea cairica",
        malay_name: None,
        fun_fact: "I'm a creeping plant, so you'll usually find me climbing up fences!",
    },
    SpeciesRecord {
        index: 7,
        name: "Common Spiderwort",
        scientific_name: "Commelina diffusa",
        malay_name: Some("Rumput aur (which means 'golden grass')"),
        fun_fact: "My leaves are rich in Vitamin C - early settlers in Australia consumed this plant to prevent scurvy (a disease caused by a lack of Vitamin C)",
    },
    SpeciesRecord {
        index: 8,
        name: "Coat Buttons",
        scientific_name: "Tridax procumbens",
        malay_name: Some("Kanching Baju"),
        fun_fact: "I can be used as rabbit food!",
    },
    SpeciesRecord {
        index: 9,
        name: "White Kyllinga",
        scientific_name: "Cyperus mindorensis",
        malay_name: None,
        fun_fact: "I grow via a long rhizome (underground horizontal stem), and a decoction of these rhizomes may be used to treat fever!",
    },
];

/// Find a species by its display name (exact match).
pub fn lookup(name: &str) -> Result<&'static SpeciesRecord> {
    SPECIES
        .iter()
        .find(|record| record.name == name)
        .ok_or_else(|| Error::UnknownLabel(name.to_string()))
}

/// Find a species by class index.
pub fn by_index(index: usize) -> Result<&'static SpeciesRecord> {
    SPECIES
        .get(index)
        .ok_or_else(|| Error::UnknownLabel(index.to_string()))
}
