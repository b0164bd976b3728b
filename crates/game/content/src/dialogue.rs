//! Scripted dialogue lines.

use game_core::TileKind;

/// Situation a scripted line is picked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
    Day,
    Night,
    Rain,
    Hurt,
    Angry,
    Quest,
    Shelter,
    Librarian,
}

/// Lore fragments tied to the tile that reveals them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoreLines {
    pub tile: TileKind,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogueLines {
    pub day: Vec<String>,
    pub night: Vec<String>,
    pub rain: Vec<String>,
    pub hurt: Vec<String>,
    pub angry: Vec<String>,
    pub quest: Vec<String>,
    pub shelter: Vec<String>,
    pub librarian: Vec<String>,
    pub lore: Vec<LoreLines>,
}

impl DialogueLines {
    pub fn lines(&self, mood: Mood) -> &[String] {
        match mood {
            Mood::Day => &self.day,
            Mood::Night => &self.night,
            Mood::Rain => &self.rain,
            Mood::Hurt => &self.hurt,
            Mood::Angry => &self.angry,
            Mood::Quest => &self.quest,
            Mood::Shelter => &self.shelter,
            Mood::Librarian => &self.librarian,
        }
    }

    /// Fragments for `tile`; empty when the tile has none.
    pub fn lore(&self, tile: TileKind) -> &[String] {
        self.lore
            .iter()
            .find(|entry| entry.tile == tile)
            .map_or(&[], |entry| entry.lines.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lore_is_empty() {
        let lines = DialogueLines {
            lore: vec![LoreLines {
                tile: TileKind::Debris,
                lines: vec!["A torn map.".into()],
            }],
            ..DialogueLines::default()
        };
        assert_eq!(lines.lore(TileKind::Debris).len(), 1);
        assert!(lines.lore(TileKind::Telescope).is_empty());
        assert!(lines.lines(Mood::Night).is_empty());
    }
}
