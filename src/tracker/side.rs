use crate::engine::Effectiveness;

/// Which of the two tracked Pokémon a region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Mine,
    Rival,
}

impl Side {
    /// Processing order within a tick.
    pub const ALL: [Side; 2] = [Side::Mine, Side::Rival];

    /// Short identifier used in logs and file names.
    pub fn key(&self) -> &'static str {
        match self {
            Side::Mine => "mine",
            Side::Rival => "rival",
        }
    }

    /// Label shown before the first update.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Side::Mine => "Your Pokémon",
            Side::Rival => "Rival Pokémon",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Result of one capture → resolve → compute cycle for one side.
#[derive(Clone, Debug, PartialEq)]
pub struct SideUpdate {
    pub side: Side,
    /// Text exactly as OCR returned it (empty when capture failed)
    pub raw_text: String,
    /// Resolved species name, or the cleaned text when unmatched
    pub name: String,
    /// Types of the resolved species (empty when unknown)
    pub types: Vec<String>,
    pub effectiveness: Effectiveness,
}
