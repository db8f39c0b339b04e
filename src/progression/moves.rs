use schema::{GhostSpecies, LearnsetEntry};

/// Learnset entries unlocked when leveling from `from_level` to `to_level`:
/// those with `from_level < level <= to_level`, ascending by level.
pub fn moves_learned_between(
    species: &GhostSpecies,
    from_level: u8,
    to_level: u8,
) -> Vec<&LearnsetEntry> {
    let mut unlocked: Vec<&LearnsetEntry> = species
        .learnset
        .iter()
        .filter(|entry| entry.level > from_level && entry.level <= to_level)
        .collect();
    unlocked.sort_by_key(|entry| entry.level);
    unlocked
}
