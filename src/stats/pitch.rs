/// Pitch classes in standard order. Spotify reports keys as indexes into
/// this table, with -1 meaning no key was detected.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C♯/D♭", "D", "D♯/E♭", "E", "F", "F♯/G♭", "G", "G♯/A♭", "A", "A♯/B♭", "B",
];

pub const MODES: [&str; 2] = ["minor", "major"];

/// Name of a Spotify pitch class, `None` for -1 and anything out of range.
pub fn pitch_class(key: i32) -> Option<&'static str> {
    usize::try_from(key)
        .ok()
        .and_then(|idx| PITCH_CLASSES.get(idx).copied())
}

/// Position of a pitch class name in [`PITCH_CLASSES`].
pub fn pitch_index(label: &str) -> Option<usize> {
    PITCH_CLASSES.iter().position(|p| *p == label)
}

pub fn mode_name(mode: i32) -> Option<&'static str> {
    usize::try_from(mode)
        .ok()
        .and_then(|idx| MODES.get(idx).copied())
}
