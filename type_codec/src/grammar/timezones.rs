//! Timezone abbreviation table
//!
//! Offsets are minutes east of UTC. Abbreviations that PostgreSQL resolves
//! ambiguously (`IST`, `CST`) follow its default `timezone_abbreviations` set.

const ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("UT", 0),
    ("GMT", 0),
    ("Z", 0),
    ("ZULU", 0),
    ("WET", 0),
    ("WEST", 60),
    ("BST", 60),
    ("CET", 60),
    ("CEST", 120),
    ("MET", 60),
    ("MEST", 120),
    ("EET", 120),
    ("EEST", 180),
    ("IST", 120),
    ("MSK", 180),
    ("AWST", 480),
    ("JST", 540),
    ("KST", 540),
    ("ACST", 570),
    ("ACDT", 630),
    ("AEST", 600),
    ("AEDT", 660),
    ("NZST", 720),
    ("NZDT", 780),
    ("NST", -210),
    ("NDT", -150),
    ("AST", -240),
    ("ADT", -180),
    ("EST", -300),
    ("EDT", -240),
    ("CST", -360),
    ("CDT", -300),
    ("MST", -420),
    ("MDT", -360),
    ("PST", -480),
    ("PDT", -420),
    ("AKST", -540),
    ("AKDT", -480),
    ("HST", -600),
];

/// Military zone letters: `A`..`M` east (skipping `J`), `N`..`Y` west
fn military(letter: char) -> Option<i32> {
    let hours = match letter {
        'A'..='I' => letter as i32 - 'A' as i32 + 1,
        'K'..='M' => letter as i32 - 'K' as i32 + 10,
        'N'..='Y' => -(letter as i32 - 'N' as i32 + 1),
        _ => return None,
    };
    Some(hours * 60)
}

/// Resolve an abbreviation (case-insensitive) to minutes east of UTC
pub fn lookup(name: &str) -> Option<i32> {
    let upper = name.trim().to_ascii_uppercase();
    if let Some((_, minutes)) = ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == upper) {
        return Some(*minutes);
    }
    let mut chars = upper.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => military(letter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_common_abbreviations() {
        assert_eq!(lookup("EST"), Some(-300));
        assert_eq!(lookup("gmt"), Some(0));
        assert_eq!(lookup("Z"), Some(0));
        assert_eq!(lookup("ACST"), Some(570));
    }

    #[test]
    fn test_military_letters() {
        assert_eq!(lookup("A"), Some(60));
        assert_eq!(lookup("M"), Some(720));
        assert_eq!(lookup("N"), Some(-60));
        assert_eq!(lookup("Y"), Some(-720));
        assert_eq!(lookup("J"), None);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(lookup("XYZ"), None);
    }
}
