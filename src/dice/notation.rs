//! Dice notation scanning
//!
//! Finds dice-group tokens (`<count>d<sides>`) and signed-integer modifier
//! tokens (`[+-]<digits>`) in a free-form string, left to right.

use regex::Regex;
use std::sync::LazyLock;

/// `<count>d<sides>`, case-sensitive on the `d`, ASCII digits only
static GROUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)d([0-9]+)").unwrap());

/// A sign immediately followed by ASCII digits
static MODIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-][0-9]+").unwrap());

/// One dice-group match, still in textual form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupToken<'a> {
    /// Digits before the `d`
    pub count: &'a str,
    /// Digits after the `d`
    pub sides: &'a str,
    /// Byte offset of the match in the input
    pub offset: usize,
    /// Byte offset just past the match
    pub end: usize,
}

/// One signed-integer match, sign included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierToken<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl ModifierToken<'_> {
    /// Whether the sign sits directly after a `d` literal.
    ///
    /// Such a token belongs to a dice group's sides specifier and is never a
    /// standalone modifier. A token at offset 0 has no predecessor.
    pub fn follows_die(&self, input: &str) -> bool {
        self.offset > 0 && input.as_bytes()[self.offset - 1] == b'd'
    }

    /// Whether the digits are the count of a dice group, as the `+2` in `1d20+2d6`
    pub fn overlaps_group(&self, groups: &[GroupToken<'_>]) -> bool {
        let end = self.offset + self.text.len();
        groups.iter().any(|g| self.offset < g.end && g.offset < end)
    }
}

/// Find all dice-group tokens, non-overlapping, in order of appearance
pub fn extract_groups(input: &str) -> Vec<GroupToken<'_>> {
    GROUP_REGEX
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(GroupToken {
                count: caps.get(1)?.as_str(),
                sides: caps.get(2)?.as_str(),
                offset: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Find all signed-integer tokens, including ones inside dice groups
pub fn extract_modifiers(input: &str) -> Vec<ModifierToken<'_>> {
    MODIFIER_REGEX
        .find_iter(input)
        .map(|m| ModifierToken {
            text: m.as_str(),
            offset: m.start(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group() {
        let groups = extract_groups("2d8");
        assert_eq!(
            groups,
            vec![GroupToken {
                count: "2",
                sides: "8",
                offset: 0,
                end: 3,
            }]
        );
    }

    #[test]
    fn test_groups_in_order() {
        let groups = extract_groups("1d20+2d6-1");
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].count, groups[0].sides, groups[0].offset), ("1", "20", 0));
        assert_eq!((groups[1].count, groups[1].sides, groups[1].offset), ("2", "6", 5));
    }

    #[test]
    fn test_groups_embedded_in_text() {
        let groups = extract_groups("attack with 1d20 then 3d6 fire");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].count, "3");
        assert_eq!(groups[1].sides, "6");
    }

    #[test]
    fn test_uppercase_d_not_matched() {
        assert!(extract_groups("2D6").is_empty());
    }

    #[test]
    fn test_no_groups() {
        assert!(extract_groups("abc").is_empty());
        assert!(extract_groups("+3").is_empty());
        assert!(extract_groups("d6").is_empty());
        assert!(extract_groups("").is_empty());
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        // Fullwidth two, Arabic-Indic three
        assert!(extract_groups("\u{FF12}d6").is_empty());
        assert!(extract_groups("1d\u{0663}").is_empty());
        assert!(extract_modifiers("+\u{0663}").is_empty());
        assert_eq!(extract_groups("1d6 +\u{0663}").len(), 1);
    }

    #[test]
    fn test_modifiers_found_everywhere() {
        let mods = extract_modifiers("+1 2d8+3-10");
        let texts: Vec<&str> = mods.iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["+1", "+3", "-10"]);
        assert_eq!(mods[0].offset, 0);
        assert_eq!(mods[1].offset, 6);
        assert_eq!(mods[2].offset, 8);
    }

    #[test]
    fn test_follows_die() {
        let input = "1d+4 +2";
        let mods = extract_modifiers(input);
        assert_eq!(mods.len(), 2);
        assert!(mods[0].follows_die(input));
        assert!(!mods[1].follows_die(input));
    }

    #[test]
    fn test_group_count_overlap() {
        let input = "1d20+2d6-1";
        let groups = extract_groups(input);
        let mods = extract_modifiers(input);
        assert_eq!(mods.len(), 2);
        assert!(mods[0].overlaps_group(&groups));
        assert!(!mods[1].overlaps_group(&groups));
    }

    #[test]
    fn test_leading_token_is_standalone() {
        let input = "-2+1d6";
        let mods = extract_modifiers(input);
        assert_eq!(mods[0].text, "-2");
        assert!(!mods[0].follows_die(input));
    }
}
