//! Pick file lines: `<league>\t<raw team>` or `<league>,<raw team>`.

use pickgrade_core::League;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub league: League,
    pub raw: String,
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
///
/// The raw team text keeps its inner spacing and punctuation; only the
/// surrounding whitespace is trimmed. A tab takes precedence over a comma so
/// team strings such as "Washington, D.C." survive in tab-separated files.
pub fn parse_line(line: &str) -> Result<Option<InputLine>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (league, raw) = trimmed
        .split_once('\t')
        .or_else(|| trimmed.split_once(','))
        .ok_or_else(|| "expected <league><TAB or ,><team>".to_string())?;

    let league = league
        .parse::<League>()
        .map_err(|e| e.to_string())?;

    Ok(Some(InputLine {
        league,
        raw: raw.trim().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_and_comma_lines() {
        assert_eq!(
            parse_line("nfl\tPittsburgh Steelers -3").unwrap(),
            Some(InputLine {
                league: League::NFL,
                raw: "Pittsburgh Steelers -3".to_string(),
            })
        );
        assert_eq!(
            parse_line("cbb, Duke Blue Devils ").unwrap(),
            Some(InputLine {
                league: League::NCAAB,
                raw: "Duke Blue Devils".to_string(),
            })
        );
    }

    #[test]
    fn test_tab_wins_over_comma() {
        let line = parse_line("NBA\tWashington, D.C. Wizards").unwrap().unwrap();
        assert_eq!(line.league, League::NBA);
        assert_eq!(line.raw, "Washington, D.C. Wizards");
    }

    #[test]
    fn test_skipped_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# league\tteam").unwrap(), None);
    }

    #[test]
    fn test_empty_team_is_kept() {
        // Resolution decides what an empty team string means
        let line = parse_line("nba,").unwrap().unwrap();
        assert_eq!(line.raw, "");
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parse_line("just a team name").is_err());
        let err = parse_line("cricket\tIndia").unwrap_err();
        assert!(err.contains("cricket"));
    }
}
