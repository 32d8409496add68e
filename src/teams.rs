use crate::error::AppResult;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A team that can be selected for syncing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    /// football-data.org team id
    pub id: u32,
    /// Display name as used by the API
    pub name: String,
    /// Competition code the team usually plays in
    pub competition: String,
}

/// How user input was resolved to a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamMatch {
    Index,
    Key,
    Search,
}

/// Teams keyed by a short lowercase lookup key.
///
/// The menu lists teams in key order, while name searches walk them in the
/// order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTable {
    teams: BTreeMap<String, Team>,
    order: Vec<String>,
}

/// Layout of the teams TOML file
#[derive(Debug, Deserialize)]
struct TeamsFile {
    #[serde(default)]
    teams: BTreeMap<String, Team>,
}

impl TeamTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in list of popular teams
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (key, id, name, competition) in [
            ("dortmund", 4, "Borussia Dortmund", "BL1"),
            ("bayern", 5, "FC Bayern München", "BL1"),
            ("barcelona", 81, "FC Barcelona", "PD"),
            ("real madrid", 86, "Real Madrid CF", "PD"),
            ("manchester united", 66, "Manchester United FC", "PL"),
            ("liverpool", 64, "Liverpool FC", "PL"),
            ("arsenal", 57, "Arsenal FC", "PL"),
            ("chelsea", 61, "Chelsea FC", "PL"),
            ("manchester city", 65, "Manchester City FC", "PL"),
            ("psg", 524, "Paris Saint-Germain FC", "FL1"),
            ("juventus", 109, "Juventus FC", "SA"),
            ("inter", 108, "FC Internazionale Milano", "SA"),
            ("milan", 98, "AC Milan", "SA"),
        ] {
            table.insert(
                key,
                Team {
                    id,
                    name: name.to_string(),
                    competition: competition.to_string(),
                },
            );
        }
        table
    }

    /// Add or replace a team. Keys are stored lowercase.
    pub fn insert(&mut self, key: &str, team: Team) {
        let key = key.trim().to_lowercase();
        if !self.teams.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.teams.insert(key, team);
    }

    /// Merge teams from a TOML file over this table. A missing file is not an error.
    ///
    /// New teams are searched after the ones already present.
    pub fn merge_file(&mut self, path: &Path) -> AppResult<usize> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let file: TeamsFile = toml::from_str(&content)?;
        let count = file.teams.len();
        for (key, team) in file.teams {
            self.insert(&key, team);
        }

        Ok(count)
    }

    pub(crate) fn len(&self) -> usize {
        self.teams.len()
    }

    /// Teams in menu order (sorted by key)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Team)> {
        self.teams.iter().map(|(key, team)| (key.as_str(), team))
    }

    /// Resolve user input to a team.
    ///
    /// Input is matched case-insensitively, in this order: a 1-based index into the
    /// menu, an exact key, then a substring of a key or of a display name.
    pub fn find(&self, input: &str) -> Option<&Team> {
        self.find_match(input).map(|(team, _)| team)
    }

    /// Like [`TeamTable::find`], also reporting which rule matched
    pub fn find_match(&self, input: &str) -> Option<(&Team, TeamMatch)> {
        let choice = input.trim().to_lowercase();
        if choice.is_empty() {
            return None;
        }

        if choice.chars().all(|c| c.is_ascii_digit()) {
            if let Some(team) = choice
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| self.teams.values().nth(index))
            {
                return Some((team, TeamMatch::Index));
            }
        }

        if let Some(team) = self.teams.get(&choice) {
            return Some((team, TeamMatch::Key));
        }

        self.order
            .iter()
            .filter_map(|key| self.teams.get_key_value(key))
            .find(|(key, team)| key.contains(&choice) || team.name.to_lowercase().contains(&choice))
            .map(|(_, team)| (team, TeamMatch::Search))
    }

    /// Render the numbered team menu
    pub fn menu(&self) -> String {
        self.iter()
            .enumerate()
            .map(|(idx, (_, team))| format!("  {:2}. {}", idx + 1, team.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
