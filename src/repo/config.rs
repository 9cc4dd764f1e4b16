use std::fmt;
use std::fs;
use std::path::Path;

use super::{Error, Result};

/// Key/value settings read from `.vcs/config`.
///
/// The file uses the git config layout: `[section]` headers followed by
/// `key = value` lines. Section and key names are case-insensitive and kept
/// lowercase. When a key repeats, the last value wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Config {
    /// The settings written by `Repo::init`.
    pub fn for_new_repo() -> Config {
        let mut config = Config::default();
        config.set("core", "repositoryformatversion", "0");
        config.set("core", "filemode", "true");
        config.set("core", "bare", "false");
        config
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Config> {
        let mut config = Config::default();
        let mut current = None;

        for (n, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let invalid = || Error::InvalidConfig {
                line: n + 1,
                text: raw.to_string(),
            };

            if line.starts_with('[') {
                if !line.ends_with(']') || line.len() < 3 {
                    return Err(invalid());
                }
                let name = line[1..line.len() - 1].trim().to_lowercase();
                current = Some(config.section_index(&name));
                continue;
            }

            let section = match current {
                Some(index) => &mut config.sections[index],
                None => return Err(invalid()),
            };

            // A bare key is shorthand for `key = true`.
            let (key, value) = match line.find('=') {
                Some(i) => (line[..i].trim(), line[i + 1..].trim()),
                None => (line, "true"),
            };

            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(invalid());
            }

            section
                .entries
                .push((key.to_lowercase(), value.to_string()));
        }

        Ok(config)
    }

    /// Returns the value for `key` in `section`, if present.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = section.to_lowercase();
        let key = key.to_lowercase();

        self.sections
            .iter()
            .filter(|s| s.name == section)
            .flat_map(|s| s.entries.iter())
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .last()
    }

    /// Sets `key` in `section`, replacing any earlier value.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let key = key.to_lowercase();
        let index = self.section_index(&section.to_lowercase());
        let section = &mut self.sections[index];

        match section.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => section.entries.push((key, value.to_string())),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).map_err(|e| e.into())
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "\t{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}
