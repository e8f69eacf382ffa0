use chrono::{DateTime, Local};

#[derive(Clone, Debug)]
pub struct JournalEntry {
    pub stamp: DateTime<Local>,
    pub text: String,
}

impl JournalEntry {
    pub fn render(&self) -> String {
        format!("[{}] {}", self.stamp.format("%H:%M:%S"), self.text)
    }
}

/// Newest-first exploration log, capped at `capacity` entries.
#[derive(Clone, Debug)]
pub struct Journal {
    entries: Vec<JournalEntry>,
    capacity: usize,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push<S: Into<String>>(&mut self, text: S) {
        self.entries.insert(
            0,
            JournalEntry {
                stamp: Local::now(),
                text: text.into(),
            },
        );
        self.entries.truncate(self.capacity);
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&str> {
        self.entries.first().map(|entry| entry.text.as_str())
    }

    pub fn rendered(&self) -> Vec<String> {
        self.entries.iter().map(JournalEntry::render).collect()
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.text.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_bounded() {
        let mut journal = Journal::new(3);
        journal.extend((1..=5).map(|n| format!("line {n}")));
        let texts: Vec<&str> = journal.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["line 5", "line 4", "line 3"]);
        assert_eq!(journal.latest(), Some("line 5"));
    }

    #[test]
    fn rendered_lines_carry_a_timestamp() {
        let mut journal = Journal::new(2);
        journal.push("Coins +5");
        let line = &journal.rendered()[0];
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Coins +5"));
    }
}
