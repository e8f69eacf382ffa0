use bracket_terminal::prelude::VirtualKeyCode;
use std::{fs, io, path::Path};

/// One scripted tick: an optional key and whether Shift is held with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedKey {
    pub key: Option<VirtualKeyCode>,
    pub shift: bool,
}

/// Replays a key script, one key per tick.
///
/// Each non-comment line holds one or more keys. Lowercase letters are
/// plain presses and uppercase movement letters run. `.` waits a tick,
/// `=` is Enter, `<` is Backspace and `q` is Escape.
pub struct ScriptedInput {
    script_commands: Vec<ScriptedKey>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut script_commands = Vec::new();

        for line in text.lines() {
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }
            for char_code in trimmed_line.chars() {
                match char_to_scripted_key(char_code) {
                    Some(key) => script_commands.push(key),
                    None => eprintln!("Warning: Unknown key in script: {char_code}"),
                }
            }
        }

        Self {
            script_commands,
            current_command_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.script_commands.len()
    }

    pub fn next_key(&mut self) -> Option<ScriptedKey> {
        let key = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(key)
    }
}

fn char_to_scripted_key(c: char) -> Option<ScriptedKey> {
    let press = |key| {
        Some(ScriptedKey {
            key: Some(key),
            shift: false,
        })
    };
    let run = |key| {
        Some(ScriptedKey {
            key: Some(key),
            shift: true,
        })
    };
    match c {
        'w' => press(VirtualKeyCode::W),
        'a' => press(VirtualKeyCode::A),
        's' => press(VirtualKeyCode::S),
        'd' => press(VirtualKeyCode::D),
        'W' => run(VirtualKeyCode::W),
        'A' => run(VirtualKeyCode::A),
        'S' => run(VirtualKeyCode::S),
        'D' => run(VirtualKeyCode::D),
        'e' | 'E' => press(VirtualKeyCode::E),
        'x' | 'X' => press(VirtualKeyCode::X),
        'f' | 'F' => press(VirtualKeyCode::F),
        'r' | 'R' => press(VirtualKeyCode::R),
        'c' | 'C' => press(VirtualKeyCode::C),
        'y' | 'Y' => press(VirtualKeyCode::Y),
        'n' | 'N' => press(VirtualKeyCode::N),
        '0' => press(VirtualKeyCode::Key0),
        '1' => press(VirtualKeyCode::Key1),
        '2' => press(VirtualKeyCode::Key2),
        '3' => press(VirtualKeyCode::Key3),
        '4' => press(VirtualKeyCode::Key4),
        '5' => press(VirtualKeyCode::Key5),
        '6' => press(VirtualKeyCode::Key6),
        '7' => press(VirtualKeyCode::Key7),
        '8' => press(VirtualKeyCode::Key8),
        '9' => press(VirtualKeyCode::Key9),
        '=' => press(VirtualKeyCode::Return),
        '<' => press(VirtualKeyCode::Back),
        'q' | 'Q' | '\x1B' => press(VirtualKeyCode::Escape),
        '.' => Some(ScriptedKey {
            key: None,
            shift: false,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut script = ScriptedInput::parse("# walk down\n\nss\n  # again\nf\n");
        assert_eq!(script.len(), 3);
        assert_eq!(script.next_key().and_then(|k| k.key), Some(VirtualKeyCode::S));
        assert_eq!(script.next_key().and_then(|k| k.key), Some(VirtualKeyCode::S));
        assert_eq!(script.next_key().and_then(|k| k.key), Some(VirtualKeyCode::F));
        assert_eq!(script.next_key(), None);
    }

    #[test]
    fn uppercase_movement_runs() {
        let mut script = ScriptedInput::parse("Dd");
        assert_eq!(
            script.next_key(),
            Some(ScriptedKey {
                key: Some(VirtualKeyCode::D),
                shift: true
            })
        );
        assert_eq!(
            script.next_key(),
            Some(ScriptedKey {
                key: Some(VirtualKeyCode::D),
                shift: false
            })
        );
    }

    #[test]
    fn waits_and_unknown_characters() {
        let mut script = ScriptedInput::parse(".?12=");
        assert_eq!(script.len(), 4);
        assert_eq!(script.next_key().map(|k| k.key), Some(None));
        assert_eq!(script.next_key().and_then(|k| k.key), Some(VirtualKeyCode::Key1));
        assert_eq!(script.next_key().and_then(|k| k.key), Some(VirtualKeyCode::Key2));
        assert_eq!(
            script.next_key().and_then(|k| k.key),
            Some(VirtualKeyCode::Return)
        );
    }
}
