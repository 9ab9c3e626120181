//! The fake terminal's command dispatcher.
//!
//! Pure mapping from a typed line to a structured outcome; the modal renders
//! lines and performs side effects (navigation, theme change, log clear).

use crate::achievements::{achievement, Ledger};
use crate::theme::Theme;

pub const GITHUB_PROFILE_URL: &str = "https://github.com/Ankit-Mahadani";
pub const GFG_PROFILE_URL: &str = "https://www.geeksforgeeks.org/user/ankitmahadani/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Success,
    Error,
    /// A typed command echoed back into the log with a prompt marker.
    Echo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Plain,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            text: text.into(),
        }
    }

    pub fn echo(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Echo,
            text: text.into(),
        }
    }
}

/// What a dispatched command asks the terminal to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(Vec<Line>),
    OpenExternal {
        url: &'static str,
        lines: Vec<Line>,
    },
    SetTheme {
        theme: Theme,
        lines: Vec<Line>,
    },
    Clear,
}

enum Command {
    Help,
    About,
    Skills,
    Projects,
    Contact,
    Github,
    GeeksForGeeks,
    Clear,
    Theme(Option<String>),
    Achievements,
}

/// Lowercase, trim, split on whitespace, and resolve the leading token.
/// Every command except `theme` ignores trailing arguments.
fn parse(input: &str) -> Result<Option<Command>, String> {
    let lowered = input.trim().to_lowercase();
    let mut tokens = lowered.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };
    let cmd = match head {
        "help" => Command::Help,
        "about" => Command::About,
        "skills" => Command::Skills,
        "projects" => Command::Projects,
        "contact" => Command::Contact,
        "github" => Command::Github,
        "geeksforgeeks" => Command::GeeksForGeeks,
        "clear" => Command::Clear,
        "theme" => Command::Theme(tokens.next().map(str::to_string)),
        "achievements" => Command::Achievements,
        other => return Err(other.to_string()),
    };
    Ok(Some(cmd))
}

pub fn dispatch(input: &str, ledger: &Ledger) -> Outcome {
    let cmd = match parse(input) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return Outcome::Print(Vec::new()),
        Err(token) => {
            return Outcome::Print(vec![Line::error(format!(
                "Command not found: {token}. Type 'help' for available commands."
            ))]);
        }
    };

    match cmd {
        Command::Help => Outcome::Print(help_lines()),
        Command::About => Outcome::Print(vec![
            Line::success("About Ankit Mahadani:"),
            Line::plain("Computer Science student at VIT Bhopal"),
            Line::plain("Specializing in AI, ML, and Full-Stack Development"),
            Line::plain("Technical Co-Lead at Stats-O-Locked Club"),
            Line::plain("500+ DSA problems solved"),
        ]),
        Command::Skills => Outcome::Print(vec![
            Line::success("Technical Skills:"),
            Line::plain("• Languages: Python, C++, Java, JavaScript"),
            Line::plain("• AI/ML: Machine Learning, Deep Learning, NLP, Computer Vision"),
            Line::plain("• Tools: React.js, n8n, Git, Firebase, REST APIs"),
        ]),
        Command::Projects => Outcome::Print(vec![
            Line::success("Featured Projects:"),
            Line::plain("1. AI Health Symptom Intelligence System"),
            Line::plain("2. AI CRM Automation Agents"),
            Line::plain("3. Voice AI Bot Workflow System"),
            Line::plain("4. Cancer Detection using Deep Learning"),
            Line::plain("5. Handwriting Improvement App"),
        ]),
        Command::Contact => Outcome::Print(vec![
            Line::success("Contact Information:"),
            Line::plain("• GitHub: github.com/Ankit-Mahadani"),
            Line::plain("• GeeksforGeeks: geeksforgeeks.org/profile/ankitmahadani"),
            Line::plain("• Codeforces: codeforces.com/profile/ankitmahadani181"),
        ]),
        Command::Github => Outcome::OpenExternal {
            url: GITHUB_PROFILE_URL,
            lines: vec![Line::success("Opening GitHub profile...")],
        },
        Command::GeeksForGeeks => Outcome::OpenExternal {
            url: GFG_PROFILE_URL,
            lines: vec![Line::success("Opening GeeksforGeeks profile...")],
        },
        Command::Clear => Outcome::Clear,
        Command::Theme(None) => Outcome::Print(vec![Line::error(format!(
            "Usage: theme <name>. Available: {}",
            Theme::allow_list()
        ))]),
        Command::Theme(Some(name)) => match Theme::from_str(&name) {
            Some(theme) => Outcome::SetTheme {
                theme,
                lines: vec![Line::success(format!(
                    "Theme changed to {}!",
                    theme.as_str()
                ))],
            },
            None => Outcome::Print(vec![Line::error(format!(
                "Invalid theme. Available: {}",
                Theme::allow_list()
            ))]),
        },
        Command::Achievements => {
            let mut lines: Vec<Line> = ledger
                .keys()
                .iter()
                .filter_map(|key| achievement(key))
                .map(|a| Line::plain(format!("{} - {}", a.title, a.desc)))
                .collect();
            if lines.is_empty() {
                lines.push(Line::plain("No achievements unlocked yet!"));
            } else {
                lines.insert(0, Line::success("Unlocked Achievements:"));
            }
            Outcome::Print(lines)
        }
    }
}

fn help_lines() -> Vec<Line> {
    vec![
        Line::success("Available Commands:"),
        Line::plain("• help - Show this help message"),
        Line::plain("• about - Learn about Ankit"),
        Line::plain("• skills - View technical skills"),
        Line::plain("• projects - List all projects"),
        Line::plain("• contact - Get contact information"),
        Line::plain("• github - Open GitHub profile"),
        Line::plain("• geeksforgeeks - Open GeeksforGeeks profile"),
        Line::plain("• clear - Clear terminal"),
        Line::plain("• theme [name] - Change theme (retro, cyberpunk, vaporwave, matrix, gameboy)"),
        Line::plain("• achievements - Show unlocked achievements"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(outcome: &Outcome) -> String {
        match outcome {
            Outcome::Print(lines)
            | Outcome::OpenExternal { lines, .. }
            | Outcome::SetTheme { lines, .. } => lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Clear => String::new(),
        }
    }

    #[test]
    fn unknown_command_names_the_offending_token() {
        let out = dispatch("fooo", &Ledger::default());
        assert!(text_of(&out).contains("Command not found: fooo"));
        match out {
            Outcome::Print(lines) => assert_eq!(lines[0].kind, LineKind::Error),
            other => panic!("expected Print, got {other:?}"),
        }
    }

    #[test]
    fn theme_with_valid_name_switches() {
        let out = dispatch("theme cyberpunk", &Ledger::default());
        match out {
            Outcome::SetTheme { theme, lines } => {
                assert_eq!(theme, Theme::Cyberpunk);
                assert!(lines[0].text.contains("cyberpunk"));
            }
            other => panic!("expected SetTheme, got {other:?}"),
        }
    }

    #[test]
    fn theme_with_invalid_name_lists_the_allow_list() {
        let out = dispatch("theme neon", &Ledger::default());
        let text = text_of(&out);
        for name in ["retro", "cyberpunk", "vaporwave", "matrix", "gameboy"] {
            assert!(text.contains(name), "missing {name} in {text}");
        }
        assert!(matches!(out, Outcome::Print(_)));
    }

    #[test]
    fn bare_theme_prints_usage() {
        let out = dispatch("theme", &Ledger::default());
        let text = text_of(&out);
        assert!(text.contains("Usage: theme"));
        assert!(text.contains("retro"));
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        let plain = dispatch("help", &Ledger::default());
        let noisy = dispatch("help me please", &Ledger::default());
        assert_eq!(plain, noisy);
    }

    #[test]
    fn input_is_case_and_whitespace_insensitive() {
        let out = dispatch("   HELP   ", &Ledger::default());
        assert!(text_of(&out).contains("Available Commands"));
        let out = dispatch("Theme CYBERPUNK", &Ledger::default());
        assert!(matches!(out, Outcome::SetTheme { .. }));
    }

    #[test]
    fn empty_input_prints_nothing() {
        assert_eq!(dispatch("   ", &Ledger::default()), Outcome::Print(Vec::new()));
    }

    #[test]
    fn clear_is_a_distinct_outcome() {
        assert_eq!(dispatch("clear now", &Ledger::default()), Outcome::Clear);
    }

    #[test]
    fn external_commands_carry_their_urls() {
        match dispatch("github", &Ledger::default()) {
            Outcome::OpenExternal { url, .. } => assert_eq!(url, GITHUB_PROFILE_URL),
            other => panic!("expected OpenExternal, got {other:?}"),
        }
    }

    #[test]
    fn achievements_reflect_the_ledger() {
        let mut ledger = Ledger::default();
        let empty = text_of(&dispatch("achievements", &ledger));
        assert!(empty.contains("No achievements unlocked yet!"));

        ledger.unlock("terminalUser");
        ledger.unlock("themeChanger");
        let listed = text_of(&dispatch("achievements", &ledger));
        assert!(listed.contains("Terminal Master"));
        assert!(listed.contains("Theme Master"));
    }
}
