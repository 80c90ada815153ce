#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Sync,
    NewAlert(Option<String>),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "write" | "sync" => Command::Sync,
        "help" => Command::Help,
        "new" => {
            if parts.len() < 2 {
                Command::NewAlert(None)
            } else {
                Command::NewAlert(Some(parts[1..].join(" ")))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn parse_write_command_triggers_sync() {
        assert_eq!(parse_command(":w"), Command::Sync);
    }

    #[test]
    fn parse_sync_long_form() {
        assert_eq!(parse_command(":sync"), Command::Sync);
    }

    #[test]
    fn parse_new_alert_with_multiple_words() {
        let cmd = parse_command(":new Generator load test");
        assert_eq!(cmd, Command::NewAlert(Some("Generator load test".to_string())));
    }

    #[test]
    fn parse_new_without_title_returns_blank_title() {
        assert_eq!(parse_command(":new"), Command::NewAlert(None));
    }

    #[test]
    fn parse_theme_command() {
        assert_eq!(parse_command(":theme nord"), Command::Theme("nord".to_string()));
    }

    #[test]
    fn parse_theme_without_name_returns_error() {
        assert!(matches!(parse_command(":theme"), Command::Error(_)));
    }

    #[test]
    fn parse_help_command() {
        assert_eq!(parse_command(":help"), Command::Help);
    }

    #[test]
    fn parse_unknown_command_returns_error() {
        assert!(matches!(parse_command(":goto 2025-01-15"), Command::Error(_)));
    }

    #[test]
    fn parse_command_without_colon_returns_error() {
        assert!(matches!(parse_command("quit"), Command::Error(_)));
    }

    #[test]
    fn parse_empty_command_returns_error() {
        assert!(matches!(parse_command(":"), Command::Error(_)));
    }
}
