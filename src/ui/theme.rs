use ratatui::style::Color;

use crate::alerts::{DayBucket, Priority, StatusTone};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub column_header: Color,
    pub muted: Color,
    pub overdue: Color,
    pub today: Color,
    pub tomorrow: Color,
    pub upcoming: Color,
    pub critical: Color,
    pub high: Color,
    pub low: Color,
    pub in_progress: Color,
    pub pending: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            column_header: Color::Yellow,
            muted: Color::DarkGray,
            overdue: Color::Red,
            today: Color::Green,
            tomorrow: Color::Yellow,
            upcoming: Color::White,
            critical: Color::LightRed,
            high: Color::LightYellow,
            low: Color::Gray,
            in_progress: Color::LightBlue,
            pending: Color::Magenta,
            status_bar: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            command_mode: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            column_header: Color::Rgb(254, 128, 25),
            muted: Color::Rgb(146, 131, 116),
            overdue: Color::Rgb(251, 73, 52),
            today: Color::Rgb(184, 187, 38),
            tomorrow: Color::Rgb(250, 189, 47),
            upcoming: Color::Rgb(235, 219, 178),
            critical: Color::Rgb(204, 36, 29),
            high: Color::Rgb(254, 128, 25),
            low: Color::Rgb(168, 153, 132),
            in_progress: Color::Rgb(131, 165, 152),
            pending: Color::Rgb(211, 134, 155),
            status_bar: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            command_mode: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            column_header: Color::Rgb(235, 203, 139),
            muted: Color::Rgb(76, 86, 106),
            overdue: Color::Rgb(191, 97, 106),
            today: Color::Rgb(163, 190, 140),
            tomorrow: Color::Rgb(235, 203, 139),
            upcoming: Color::Rgb(216, 222, 233),
            critical: Color::Rgb(191, 97, 106),
            high: Color::Rgb(208, 135, 112),
            low: Color::Rgb(129, 161, 193),
            in_progress: Color::Rgb(94, 129, 172),
            pending: Color::Rgb(180, 142, 173),
            status_bar: Color::Rgb(216, 222, 233),
            help_title: Color::Rgb(136, 192, 208),
            help_section: Color::Rgb(235, 203, 139),
            command_mode: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(139, 233, 253),
            selected_bg: Color::Rgb(68, 71, 90),
            selected_fg: Color::Rgb(248, 248, 242),
            column_header: Color::Rgb(241, 250, 140),
            muted: Color::Rgb(98, 114, 164),
            overdue: Color::Rgb(255, 85, 85),
            today: Color::Rgb(80, 250, 123),
            tomorrow: Color::Rgb(241, 250, 140),
            upcoming: Color::Rgb(248, 248, 242),
            critical: Color::Rgb(255, 85, 85),
            high: Color::Rgb(255, 184, 108),
            low: Color::Rgb(98, 114, 164),
            in_progress: Color::Rgb(139, 233, 253),
            pending: Color::Rgb(255, 121, 198),
            status_bar: Color::Rgb(248, 248, 242),
            help_title: Color::Rgb(139, 233, 253),
            help_section: Color::Rgb(241, 250, 140),
            command_mode: Color::Rgb(248, 248, 242),
            error: Color::Rgb(255, 85, 85),
            success: Color::Rgb(80, 250, 123),
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),
            title: Color::Rgb(38, 139, 210),
            selected_bg: Color::Rgb(7, 54, 66),
            selected_fg: Color::Rgb(147, 161, 161),
            column_header: Color::Rgb(181, 137, 0),
            muted: Color::Rgb(88, 110, 117),
            overdue: Color::Rgb(220, 50, 47),
            today: Color::Rgb(133, 153, 0),
            tomorrow: Color::Rgb(181, 137, 0),
            upcoming: Color::Rgb(147, 161, 161),
            critical: Color::Rgb(220, 50, 47),
            high: Color::Rgb(203, 75, 22),
            low: Color::Rgb(101, 123, 131),
            in_progress: Color::Rgb(42, 161, 152),
            pending: Color::Rgb(211, 54, 130),
            status_bar: Color::Rgb(147, 161, 161),
            help_title: Color::Rgb(38, 139, 210),
            help_section: Color::Rgb(181, 137, 0),
            command_mode: Color::Rgb(147, 161, 161),
            error: Color::Rgb(220, 50, 47),
            success: Color::Rgb(133, 153, 0),
        }
    }

    pub fn monokai() -> Self {
        Self {
            name: "monokai".to_string(),
            title: Color::Rgb(102, 217, 239),
            selected_bg: Color::Rgb(73, 72, 62),
            selected_fg: Color::Rgb(248, 248, 240),
            column_header: Color::Rgb(230, 219, 116),
            muted: Color::Rgb(117, 113, 94),
            overdue: Color::Rgb(249, 38, 114),
            today: Color::Rgb(166, 226, 46),
            tomorrow: Color::Rgb(230, 219, 116),
            upcoming: Color::Rgb(248, 248, 240),
            critical: Color::Rgb(249, 38, 114),
            high: Color::Rgb(253, 151, 31),
            low: Color::Rgb(117, 113, 94),
            in_progress: Color::Rgb(102, 217, 239),
            pending: Color::Rgb(174, 129, 255),
            status_bar: Color::Rgb(248, 248, 240),
            help_title: Color::Rgb(102, 217, 239),
            help_section: Color::Rgb(230, 219, 116),
            command_mode: Color::Rgb(248, 248, 240),
            error: Color::Rgb(249, 38, 114),
            success: Color::Rgb(166, 226, 46),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            "solarized-dark" | "solarized" => Self::solarized_dark(),
            "monokai" => Self::monokai(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula", "solarized-dark", "monokai"]
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Normal => self.upcoming,
            Priority::Low => self.low,
        }
    }

    pub fn status_color(&self, tone: StatusTone) -> Color {
        match tone {
            StatusTone::Pending => self.pending,
            StatusTone::InProgress => self.in_progress,
            StatusTone::Done => self.success,
            StatusTone::Cancelled => self.muted,
            StatusTone::Unclassified => self.upcoming,
        }
    }

    pub fn bucket_color(&self, bucket: DayBucket) -> Color {
        match bucket {
            DayBucket::Overdue => self.overdue,
            DayBucket::Today => self.today,
            DayBucket::Tomorrow => self.tomorrow,
            DayBucket::Upcoming => self.upcoming,
            DayBucket::Undated => self.muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_resolves_to_itself() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::get_by_name(name).name, name);
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::get_by_name("neon").name, "default");
    }

    #[test]
    fn theme_lookup_ignores_case() {
        assert_eq!(Theme::get_by_name("Nord").name, "nord");
    }

    #[test]
    fn overdue_rows_use_overdue_color() {
        let theme = Theme::dracula();
        assert_eq!(theme.bucket_color(DayBucket::Overdue), theme.overdue);
        assert_eq!(theme.priority_color(Priority::Critical), theme.critical);
        assert_eq!(theme.status_color(StatusTone::Done), theme.success);
    }
}
