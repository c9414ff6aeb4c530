/// Command line configuration
use clap::{Parser, ValueEnum};
use iced::Theme;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "contact-list", about = "Manage a list of contacts", version)]
pub struct Args {
    /// Color theme of the window
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    pub theme: ThemeChoice,

    /// Log filter, e.g. `info` or `contact_list=debug`. RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    pub log: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn theme(self) -> Theme {
        match self {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

/// Install the global tracing subscriber
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["contact-list"]).unwrap();
        assert_eq!(args.theme, ThemeChoice::Dark);
        assert_eq!(args.log, "info");
    }

    #[test]
    fn test_light_theme_and_filter() {
        let args =
            Args::try_parse_from(["contact-list", "--theme", "light", "--log", "debug"]).unwrap();
        assert_eq!(args.theme.theme(), Theme::Light);
        assert_eq!(args.log, "debug");
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Args::try_parse_from(["contact-list", "--theme", "sepia"]).is_err());
    }
}
