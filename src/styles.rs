//! Styling for the statistics block written to standard error
use anstyle::{AnsiColor, Color, Style};
use clap::ValueEnum;
use std::fmt;

/// When to color the statistics block
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when standard error supports it
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const PLAIN: Style = Style::new();

/// The styles for titles and labels. A `StyleSheet` without color renders
/// its content unchanged.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    title: Style,
    label: Style,
}

const COLORED: StyleSheet = StyleSheet { title: YELLOW, label: GREEN };
const UNCOLORED: StyleSheet = StyleSheet { title: PLAIN, label: PLAIN };

impl StyleSheet {
    /// The style sheet to use for standard error, given the user's choice
    #[must_use]
    pub fn for_stderr(choice: ColorChoice) -> StyleSheet {
        match choice {
            ColorChoice::Always => COLORED,
            ColorChoice::Never => UNCOLORED,
            ColorChoice::Auto => {
                use enable_ansi_support::enable_ansi_support;
                use supports_color::Stream;
                let use_color =
                    enable_ansi_support().is_ok() && supports_color::on(Stream::Stderr).is_some();
                if use_color {
                    COLORED
                } else {
                    UNCOLORED
                }
            }
        }
    }

    /// A style sheet that never colors
    #[must_use]
    pub fn plain() -> StyleSheet {
        UNCOLORED
    }

    /// `content` styled as a title
    #[must_use]
    pub fn title<'a>(&self, content: &'a str) -> StyledStr<'a> {
        StyledStr { prefix: self.title, content }
    }

    /// `content` styled as a label
    #[must_use]
    pub fn label<'a>(&self, content: &'a str) -> StyledStr<'a> {
        StyledStr { prefix: self.label, content }
    }
}

/// A string together with the style it's displayed in
pub struct StyledStr<'a> {
    prefix: Style,
    content: &'a str,
}

impl fmt::Display for StyledStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix.render(), self.content, self.prefix.render_reset())
    }
}
