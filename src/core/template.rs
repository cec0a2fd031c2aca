use super::error::NavigationError;
use std::fmt;
use std::str::FromStr;

/// Logical page kind, read from the `data-template` attribute of `.content`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Template {
    Home,
    About,
    Detail,
    Collections,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Home,
        Template::About,
        Template::Detail,
        Template::Collections,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Template::Home => "home",
            Template::About => "about",
            Template::Detail => "detail",
            Template::Collections => "collections",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Template::Home => 0,
            Template::About => 1,
            Template::Detail => 2,
            Template::Collections => 3,
        }
    }
}

impl FromStr for Template {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| NavigationError::UnknownTemplate(s.to_string()))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
