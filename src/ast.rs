use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Complete requirements.txt document, one entry per
/// non-blank, non-comment source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub lines: Vec<Line>,
}

/// A single requirements.txt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    /// Package specifier: `name[extras] @ url >=1.0; marker == "x"`.
    Package(Package),
    /// pip option: `--no-binary`, `-r other.txt`.
    Command(Command),
    /// URL with no package name.
    BareDownload(String),
}

/// Package specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub extras: Vec<String>,
    pub download: Option<String>,
    pub versions: Vec<VersionConstraint>,
    pub environs: Vec<EnvironMarker>,
}

/// Version bound such as `>=1.0.6`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionConstraint {
    pub operator: Operator,
    pub value: String,
}

/// Environment marker comparison such as `python_version >= "3.6"`.
///
/// `value` is stored without its quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironMarker {
    pub name: String,
    pub operator: Operator,
    pub value: String,
}

/// Comparison operator shared by versions and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "~=")]
    Compatible,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "<")]
    Less,
}

/// pip option line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `--name [argument]`.
    LongOption {
        name: String,
        argument: Option<String>,
    },
    /// `-n [argument]`.
    ShortOption {
        name: String,
        argument: Option<String>,
    },
}

impl Operator {
    /// All operators, in the order the lexer tries them.
    pub const ALL: [Self; 7] = [
        Self::Equal,
        Self::NotEqual,
        Self::Compatible,
        Self::GreaterEqual,
        Self::Greater,
        Self::LessEqual,
        Self::Less,
    ];

    /// Return the operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Compatible => "~=",
            Self::GreaterEqual => ">=",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::Less => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is not a comparison operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl Requirement {
    /// Iterate over the package lines.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.lines.iter().filter_map(Line::as_package)
    }

    /// Iterate over the command lines.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.lines.iter().filter_map(|line| match line {
            Line::Command(command) => Some(command),
            _ => None,
        })
    }

    /// Iterate over the bare download URLs.
    pub fn bare_downloads(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::BareDownload(url) => Some(url.as_str()),
            _ => None,
        })
    }
}

impl Line {
    /// Return the package if this is a package line.
    #[must_use]
    pub const fn as_package(&self) -> Option<&Package> {
        match self {
            Self::Package(package) => Some(package),
            _ => None,
        }
    }
}

impl Command {
    /// Option name without its dashes.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::LongOption { name, .. } | Self::ShortOption { name, .. } => name,
        }
    }

    /// Trailing argument, if any.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::LongOption { argument, .. } | Self::ShortOption { argument, .. } => {
                argument.as_deref()
            }
        }
    }
}
