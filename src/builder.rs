use crate::ast::{Command, EnvironMarker, Line, Operator, Package, Requirement, VersionConstraint};

impl Requirement {
    /// Create an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line.
    #[must_use]
    pub fn line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Append a package line.
    #[must_use]
    pub fn package(self, package: Package) -> Self {
        self.line(Line::Package(package))
    }

    /// Append an option line.
    #[must_use]
    pub fn command(self, command: Command) -> Self {
        self.line(Line::Command(command))
    }

    /// Append a bare download URL line.
    #[must_use]
    pub fn download(self, url: &str) -> Self {
        self.line(Line::BareDownload(url.to_string()))
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::new()
    }
}

impl Package {
    /// Create an unconstrained package.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extras: Vec::new(),
            download: None,
            versions: Vec::new(),
            environs: Vec::new(),
        }
    }

    /// Request an extra feature.
    #[must_use]
    pub fn extra(mut self, extra: &str) -> Self {
        self.extras.push(extra.to_string());
        self
    }

    /// Install from a URL instead of the index.
    #[must_use]
    pub fn download(mut self, url: &str) -> Self {
        self.download = Some(url.to_string());
        self
    }

    /// Add a version bound.
    #[must_use]
    pub fn version(mut self, operator: Operator, value: &str) -> Self {
        self.versions.push(VersionConstraint {
            operator,
            value: value.to_string(),
        });
        self
    }

    /// Add an environment marker comparison.
    #[must_use]
    pub fn environ(mut self, name: &str, operator: Operator, value: &str) -> Self {
        self.environs.push(EnvironMarker {
            name: name.to_string(),
            operator,
            value: value.to_string(),
        });
        self
    }
}

impl Command {
    /// `--name`.
    #[must_use]
    pub fn long(name: &str) -> Self {
        Self::LongOption {
            name: name.to_string(),
            argument: None,
        }
    }

    /// `-name`.
    #[must_use]
    pub fn short(name: &str) -> Self {
        Self::ShortOption {
            name: name.to_string(),
            argument: None,
        }
    }

    /// Set the trailing argument.
    #[must_use]
    pub fn with_argument(self, value: &str) -> Self {
        let value = Some(value.to_string());
        match self {
            Self::LongOption { name, .. } => Self::LongOption {
                name,
                argument: value,
            },
            Self::ShortOption { name, .. } => Self::ShortOption {
                name,
                argument: value,
            },
        }
    }
}
