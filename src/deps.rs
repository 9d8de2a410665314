//! Package name enumeration.
//!
//! Consumers that only care which packages a file declares read the
//! names through these iterators and ignore every other field.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ast::{Line, Requirement};

impl Requirement {
    /// Iterate over the names of all package lines, in file order.
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages().map(|package| package.name.as_str())
    }

    /// Turn the document into a lazy stream of package names.
    #[must_use]
    pub fn into_package_names(self) -> PackageNames {
        PackageNames {
            lines: self.lines.into_iter(),
            cancelled: None,
        }
    }
}

/// Owning iterator over package names.
///
/// Produced by [`Requirement::into_package_names`]. Stops early once
/// its cancellation flag, if any, is set.
#[derive(Debug)]
pub struct PackageNames {
    lines: std::vec::IntoIter<Line>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl PackageNames {
    /// Stop yielding names as soon as `flag` becomes `true`.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }
}

impl Iterator for PackageNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.is_cancelled() {
                log::debug!("package name enumeration cancelled");
                return None;
            }
            match self.lines.next()? {
                Line::Package(package) => return Some(package.name),
                Line::Command(_) | Line::BareDownload(_) => {}
            }
        }
    }
}
