//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use pkgcloud::packagecloud::{ClientError, Package};

/// Writes one `{name}_{version}-{release}` line per package.
pub fn write_packages<W: Write>(writer: &mut W, packages: &[Package]) -> Result<(), ClientError> {
    for package in packages {
        writeln!(writer, "{}", package.display_name()).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes the package count of a repository.
pub fn write_count<W: Write>(
    writer: &mut W,
    user: &str,
    repo: &str,
    count: u64,
) -> Result<(), ClientError> {
    writeln!(writer, "{user}/{repo} contains {count} packages").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`ClientError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ClientError {
    ClientError::Io {
        message: error.to_string(),
    }
}
