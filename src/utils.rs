use std::{
    fs::File,
    io::{stdout, Write},
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use which::which;

/// Allows for writing to File or Stdout depending on if a filename is given.
pub fn stdout_or_file<P>(filename: Option<&P>) -> Result<Box<dyn Write>>
where
    P: AsRef<Path>,
{
    if let Some(fp) = filename {
        let handle = File::create(fp)?;
        Ok(Box::new(handle))
    } else {
        let handle = stdout().lock();
        Ok(Box::new(handle))
    }
}

/// Returns the given path if there is one, otherwise looks `name` up on
/// `$PATH`.
pub fn find_binary(name: &'static str, binary_filepath: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = binary_filepath {
        Ok(p.to_path_buf())
    } else {
        which(name).wrap_err_with(|| format!("Error finding {name}, pass its path explicitly"))
    }
}
