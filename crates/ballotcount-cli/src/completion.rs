//! Shell completion scripts for the `--completion` flag.

use std::io;

use clap::Command;
use clap_complete::Shell;

/// Write the completion script for `shell` to `out`.
///
/// The script is registered under the command's own name, so it matches
/// whatever binary name clap was configured with.
pub fn generate_completion(cmd: &mut Command, shell: Shell, out: &mut dyn io::Write) {
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, bin, out);
}

/// The completion script for `shell` as a string.
#[must_use]
pub fn completion_script(cmd: &mut Command, shell: Shell) -> String {
    let mut buf = Vec::new();
    generate_completion(cmd, shell, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
