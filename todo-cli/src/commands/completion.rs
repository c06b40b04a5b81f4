//! Shell completion scripts for `todo`.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, shells::Shell};

/// Prints the completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell) {
    write_completion(shell, &mut io::stdout());
}

/// Writes the completion script for `shell`, registered under the binary's
/// own name so it matches however `todo` was installed.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut command = crate::Cli::command();
    let bin_name = command.get_name().to_string();
    generate(shell, &mut command, bin_name, out);
}
