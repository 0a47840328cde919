//! Print an Argon2id PHC hash for use as `ADMIN_PASSWORD_HASH`.
//!
//! Reads the password from the first line of stdin:
//!
//! ```text
//! echo 'my admin password' | codex-hash-password
//! ```

use std::io::BufRead;
use std::process::ExitCode;

use codex_api::auth::password::{hash_password, validate_password_strength};

const MIN_PASSWORD_LENGTH: usize = 8;

fn main() -> ExitCode {
    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        eprintln!("Failed to read password from stdin: {e}");
        return ExitCode::FAILURE;
    }
    let password = line.trim_end_matches(['\r', '\n']);

    if let Err(msg) = validate_password_strength(password, MIN_PASSWORD_LENGTH) {
        eprintln!("{msg}");
        return ExitCode::FAILURE;
    }

    match hash_password(password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            ExitCode::FAILURE
        }
    }
}
