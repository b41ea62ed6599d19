//! Prints an Argon2 PHC hash for the `password_hash` field of a configured
//! user. The password is read from the first argument or, if absent, from the
//! first line of standard input.

use std::io::BufRead;

use anyhow::bail;
use anyhow::Context;
use auth::PasswordHasher;

fn main() -> Result<(), anyhow::Error> {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = PasswordHasher::new()
        .hash(&password)
        .context("failed to hash password")?;
    println!("{hash}");

    Ok(())
}
