use std::io::{self, Write};

use anyhow::{Result, bail};
use vc_config::{Region, UserConfig};

pub fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        bail!("Input closed");
    }
    Ok(input.trim().to_string())
}

/// Ask for login details and a region
pub fn ask_user_config() -> Result<UserConfig> {
    println!();
    println!("Your login details are stored locally for next time.");
    println!();

    let username = read_line("Riot username: ")?;
    if username.is_empty() {
        bail!("Username is required");
    }

    // Read password without echo
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        bail!("Password is required");
    }

    for region in Region::ALL {
        println!("  {:<3} {}", region.as_str(), region.description());
    }
    let region = Region::from_input(&read_line("Region [na]: ")?);

    Ok(UserConfig {
        username,
        password,
        region,
    })
}

/// Anything but `n` / `no` keeps the saved login, so Enter accepts
pub fn keeps_saved_login(answer: &str) -> bool {
    !matches!(answer.trim().to_ascii_lowercase().as_str(), "n" | "no")
}

pub fn confirm_saved_login(username: &str) -> Result<bool> {
    let answer = read_line(&format!(
        "Use previously saved username ({username}) and password? [Y/n] "
    ))?;
    Ok(keeps_saved_login(&answer))
}

pub fn ask_multifactor_code(email: Option<&str>) -> Result<String> {
    match email {
        Some(email) => println!("A verification code was sent to {email}"),
        None => println!("A verification code was sent to your email"),
    }

    let code = read_line("Code: ")?;
    if code.is_empty() {
        bail!("Verification code is required");
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_login_answers() {
        assert!(keeps_saved_login(""));
        assert!(keeps_saved_login("y"));
        assert!(keeps_saved_login("Yes"));
        assert!(!keeps_saved_login("n"));
        assert!(!keeps_saved_login(" N "));
        assert!(!keeps_saved_login("no"));
    }
}
