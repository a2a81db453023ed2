//! `cinecommand normalize` — Normalize one call-style command.

pub fn run(call: &str) -> Result<(), Box<dyn std::error::Error>> {
    let command = cinecommand_parser::parse_call(call)
        .ok_or_else(|| format!("Not a call-style command: {call}"))?;

    eprintln!("  {command}");
    println!("{}", serde_json::to_string_pretty(&command)?);
    Ok(())
}
