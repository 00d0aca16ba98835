//! eccman - Reed-Solomon ECC manager command-line tool
//!
//! Operates on one message at a time: messages shorter than k are padded with
//! null bytes internally and come back at their original length.

use anyhow::{anyhow, Context, Result};
use eccman::{EccConfig, EccManager};
use std::fs;
use std::process::ExitCode;

fn read_file(path: &str, what: &str) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {} from {}", what, path))
}

fn write_file(path: &str, data: &[u8], what: &str) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Failed to write {} to {}", what, path))
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = eccman::parse_args();
    let config = EccConfig::from_args(&matches).context("Invalid ECC configuration")?;
    let manager = EccManager::from_config(&config).context("Failed to set up ECC manager")?;

    match matches.subcommand() {
        Some(("encode", sub)) => {
            let path = sub
                .get_one::<String>("message")
                .ok_or_else(|| anyhow!("Message file is required"))?;
            let message = read_file(path, "message")?;
            let ecc = manager
                .encode(&message, None)
                .with_context(|| format!("Encoding {} failed", path))?;

            match sub.get_one::<String>("output") {
                Some(output) => write_file(output, &ecc, "ecc block")?,
                None => println!("{}", hex::encode(&ecc)),
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("decode", sub)) => {
            let (message, ecc) = read_pair(sub)?;
            let decoded = manager
                .decode(&message, &ecc, None)
                .context("Decoding failed")?;

            let output = sub
                .get_one::<String>("output")
                .ok_or_else(|| anyhow!("Output file is required"))?;
            write_file(output, &decoded.message, "repaired message")?;
            if let Some(ecc_output) = sub.get_one::<String>("ecc-output") {
                write_file(ecc_output, &decoded.ecc, "repaired ecc block")?;
            }

            if decoded.was_intact() {
                println!("No errors found.");
            } else {
                println!(
                    "Repaired {} symbol(s) at {:?}.",
                    decoded.corrected.len(),
                    decoded.corrected.as_slice()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", sub)) => {
            let (message, ecc) = read_pair(sub)?;
            let intact = manager.check(&message, &ecc, None).context("Check failed")?;
            Ok(report(intact))
        }
        Some(("verify", sub)) => {
            let verifier = manager.verifier().ok_or_else(|| {
                anyhow!(
                    "The {} variant does not support verification",
                    manager.variant()
                )
            })?;
            let (message, ecc) = read_pair(sub)?;
            let valid = verifier
                .verify(&message, &ecc, None)
                .context("Verification failed")?;
            Ok(report(valid))
        }
        Some(("describe", _)) => {
            println!("{}", manager.description());
            println!(
                "n={} k={} variant={} (algo {})",
                manager.n(),
                manager.k(),
                manager.variant(),
                manager.variant().algo()
            );
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(anyhow!("No subcommand given; see --help")),
    }
}

fn read_pair(sub: &clap::ArgMatches) -> Result<(Vec<u8>, Vec<u8>)> {
    let message_path = sub
        .get_one::<String>("message")
        .ok_or_else(|| anyhow!("Message file is required"))?;
    let ecc_path = sub
        .get_one::<String>("ecc")
        .ok_or_else(|| anyhow!("ECC file is required"))?;
    Ok((
        read_file(message_path, "message")?,
        read_file(ecc_path, "ecc block")?,
    ))
}

fn report(intact: bool) -> ExitCode {
    if intact {
        println!("ok");
        ExitCode::SUCCESS
    } else {
        println!("corrupted");
        ExitCode::FAILURE
    }
}
