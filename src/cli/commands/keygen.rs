//! Keygen command implementation
//!
//! Generates a key ahead of time so that several runs, or a later decrypt
//! job, can share it.

use crate::anonymization::cipher::{AesGcmCipher, SymmetricCipher};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the keygen command
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// File to write the raw key bytes to
    #[arg(short, long, default_value = "tabscrub.key")]
    pub output: PathBuf,

    /// Also print the key as base64 (for `[key] value`)
    #[arg(long)]
    pub print: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl KeygenArgs {
    /// Execute the keygen command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Generating key");

        if self.output.exists() && !self.force {
            println!("❌ Key file already exists: {}", self.output.display());
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let key = AesGcmCipher::new().generate_key()?;
        if let Err(e) = key.export_to(&self.output) {
            println!("❌ Failed to write key file");
            println!("   Error: {e}");
            return Ok(5);
        }

        println!("🔑 Key written to {}", self.output.display());
        println!("   Fingerprint: {}", key.fingerprint());
        if self.print {
            println!("   Base64: {}", key.to_base64());
        }

        Ok(0)
    }
}
