//! collatz-limb - Collatz encoding of files.
//!
//! Usage:
//!   collatz-limb <encode|decode|encrypt|decrypt|pack|unpack> SOURCE DEST [--key KEY] [-v...] [-q]
//!
//! SOURCE is read as one big-endian integer, except for `pack`, which reads text. DEST is written
//! as minimal big-endian bytes, except for `unpack`, which writes text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use collatz_limb::cipher::{self, Key};
use collatz_limb::radix::{Byte, Mixed63, Word};
use collatz_limb::{Bits, Nat, bytes, collatz, pack};

/// Radix the codec runs in.
type Work = Mixed63;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
	Encode,
	Decode,
	Encrypt,
	Decrypt,
	Pack,
	Unpack,
}

#[derive(Parser)]
#[command(name = "collatz-limb")]
#[command(about = "Reversible Collatz encoding and keystream encryption of files")]
#[command(version)]
struct Cli {
	mode: Mode,

	source: PathBuf,

	dest: PathBuf,

	/// Key text, required by encrypt and decrypt
	#[arg(long)]
	key: Option<String>,

	/// More output per occurrence
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Silence all output
	#[arg(short, long)]
	quiet: bool,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	// Warnings are on by default.
	stderrlog::new()
		.module(module_path!())
		.quiet(cli.quiet)
		.verbosity(1 + cli.verbose as usize)
		.init()
		.context("failed to install logger")?;

	log::info!("{:?} {}...", cli.mode, cli.source.display());
	let start = Instant::now();

	let output = match cli.mode {
		Mode::Pack => {
			let text = fs::read_to_string(&cli.source)
				.with_context(|| format!("failed to read text from {}", cli.source.display()))?;
			let packed = pack::pack(&text);
			log::info!("packed {} characters, dropped {}", text.chars().count() - packed.dropped, packed.dropped);
			bits_to_bytes(&packed.value)
		},
		Mode::Unpack => pack::unpack(&read_bits(&cli)?).into_bytes(),
		Mode::Encode => {
			let bits = collatz::encode(read_value(&cli)?).context("encode failed")?;
			log::info!("{} steps, {} odd", bits.bit_width() - 1, collatz::odd_steps(&bits).len());
			bits_to_bytes(&bits)
		},
		Mode::Decode => {
			let value = collatz::decode::<Work>(&read_bits(&cli)?).context("decode failed")?;
			value_to_bytes(&value)
		},
		Mode::Encrypt => {
			let key = key(&cli)?;
			let bits = cipher::encrypt(read_value(&cli)?, &key).context("encrypt failed")?;
			bits_to_bytes(&bits)
		},
		Mode::Decrypt => {
			let key = key(&cli)?;
			let value = cipher::decrypt::<Work>(&read_bits(&cli)?, &key).context("decrypt failed")?;
			value_to_bytes(&value)
		},
	};

	fs::write(&cli.dest, &output).with_context(|| format!("failed to write {}", cli.dest.display()))?;

	log::info!("done in {:.3} ms", start.elapsed().as_secs_f64() * 1e3);
	Ok(())
}

fn read_source(cli: &Cli) -> Result<Nat<Byte>> {
	let data = fs::read(&cli.source).with_context(|| format!("failed to read {}", cli.source.display()))?;
	log::debug!("read {} bytes from {}", data.len(), cli.source.display());
	Ok(bytes::from_be_bytes(&data))
}

fn read_value(cli: &Cli) -> Result<Nat<Work>> {
	Ok(read_source(cli)?.to_radix())
}

fn read_bits(cli: &Cli) -> Result<Bits> {
	Ok(read_source(cli)?.to_radix::<Word>())
}

fn bits_to_bytes(bits: &Bits) -> Vec<u8> {
	bytes::to_be_bytes(&bits.to_radix())
}

fn value_to_bytes(value: &Nat<Work>) -> Vec<u8> {
	bytes::to_be_bytes(&value.to_radix())
}

fn key(cli: &Cli) -> Result<Key> {
	let Some(text) = &cli.key else {
		bail!("{:?} needs --key", cli.mode);
	};
	Key::from_text(text).context("invalid key")
}
