use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use calldata_compressor::{
    compress, compress_batch, decode, word_from_hex, CompressionStats, DictionaryStore, Word,
    RESERVED_INDICES,
};

#[derive(Parser)]
#[command(name = "calldata-compressor")]
#[command(about = "Dictionary-based calldata compression for fee-metered execution")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Seed the dictionary from a word list
    calldata-compressor dict seed words.json

    # Write a single dictionary word
    calldata-compressor dict set 2 0xa9059cbb

    # Show dictionary words
    calldata-compressor dict get 2 10

    # Compress a payload
    calldata-compressor compress 0xa9059cbb000000000000000000000000

    # Compress a whole corpus and report savings
    calldata-compressor compress --file tx-calldata.json

    # Reconstruct a payload from a compressed stream
    calldata-compressor decompress 0x00430000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the dictionary file
    #[arg(long, default_value = "dictionary.json")]
    pub dict: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a payload (or a JSON corpus of payloads)
    Compress {
        /// Hex payload to compress
        payload: Option<String>,

        /// JSON file mapping names to hex payloads; compressed in parallel
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Reconstruct a payload from a compressed hex stream
    Decompress {
        /// Hex stream to decode
        stream: String,
    },

    /// Administer the shared dictionary
    Dict {
        #[command(subcommand)]
        command: DictCommands,
    },
}

#[derive(Subcommand)]
pub enum DictCommands {
    /// Write one word at an index
    Set {
        index: usize,
        /// Hex word, at most 32 bytes; shorter words are zero-filled
        word: String,
    },

    /// Load a JSON array of hex words in contiguous chunks
    Seed {
        file: PathBuf,

        /// First index to write
        #[arg(long, default_value_t = RESERVED_INDICES)]
        start: usize,

        /// Words per write
        #[arg(long, default_value_t = 20)]
        chunk: usize,
    },

    /// Print the words at [begin, end)
    Get { begin: usize, end: usize },
}

#[derive(Serialize)]
struct CompressReport {
    compressed: String,
    stats: CompressionStats,
}

pub fn run_compress(
    dict_path: &Path,
    payload: Option<String>,
    file: Option<PathBuf>,
    format: &str,
) -> anyhow::Result<()> {
    let store = load_dictionary(dict_path)?;
    match (payload, file) {
        (Some(payload), None) => {
            let payload = parse_hex(&payload)?;
            let result = compress(&payload, &store)?;
            let report = CompressReport {
                compressed: format!("0x{}", hex::encode(&result.stream)),
                stats: result.stats,
            };
            match format {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => {
                    println!("{}", report.compressed);
                    print_stats(&report.stats);
                }
            }
        }
        (None, Some(file)) => {
            let corpus: BTreeMap<String, String> = serde_json::from_str(
                &fs::read_to_string(&file)
                    .with_context(|| format!("reading corpus {}", file.display()))?,
            )?;
            let payloads = corpus
                .values()
                .map(|p| parse_hex(p))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let results = compress_batch(&payloads, &store)?;
            let mut total_original = 0u64;
            let mut total_compressed = 0u64;
            for (name, result) in corpus.keys().zip(&results) {
                let stats = &result.stats;
                println!(
                    "{name}: {} -> {} bytes, cost {} -> {}",
                    stats.original_len,
                    stats.compressed_len,
                    stats.original_cost,
                    stats.compressed_cost
                );
                total_original += stats.original_cost;
                total_compressed += stats.compressed_cost;
            }
            if total_original > 0 {
                let saved = total_original.saturating_sub(total_compressed);
                println!(
                    "total cost {total_original} -> {total_compressed} ({:.1}% saved)",
                    100.0 * saved as f64 / total_original as f64
                );
            }
        }
        _ => bail!("provide exactly one of a hex payload or --file"),
    }
    Ok(())
}

pub fn run_decompress(dict_path: &Path, stream: &str) -> anyhow::Result<()> {
    let store = load_dictionary(dict_path)?;
    let stream = parse_hex(stream)?;
    let payload = decode(&stream, &store)?;
    println!("0x{}", hex::encode(payload));
    Ok(())
}

pub fn dict_set(dict_path: &Path, index: usize, word: &str) -> anyhow::Result<()> {
    let mut store = load_dictionary(dict_path)?;
    store.set(index, word_from_hex(word)?)?;
    store.save(dict_path)?;
    println!("wrote word at index {index}");
    Ok(())
}

pub fn dict_seed(dict_path: &Path, file: &Path, start: usize, chunk: usize) -> anyhow::Result<()> {
    if chunk == 0 {
        bail!("chunk size must be positive");
    }
    let entries: Vec<String> = serde_json::from_str(
        &fs::read_to_string(file)
            .with_context(|| format!("reading word list {}", file.display()))?,
    )?;
    let words = entries
        .iter()
        .map(|w| Ok(word_from_hex(w)?))
        .collect::<anyhow::Result<Vec<Word>>>()?;

    let mut store = load_dictionary(dict_path)?;
    let mut index = start;
    for block in words.chunks(chunk) {
        store.set_range(index, block)?;
        index += block.len();
    }
    store.save(dict_path)?;
    println!("seeded {} words at [{start}, {index})", words.len());
    Ok(())
}

pub fn dict_get(dict_path: &Path, begin: usize, end: usize) -> anyhow::Result<()> {
    let store = load_dictionary(dict_path)?;
    for (offset, word) in store.get(begin, end)?.iter().enumerate() {
        println!("{}: 0x{}", begin + offset, hex::encode(word));
    }
    Ok(())
}

/// Missing dictionary files read as an empty dictionary, so the codec works
/// before any seeding has happened.
fn load_dictionary(path: &Path) -> anyhow::Result<DictionaryStore> {
    if !path.exists() {
        tracing::debug!("no dictionary at {}, starting empty", path.display());
        return Ok(DictionaryStore::new());
    }
    Ok(DictionaryStore::load(path)
        .with_context(|| format!("loading dictionary {}", path.display()))?)
}

fn print_stats(stats: &CompressionStats) {
    println!(
        "{} -> {} bytes | cost {} -> {} | {} literal, {} referenced, {} dictionary words",
        stats.original_len,
        stats.compressed_len,
        stats.original_cost,
        stats.compressed_cost,
        stats.literal_bytes,
        stats.referenced_bytes,
        stats.distinct_indices
    );
}

fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = input.trim().trim_start_matches("0x");
    hex::decode(trimmed).with_context(|| format!("invalid hex input '{input}'"))
}
