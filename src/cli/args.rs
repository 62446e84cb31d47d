//! Command-line argument parsing.
//!
//! Commands are mutually exclusive; repeated flags are rejected rather than
//! silently overridden, so `lz4opt -z -d f g` is a usage error instead of a
//! surprise.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::config::{BLOCK_MAX_CODE_DEFAULT, BLOCK_MAX_CODE_MAX, BLOCK_MAX_CODE_MIN};
use crate::io::StreamOptions;

/// The operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
    CompressBench,
    DecompressBench,
    SelfTest,
}

/// Everything the entry point needs, fully validated.
#[derive(Debug)]
pub struct ParsedArgs {
    pub op_mode: OpMode,
    pub verify: bool,
    pub verbose: bool,
    pub options: StreamOptions,
    pub dictionary: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs> {
    let mut op_mode: Option<OpMode> = None;
    let mut verify = false;
    let mut verbose = false;
    let mut block_code: Option<u32> = None;
    let mut dependence: Option<bool> = None;
    let mut legacy = false;
    let mut raw = false;
    let mut favor_ratio = true;
    let mut dictionary: Option<PathBuf> = None;
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    let set_mode = |mode: OpMode, current: &mut Option<OpMode>| -> Result<()> {
        if current.is_some() {
            return Err(anyhow!("only one command may be given"));
        }
        *current = Some(mode);
        Ok(())
    };

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-z" => set_mode(OpMode::Compress, &mut op_mode)?,
            "-d" => set_mode(OpMode::Decompress, &mut op_mode)?,
            "-cbench" => set_mode(OpMode::CompressBench, &mut op_mode)?,
            "-dbench" => set_mode(OpMode::DecompressBench, &mut op_mode)?,
            "-test" => set_mode(OpMode::SelfTest, &mut op_mode)?,
            "-c" => {
                if verify {
                    return Err(anyhow!("-c given twice"));
                }
                verify = true;
            }
            "-v" => {
                if verbose {
                    return Err(anyhow!("-v given twice"));
                }
                verbose = true;
            }
            "-BD" | "-BI" => {
                if dependence.is_some() {
                    return Err(anyhow!("block dependence given twice"));
                }
                dependence = Some(arg == "-BI");
            }
            "-l" => {
                if legacy {
                    return Err(anyhow!("-l given twice"));
                }
                legacy = true;
            }
            "-r" => {
                if raw {
                    return Err(anyhow!("-r given twice"));
                }
                raw = true;
            }
            "--favor-decSpeed" => {
                if !favor_ratio {
                    return Err(anyhow!("--favor-decSpeed given twice"));
                }
                favor_ratio = false;
            }
            "-D" => {
                if dictionary.is_some() {
                    return Err(anyhow!("-D given twice"));
                }
                let path = it
                    .next()
                    .ok_or_else(|| anyhow!("-D requires a dictionary filename"))?;
                dictionary = Some(PathBuf::from(path));
            }
            s if s.starts_with("-B") && s.len() > 2 => {
                if block_code.is_some() {
                    return Err(anyhow!("block size code given twice"));
                }
                let code: u32 = s[2..]
                    .parse()
                    .map_err(|_| anyhow!("invalid block size code: {}", s))?;
                if !(BLOCK_MAX_CODE_MIN..=BLOCK_MAX_CODE_MAX).contains(&code) {
                    return Err(anyhow!(
                        "block size code must be {}..{}",
                        BLOCK_MAX_CODE_MIN,
                        BLOCK_MAX_CODE_MAX
                    ));
                }
                block_code = Some(code);
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(anyhow!("unknown option: {}", s));
            }
            _ => {
                if input.is_none() {
                    input = Some(PathBuf::from(arg));
                } else if output.is_none() {
                    output = Some(PathBuf::from(arg));
                } else {
                    return Err(anyhow!("too many filenames"));
                }
            }
        }
    }

    let op_mode = op_mode.unwrap_or(OpMode::Compress);

    // File requirements depend on the command.
    match op_mode {
        OpMode::Compress | OpMode::Decompress => {
            if input.is_none() || output.is_none() {
                return Err(anyhow!("an input file and an output file are required"));
            }
        }
        OpMode::CompressBench | OpMode::DecompressBench => {
            if input.is_none() {
                return Err(anyhow!("benchmark requires an input file"));
            }
            if output.is_some() {
                return Err(anyhow!("benchmark takes no output file"));
            }
        }
        OpMode::SelfTest => {
            if input.is_some() {
                return Err(anyhow!("self-test takes no filenames"));
            }
        }
    }

    Ok(ParsedArgs {
        op_mode,
        verify,
        verbose,
        options: StreamOptions {
            block_max_code: block_code.unwrap_or(BLOCK_MAX_CODE_DEFAULT),
            independent_blocks: dependence.unwrap_or(false),
            legacy_frames: legacy,
            raw_block: raw,
            favor_ratio,
        },
        dictionary,
        input,
        output,
    })
}
