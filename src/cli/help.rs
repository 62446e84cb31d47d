//! Usage text.

use super::constants::{TOOL_NAME, TOOL_VERSION};

/// Print the usage banner to stderr.
pub fn print_usage() {
    crate::display!("{} v{} — optimal LZ4 compressor\n", TOOL_NAME, TOOL_VERSION);
    crate::display!("usage: {} [command] [options] <infile> <outfile>\n", TOOL_NAME);
    crate::display!("commands:\n");
    crate::display!("       -z: compress (default)\n");
    crate::display!("       -d: decompress\n");
    crate::display!("  -cbench: compression benchmark (infile only)\n");
    crate::display!("  -dbench: decompression benchmark (infile only)\n");
    crate::display!("    -test: run the self-test battery (no files)\n");
    crate::display!("options:\n");
    crate::display!("       -c: verify the stream after compressing\n");
    crate::display!("   -B4..7: use 64, 256, 1024 or 4096 KiB blocks (default -B7)\n");
    crate::display!("      -BD: block-dependent compression (default)\n");
    crate::display!("      -BI: block-independent compression\n");
    crate::display!("       -l: legacy frame format (8 MiB independent blocks)\n");
    crate::display!("       -r: raw block, no framing (max 4 MiB input)\n");
    crate::display!("       -D <file>: use the last 64 KiB of <file> as a dictionary\n");
    crate::display!("       --favor-decSpeed: trade some ratio for faster decompression\n");
    crate::display!("       -v: be verbose\n");
}
