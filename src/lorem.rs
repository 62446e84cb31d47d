//! Deterministic lorem-ipsum generator.
//!
//! Produces natural-language-shaped text for the benchmark runner and the
//! self-test battery.  Output is a pure function of `(size, seed)`, so test
//! expectations stay stable across runs and platforms.

static WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et",
    "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea",
    "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt",
    "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est",
    "laborum", "atque",
];

/// Small deterministic PRNG (xorshift32).
struct Rng(u32);

impl Rng {
    fn new(seed: u32) -> Self {
        // A zero state would be a fixed point.
        Rng(seed | 1)
    }

    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u32) -> u32 {
        ((self.next() as u64 * bound as u64) >> 32) as u32
    }
}

/// Fill `buf` completely with sentence- and paragraph-structured text.
pub fn fill(buf: &mut [u8], seed: u32) {
    let mut rng = Rng::new(seed);
    let mut pos = 0usize;
    let mut word_in_sentence = 0u32;
    let mut sentence_len = 6 + rng.below(10);
    let mut sentence_in_paragraph = 0u32;
    let mut paragraph_len = 3 + rng.below(5);

    while pos < buf.len() {
        let word = WORDS[rng.below(WORDS.len() as u32) as usize].as_bytes();
        let n = word.len().min(buf.len() - pos);
        buf[pos..pos + n].copy_from_slice(&word[..n]);
        if word_in_sentence == 0 && n > 0 {
            buf[pos] = buf[pos].to_ascii_uppercase();
        }
        pos += n;

        word_in_sentence += 1;
        let sep: &[u8] = if word_in_sentence >= sentence_len {
            word_in_sentence = 0;
            sentence_len = 6 + rng.below(10);
            sentence_in_paragraph += 1;
            if sentence_in_paragraph >= paragraph_len {
                sentence_in_paragraph = 0;
                paragraph_len = 3 + rng.below(5);
                b".\n\n"
            } else {
                b". "
            }
        } else if rng.below(9) == 0 {
            b", "
        } else {
            b" "
        };
        let n = sep.len().min(buf.len() - pos);
        buf[pos..pos + n].copy_from_slice(&sep[..n]);
        pos += n;
    }
}

/// Allocate and fill a buffer of exactly `size` bytes.
pub fn gen_buffer(size: usize, seed: u32) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    fill(&mut buf, seed);
    buf
}
